//! Fold levels per line.
//!
//! A level packs the fold depth (`FOLD_LEVEL_NUMBER_MASK`) with flags marking fold headers and
//! whitespace-only lines. Lexers write levels; folding code reads them.

use crate::per_line::PerLine;

/// Conventional depth of top-level lines.
pub const FOLD_LEVEL_BASE: i32 = 0x400;
/// Flag: the line is blank and takes its depth from context.
pub const FOLD_LEVEL_WHITE_FLAG: i32 = 0x1000;
/// Flag: the line starts a fold.
pub const FOLD_LEVEL_HEADER_FLAG: i32 = 0x2000;
/// Mask selecting the depth bits of a level.
pub const FOLD_LEVEL_NUMBER_MASK: i32 = 0x0FFF;

/// Depth bits of `level`.
pub fn fold_number(level: i32) -> i32 {
    level & FOLD_LEVEL_NUMBER_MASK
}

/// Check if `level` marks a fold header.
pub fn is_header(level: i32) -> bool {
    level & FOLD_LEVEL_HEADER_FLAG != 0
}

/// Check if `level` marks a whitespace-only line.
pub fn is_white(level: i32) -> bool {
    level & FOLD_LEVEL_WHITE_FLAG != 0
}

/// Fold level of every line.
#[derive(Debug, Clone, Default)]
pub struct LineLevels {
    levels: Vec<i32>,
    default_level: i32,
}

impl LineLevels {
    /// Create a table whose unset lines read as 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table whose unset lines read as `default_level`.
    pub fn with_default(default_level: i32) -> Self {
        Self {
            levels: Vec::new(),
            default_level,
        }
    }

    /// Level reported for lines that were never set.
    pub fn default_level(&self) -> i32 {
        self.default_level
    }

    /// Grow storage to `size_new` lines, filling with the default level.
    pub fn expand_levels(&mut self, size_new: usize) {
        if self.levels.len() < size_new {
            self.levels.resize(size_new, self.default_level);
        }
    }

    /// Reset every line to the default level.
    pub fn clear_levels(&mut self) {
        self.levels.clear();
    }

    /// Set `lines` consecutive lines starting at `line` of a document with `total_lines` lines
    /// to `level` and return the previous level of `line`. A count of 0 sets just `line`.
    ///
    /// Storage is expanded to `total_lines` so later line removals know where the document
    /// ends. Lines at or past `total_lines` are ignored and the block is clipped to the document.
    pub fn set_level(
        &mut self,
        line: usize,
        level: i32,
        lines: usize,
        total_lines: usize,
    ) -> i32 {
        if line >= total_lines {
            return self.get_level(line);
        }
        self.expand_levels(total_lines);
        let end = line.saturating_add(lines.max(1)).min(self.levels.len());
        let previous = self.levels[line];
        self.levels[line..end].fill(level);
        previous
    }

    /// Level of `line`, or the default level outside the stored range.
    pub fn get_level(&self, line: usize) -> i32 {
        self.levels
            .get(line)
            .copied()
            .unwrap_or(self.default_level)
    }
}

impl PerLine for LineLevels {
    fn init(&mut self) {
        self.levels.clear();
    }

    fn insert_line(&mut self, line: usize) {
        if self.levels.is_empty() {
            return;
        }
        let line = line.min(self.levels.len());
        self.levels.insert(line, self.default_level);
    }

    fn remove_line(&mut self, line: usize) {
        if line >= self.levels.len() {
            return;
        }
        let header = self.levels.remove(line) & FOLD_LEVEL_HEADER_FLAG;
        if line == 0 {
            return;
        }
        if line == self.levels.len() {
            // A header on the last line has nothing to fold.
            self.levels[line - 1] &= !FOLD_LEVEL_HEADER_FLAG;
        } else {
            self.levels[line - 1] |= header;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_level_defaults() {
        let levels = LineLevels::with_default(FOLD_LEVEL_BASE);
        assert_eq!(levels.get_level(0), FOLD_LEVEL_BASE);
        assert_eq!(levels.get_level(1000), FOLD_LEVEL_BASE);
    }

    #[test]
    fn test_set_level_block() {
        let mut levels = LineLevels::new();
        assert_eq!(levels.set_level(2, 5, 3, 10), 0);
        assert_eq!(levels.get_level(1), 0);
        assert_eq!(levels.get_level(2), 5);
        assert_eq!(levels.get_level(4), 5);
        assert_eq!(levels.get_level(5), 0);
        assert_eq!(levels.set_level(3, 6, 0, 10), 5);
        assert_eq!(levels.get_level(3), 6);
        assert_eq!(levels.get_level(4), 5);
    }

    #[test]
    fn test_remove_line_carries_header_flag_up() {
        let mut levels = LineLevels::new();
        let header = FOLD_LEVEL_BASE | FOLD_LEVEL_HEADER_FLAG;
        levels.set_level(0, FOLD_LEVEL_BASE, 1, 4);
        levels.set_level(1, header, 1, 4);
        levels.set_level(2, FOLD_LEVEL_BASE + 1, 1, 4);
        levels.set_level(3, FOLD_LEVEL_BASE, 1, 4);

        levels.remove_line(1);
        assert!(is_header(levels.get_level(0)));
        assert_eq!(fold_number(levels.get_level(1)), FOLD_LEVEL_BASE + 1);
    }

    #[test]
    fn test_remove_last_line_clears_header() {
        let mut levels = LineLevels::new();
        let header = FOLD_LEVEL_BASE | FOLD_LEVEL_HEADER_FLAG;
        levels.set_level(0, header, 1, 2);
        levels.set_level(1, FOLD_LEVEL_BASE + 1, 1, 2);

        levels.remove_line(1);
        assert!(!is_header(levels.get_level(0)));
        assert_eq!(levels.get_level(0), FOLD_LEVEL_BASE);
    }

    #[test]
    fn test_insert_line_uses_default() {
        let mut levels = LineLevels::with_default(FOLD_LEVEL_BASE);
        levels.set_level(0, 7, 2, 2);
        levels.insert_line(1);
        assert_eq!(levels.get_level(0), 7);
        assert_eq!(levels.get_level(1), FOLD_LEVEL_BASE);
        assert_eq!(levels.get_level(2), 7);
        assert!(!is_white(levels.get_level(1)));
    }

    #[test]
    fn test_header_kept_when_joining_before_untouched_lines() {
        let mut levels = LineLevels::new();
        let header = FOLD_LEVEL_BASE | FOLD_LEVEL_HEADER_FLAG;
        levels.set_level(0, header, 1, 5);
        levels.set_level(1, FOLD_LEVEL_BASE + 1, 1, 5);

        levels.remove_line(1);
        assert_eq!(levels.get_level(0), header);
        assert_eq!(levels.get_level(1), 0);
    }

    #[test]
    fn test_set_level_outside_document_is_ignored() {
        let mut levels = LineLevels::with_default(FOLD_LEVEL_BASE);
        assert_eq!(levels.set_level(usize::MAX, 1, 1, 3), FOLD_LEVEL_BASE);
        assert_eq!(levels.set_level(3, 1, 1, 3), FOLD_LEVEL_BASE);
        assert!(levels.levels.is_empty());

        // A block running past the end is clipped.
        levels.set_level(1, 9, usize::MAX, 3);
        assert_eq!(levels.levels, vec![FOLD_LEVEL_BASE, 9, 9]);
    }
}
