//! Custom tab stops per line.

use crate::per_line::PerLine;

/// Sorted, duplicate-free tab stop columns for each line that has any.
#[derive(Debug, Clone, Default)]
pub struct LineTabstops {
    tabstops: Vec<Option<Vec<i32>>>,
}

impl LineTabstops {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab stop at column `x` of `line` in a document with `total_lines` lines.
    ///
    /// Returns `false` if it was already there or `line` is outside the document.
    pub fn add_tabstop(&mut self, line: usize, x: i32, total_lines: usize) -> bool {
        if line >= total_lines {
            return false;
        }
        if self.tabstops.len() <= line {
            self.tabstops.resize_with(line + 1, || None);
        }
        let stops = self.tabstops[line].get_or_insert_with(Vec::new);
        match stops.binary_search(&x) {
            Ok(_) => false,
            Err(index) => {
                stops.insert(index, x);
                true
            }
        }
    }

    /// Remove every tab stop of `line`. Returns whether it had any.
    pub fn clear_tabstops(&mut self, line: usize) -> bool {
        self.tabstops
            .get_mut(line)
            .and_then(Option::take)
            .is_some_and(|stops| !stops.is_empty())
    }

    /// Smallest tab stop of `line` strictly after `x`.
    ///
    /// `None` means the line has no custom stop there and the uniform tab width applies.
    pub fn get_next_tabstop(&self, line: usize, x: i32) -> Option<i32> {
        let stops = self.tabstops(line);
        stops.get(stops.partition_point(|&stop| stop <= x)).copied()
    }

    /// Tab stops of `line`, ascending.
    pub fn tabstops(&self, line: usize) -> &[i32] {
        self.tabstops
            .get(line)
            .and_then(Option::as_deref)
            .unwrap_or(&[])
    }
}

impl PerLine for LineTabstops {
    fn init(&mut self) {
        self.tabstops.clear();
    }

    fn insert_line(&mut self, line: usize) {
        if line < self.tabstops.len() {
            self.tabstops.insert(line, None);
        }
    }

    fn remove_line(&mut self, line: usize) {
        if line < self.tabstops.len() {
            self.tabstops.remove(line);
        }
    }
}
