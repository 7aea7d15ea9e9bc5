//! Host document driving the side tables.
//!
//! [`Document`] stores the text in a [`Rope`] and forwards every edit to the decorations and the
//! per-line tables, so their coordinates never drift from the text. Positions are character
//! offsets; lines are the rope's logical lines.

use ropey::Rope;

use crate::annotations::LineAnnotation;
use crate::config::DocumentConfig;
use crate::decorations::DecorationList;
use crate::error::DocumentError;
use crate::levels::LineLevels;
use crate::line_state::LineState;
use crate::markers::{LineMarkers, MarkerHandle};
use crate::per_line::PerLine;
use crate::tabstops::LineTabstops;

/// Text plus every per-position and per-line table attached to it.
pub struct Document {
    rope: Rope,
    config: DocumentConfig,
    decorations: DecorationList,
    markers: LineMarkers,
    levels: LineLevels,
    states: LineState,
    annotations: LineAnnotation,
    tabstops: LineTabstops,
}

impl Document {
    /// Create a document with the default config.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, DocumentConfig::default())
    }

    /// Create a document with `config`.
    pub fn with_config(text: &str, config: DocumentConfig) -> Self {
        let rope = Rope::from_str(text);
        let decorations = DecorationList::with_length(rope.len_chars());
        let levels = LineLevels::with_default(config.default_fold_level);
        Self {
            rope,
            config,
            decorations,
            markers: LineMarkers::new(),
            levels,
            states: LineState::new(),
            annotations: LineAnnotation::new(),
            tabstops: LineTabstops::new(),
        }
    }

    fn per_line_tables(&mut self) -> [&mut dyn PerLine; 5] {
        [
            &mut self.markers,
            &mut self.levels,
            &mut self.states,
            &mut self.annotations,
            &mut self.tabstops,
        ]
    }

    /// Replace the whole text, dropping every marker, level, state, annotation, tab stop and
    /// decoration.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        for table in self.per_line_tables() {
            table.init();
        }
        self.decorations.reset(self.rope.len_chars());
        tracing::debug!(chars = self.rope.len_chars(), "reloaded document");
    }

    /// Config this document was created with.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total character count.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total line count (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character offset where `line` starts; the document length past the last line.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Line containing character offset `position` (clamped to the document).
    pub fn line_from_position(&self, position: usize) -> usize {
        self.rope
            .char_to_line(position.min(self.rope.len_chars()))
    }

    /// Text of `line` without its line ending.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Insert `text` at character offset `position`.
    pub fn insert_text(&mut self, position: usize, text: &str) -> Result<(), DocumentError> {
        let length = self.rope.len_chars();
        if position > length {
            return Err(DocumentError::InvalidPosition { position, length });
        }
        if text.is_empty() {
            return Ok(());
        }

        let line = self.rope.char_to_line(position);
        let at_line_start = self.rope.line_to_char(line) == position;
        let lines_before = self.rope.len_lines();

        self.rope.insert(position, text);
        let inserted = self.rope.len_chars() - length;
        self.decorations.insert_space(position, inserted);

        let added = self.rope.len_lines().saturating_sub(lines_before);
        if added > 0 {
            // Data of a line whose start was pushed down follows its text.
            let first = if at_line_start { line } else { line + 1 };
            for table in self.per_line_tables() {
                table.insert_lines(first, added);
            }
        }

        tracing::debug!(position, chars = inserted, lines = added, "inserted text");
        Ok(())
    }

    /// Delete `length` characters starting at `position`.
    ///
    /// Joined lines keep the markers of both halves.
    pub fn delete_range(&mut self, position: usize, length: usize) -> Result<(), DocumentError> {
        let doc_length = self.rope.len_chars();
        let end = position.saturating_add(length);
        if end > doc_length {
            return Err(DocumentError::InvalidRange {
                start: position,
                end,
                length: doc_length,
            });
        }
        if length == 0 {
            return Ok(());
        }

        let line = self.rope.char_to_line(position);
        let lines_before = self.rope.len_lines();

        self.rope.remove(position..end);
        self.decorations.delete_range(position, length);

        let removed = lines_before.saturating_sub(self.rope.len_lines());
        for _ in 0..removed {
            for table in self.per_line_tables() {
                table.remove_line(line + 1);
            }
        }

        tracing::debug!(position, chars = length, lines = removed, "deleted range");
        Ok(())
    }

    /// Add marker `number` to `line`.
    pub fn add_marker(&mut self, line: usize, number: u32) -> Option<MarkerHandle> {
        let total_lines = self.line_count();
        self.markers.add_mark(line, number, total_lines)
    }

    /// Set the fold level of `lines` consecutive lines from `line`; returns the previous level.
    pub fn set_fold_level(&mut self, line: usize, level: i32, lines: usize) -> i32 {
        let total_lines = self.line_count();
        self.levels.set_level(line, level, lines, total_lines)
    }

    /// Store the lexer state of `line`; returns the previous state.
    pub fn set_line_state(&mut self, line: usize, state: i32) -> i32 {
        let total_lines = self.line_count();
        self.states.set_line_state(line, state, total_lines)
    }

    /// Add a custom tab stop at column `x` of `line`.
    pub fn add_tabstop(&mut self, line: usize, x: i32) -> bool {
        let total_lines = self.line_count();
        self.tabstops.add_tabstop(line, x, total_lines)
    }

    /// Replace the annotation text of `line`; `None` removes it.
    pub fn set_annotation(&mut self, line: usize, text: Option<&str>) {
        let total_lines = self.line_count();
        self.annotations.set_text(line, text, total_lines);
    }

    /// Next tab stop after column `x` on `line`: a custom stop if there is one, otherwise the
    /// next multiple of the configured tab width.
    pub fn next_tab_stop(&self, line: usize, x: i32) -> i32 {
        self.tabstops.get_next_tabstop(line, x).unwrap_or_else(|| {
            let width = i32::try_from(self.config.tab_width.max(1)).unwrap_or(i32::MAX);
            x.div_euclid(width).saturating_add(1).saturating_mul(width)
        })
    }

    /// Indicator decorations.
    pub fn decorations(&self) -> &DecorationList {
        &self.decorations
    }

    /// Mutable indicator decorations.
    pub fn decorations_mut(&mut self) -> &mut DecorationList {
        &mut self.decorations
    }

    /// Line markers.
    pub fn markers(&self) -> &LineMarkers {
        &self.markers
    }

    /// Mutable line markers.
    pub fn markers_mut(&mut self) -> &mut LineMarkers {
        &mut self.markers
    }

    /// Fold levels.
    pub fn levels(&self) -> &LineLevels {
        &self.levels
    }

    /// Mutable fold levels.
    pub fn levels_mut(&mut self) -> &mut LineLevels {
        &mut self.levels
    }

    /// Lexer line states.
    pub fn states(&self) -> &LineState {
        &self.states
    }

    /// Mutable lexer line states.
    pub fn states_mut(&mut self) -> &mut LineState {
        &mut self.states
    }

    /// Annotations.
    pub fn annotations(&self) -> &LineAnnotation {
        &self.annotations
    }

    /// Mutable annotations.
    pub fn annotations_mut(&mut self) -> &mut LineAnnotation {
        &mut self.annotations
    }

    /// Custom tab stops.
    pub fn tabstops(&self) -> &LineTabstops {
        &self.tabstops
    }

    /// Mutable custom tab stops.
    pub fn tabstops_mut(&mut self) -> &mut LineTabstops {
        &mut self.tabstops
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}
