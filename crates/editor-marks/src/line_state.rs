//! Opaque per-line lexer state.

use crate::per_line::PerLine;

/// Lexer state saved at the end of each line, 0 when unset.
#[derive(Debug, Clone, Default)]
pub struct LineState {
    states: Vec<i32>,
}

impl LineState {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `state` for `line` of a document with `total_lines` lines and return the previous
    /// state. Lines at or past `total_lines` are ignored and read back as 0.
    pub fn set_line_state(&mut self, line: usize, state: i32, total_lines: usize) -> i32 {
        if line >= total_lines {
            return 0;
        }
        if line >= self.states.len() {
            if state == 0 {
                return 0;
            }
            self.states.resize(line + 1, 0);
        }
        std::mem::replace(&mut self.states[line], state)
    }

    /// State of `line`.
    pub fn get_line_state(&self, line: usize) -> i32 {
        self.states.get(line).copied().unwrap_or(0)
    }

    /// Highest line that has had a non-zero state stored.
    pub fn get_max_line_state(&self) -> Option<usize> {
        self.states.len().checked_sub(1)
    }
}

impl PerLine for LineState {
    fn init(&mut self) {
        self.states.clear();
    }

    fn insert_line(&mut self, line: usize) {
        if line < self.states.len() {
            self.states.insert(line, 0);
        }
    }

    fn remove_line(&mut self, line: usize) {
        if line < self.states.len() {
            self.states.remove(line);
        }
    }
}
