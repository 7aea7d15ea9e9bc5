//! Shared contract for per-line side tables.

/// A table indexed by logical line that follows line insertions and removals.
///
/// The host calls [`insert_line`](Self::insert_line) once for every new line and
/// [`remove_line`](Self::remove_line) once for every deleted line, in document order, so the
/// entries stay attached to the text they describe. Reads past the stored range return the
/// table's default value.
pub trait PerLine {
    /// Drop all per-line data (document reload).
    fn init(&mut self);

    /// A new line was inserted at `line`; later entries move down by one.
    fn insert_line(&mut self, line: usize);

    /// `count` new lines were inserted starting at `line`.
    fn insert_lines(&mut self, line: usize, count: usize) {
        for offset in 0..count {
            self.insert_line(line + offset);
        }
    }

    /// The line at `line` was removed; later entries move up by one.
    fn remove_line(&mut self, line: usize);
}
