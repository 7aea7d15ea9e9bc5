//! Run-length encoded values over a position range.
//!
//! [`RunStyles`] partitions `[0, len)` into maximal runs of equal value. It is the storage behind
//! every [`Decoration`](crate::decorations::Decoration): a document usually has a handful of long
//! runs per indicator, so point queries are a binary search and edits touch only the run vector.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    value: i32,
}

/// Run-length encoded sequence of `i32` values covering `[0, len)`.
///
/// Invariants: the first run starts at 0, run starts strictly increase, and adjacent runs never
/// share a value. An empty sequence is a single zero run of length 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStyles {
    /// Runs sorted by start offset.
    runs: Vec<Run>,
    length: usize,
}

impl RunStyles {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::with_length(0)
    }

    /// Create a sequence of `length` positions, all with value 0.
    pub fn with_length(length: usize) -> Self {
        Self {
            runs: vec![Run { start: 0, value: 0 }],
            length,
        }
    }

    /// Total number of positions covered.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the sequence covers no positions.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of runs.
    pub fn runs(&self) -> usize {
        self.runs.len()
    }

    /// Index of the run containing `position` (the last run for positions at or past the end).
    fn run_index(&self, position: usize) -> usize {
        self.runs
            .partition_point(|run| run.start <= position)
            .saturating_sub(1)
    }

    fn run_end(&self, index: usize) -> usize {
        self.runs
            .get(index + 1)
            .map_or(self.length, |run| run.start)
    }

    /// Value at `position`, or 0 past the end.
    pub fn value_at(&self, position: usize) -> i32 {
        if position >= self.length {
            return 0;
        }
        self.runs[self.run_index(position)].value
    }

    /// Start of the run containing `position`.
    pub fn start_run(&self, position: usize) -> usize {
        self.runs[self.run_index(position)].start
    }

    /// End (exclusive) of the run containing `position`.
    pub fn end_run(&self, position: usize) -> usize {
        self.run_end(self.run_index(position))
    }

    /// Ensure a run boundary at `position` and return the index of the run starting there.
    ///
    /// Returns `runs.len()` when `position` is at or past the end.
    fn split_at(&mut self, position: usize) -> usize {
        if position >= self.length {
            return self.runs.len();
        }
        let index = self.run_index(position);
        if self.runs[index].start == position {
            return index;
        }
        let value = self.runs[index].value;
        self.runs.insert(index + 1, Run { start: position, value });
        index + 1
    }

    fn merge_with_previous(&mut self, index: usize) {
        if index > 0 && index < self.runs.len() && self.runs[index - 1].value == self.runs[index].value
        {
            self.runs.remove(index);
        }
    }

    /// Set `[position, position + length)` to `value`.
    ///
    /// The range is clamped to the sequence. Leading and trailing parts that already hold `value`
    /// are trimmed, and the remaining range (the one that actually changed) is returned. `None`
    /// means nothing changed.
    pub fn fill_range(&mut self, position: usize, value: i32, length: usize) -> Option<Range<usize>> {
        let mut end = position.saturating_add(length).min(self.length);
        if position >= end {
            return None;
        }

        let mut start = position;
        if self.value_at(start) == value {
            start = self.end_run(start);
            if start >= end {
                return None;
            }
        }
        if self.value_at(end - 1) == value {
            end = self.start_run(end - 1);
        }

        let first = self.split_at(start);
        let last = self.split_at(end);
        self.runs
            .splice(first..last, std::iter::once(Run { start, value }));
        self.merge_with_previous(first + 1);
        self.merge_with_previous(first);

        Some(start..end)
    }

    /// Set a single position to `value`.
    pub fn set_value_at(&mut self, position: usize, value: i32) -> bool {
        self.fill_range(position, value, 1).is_some()
    }

    /// Insert `length` positions before `position`.
    ///
    /// Inserted positions always hold 0: a non-zero run containing `position` is split around the
    /// new space, and an adjacent zero run is extended instead.
    pub fn insert_space(&mut self, position: usize, length: usize) {
        if length == 0 {
            return;
        }
        let position = position.min(self.length);

        if position == self.length {
            let last = self.runs[self.runs.len() - 1];
            if last.value != 0 && self.length > 0 {
                self.runs.push(Run { start: position, value: 0 });
            }
            self.length += length;
            return;
        }

        let index = self.run_index(position);
        let run = self.runs[index];
        let shift_from = if run.value == 0 {
            index + 1
        } else if run.start == position {
            if index > 0 && self.runs[index - 1].value == 0 {
                // Grow the zero run that ends here.
                index
            } else {
                self.runs.insert(index, Run { start: position, value: 0 });
                index + 1
            }
        } else {
            self.runs.insert(index + 1, Run { start: position, value: 0 });
            self.runs.insert(
                index + 2,
                Run {
                    start: position,
                    value: run.value,
                },
            );
            index + 2
        };

        for run in &mut self.runs[shift_from..] {
            run.start += length;
        }
        self.length += length;
    }

    /// Remove `[position, position + length)`, clamped to the end of the sequence.
    pub fn delete_range(&mut self, position: usize, length: usize) {
        let end = position.saturating_add(length).min(self.length);
        if position >= end {
            return;
        }

        let first = self.split_at(position);
        let last = self.split_at(end);
        self.runs.drain(first..last);

        let removed = end - position;
        for run in &mut self.runs[first..] {
            run.start -= removed;
        }
        self.length -= removed;

        if self.runs.is_empty() {
            self.runs.push(Run { start: 0, value: 0 });
        } else {
            self.merge_with_previous(first);
        }
    }

    /// Remove every position.
    pub fn delete_all(&mut self) {
        *self = Self::new();
    }

    /// Check if every position holds the same value.
    pub fn all_same(&self) -> bool {
        self.runs.len() == 1
    }

    /// Check if every position holds `value`.
    pub fn all_same_as(&self, value: i32) -> bool {
        self.all_same() && self.runs[0].value == value
    }

    /// First position at or after `start` that holds `value`.
    pub fn find(&self, value: i32, start: usize) -> Option<usize> {
        if start >= self.length {
            return None;
        }
        let index = self.run_index(start);
        if self.runs[index].value == value {
            return Some(start);
        }
        self.runs[index + 1..]
            .iter()
            .find(|run| run.value == value)
            .map(|run| run.start)
    }

    /// Next run boundary after `position`, capped at `end`.
    pub fn find_next_change(&self, position: usize, end: usize) -> usize {
        if position >= self.length {
            return end;
        }
        self.end_run(position).min(end)
    }

    /// Iterate runs as `(range, value)` pairs in position order.
    pub fn iter_runs(&self) -> impl Iterator<Item = (Range<usize>, i32)> + '_ {
        self.runs
            .iter()
            .enumerate()
            .map(|(index, run)| (run.start..self.run_end(index), run.value))
    }
}

impl Default for RunStyles {
    fn default() -> Self {
        Self::new()
    }
}
