//! Line markers (bookmarks, breakpoints, diff gutter marks, ...).
//!
//! Every marker instance gets a [`MarkerHandle`] when it is added. Line numbers change as the
//! document is edited; handles do not, so hosts keep the handle and ask
//! [`LineMarkers::line_from_handle`] where the marker is now.

use std::collections::HashMap;

use crate::per_line::PerLine;

/// Largest marker number. Marker numbers index bits of a `u32` mask.
pub const MARKER_MAX: u32 = 31;

/// Wildcard marker number for [`LineMarkers::delete_mark`].
pub const ALL_MARKERS: u32 = u32::MAX;

/// Stable identity of one marker instance.
///
/// Handles are allocated in increasing order and never reused, so a stale handle is never
/// mistaken for a newer marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(u32);

impl MarkerHandle {
    /// Rebuild a handle from [`raw`](Self::raw), e.g. after crossing an FFI boundary.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Numeric value of the handle.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One marker on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHandleNumber {
    /// Marker identity.
    pub handle: MarkerHandle,
    /// Marker number (`0..=MARKER_MAX`).
    pub number: u32,
}

/// Markers attached to a single line, most recently added first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerHandleSet {
    entries: Vec<MarkerHandleNumber>,
}

impl MarkerHandleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set has no markers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate markers, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerHandleNumber> {
        self.entries.iter()
    }

    /// OR of `1 << number` over all markers.
    pub fn mark_value(&self) -> u32 {
        self.entries.iter().fold(0, |mask, entry| {
            mask | 1u32.checked_shl(entry.number).unwrap_or(0)
        })
    }

    /// Check if `handle` is in this set.
    pub fn contains(&self, handle: MarkerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Add a marker.
    pub fn insert_handle(&mut self, handle: MarkerHandle, number: u32) {
        self.entries.insert(0, MarkerHandleNumber { handle, number });
    }

    /// Remove the marker with `handle`. Returns `false` if it was not here.
    pub fn remove_handle(&mut self, handle: MarkerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    /// Remove the first marker with `number`, or all of them when `all` is set.
    ///
    /// Returns the handles that were removed.
    pub fn remove_number(&mut self, number: u32, all: bool) -> Vec<MarkerHandle> {
        let mut removed = Vec::new();
        self.entries.retain(|entry| {
            if entry.number == number && (all || removed.is_empty()) {
                removed.push(entry.handle);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Move every marker of `other` into this set.
    pub fn combine_with(&mut self, other: MarkerHandleSet) {
        self.entries.extend(other.entries);
    }
}

/// Per-line marker sets plus a handle index.
#[derive(Debug, Clone, Default)]
pub struct LineMarkers {
    /// Empty until the first marker is added, then one slot per line.
    markers: Vec<Option<MarkerHandleSet>>,
    /// Where each live handle currently is.
    handle_lines: HashMap<MarkerHandle, usize>,
    handle_current: u32,
}

impl LineMarkers {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live markers.
    pub fn marker_count(&self) -> usize {
        self.handle_lines.len()
    }

    /// Markers on `line`.
    pub fn markers_on(&self, line: usize) -> Option<&MarkerHandleSet> {
        self.markers.get(line).and_then(Option::as_ref)
    }

    /// Add marker `number` to `line` of a document with `total_lines` lines.
    ///
    /// Returns `None` for a marker number above [`MARKER_MAX`] or a line outside the document.
    pub fn add_mark(&mut self, line: usize, number: u32, total_lines: usize) -> Option<MarkerHandle> {
        if number > MARKER_MAX {
            return None;
        }
        if self.markers.len() < total_lines {
            self.markers.resize_with(total_lines, || None);
        }
        let slot = self.markers.get_mut(line)?;
        let next = self.handle_current.checked_add(1)?;
        self.handle_current = next;
        let handle = MarkerHandle(next);

        slot.get_or_insert_with(MarkerHandleSet::new)
            .insert_handle(handle, number);
        self.handle_lines.insert(handle, line);
        tracing::trace!(line, number, handle = next, "added marker");
        Some(handle)
    }

    /// Remove marker `number` from `line`: the first match, or every match when `all` is set.
    ///
    /// [`ALL_MARKERS`] removes every marker on the line. Returns whether anything was removed.
    pub fn delete_mark(&mut self, line: usize, number: u32, all: bool) -> bool {
        let Some(slot) = self.markers.get_mut(line) else {
            return false;
        };
        let Some(set) = slot.as_mut() else {
            return false;
        };

        let removed: Vec<MarkerHandle> = if number == ALL_MARKERS {
            set.iter().map(|entry| entry.handle).collect()
        } else {
            set.remove_number(number, all)
        };
        if number == ALL_MARKERS || set.is_empty() {
            *slot = None;
        }

        for handle in &removed {
            self.handle_lines.remove(handle);
        }
        !removed.is_empty()
    }

    /// Remove the marker identified by `handle`, wherever it is now.
    pub fn delete_mark_from_handle(&mut self, handle: MarkerHandle) -> bool {
        let Some(line) = self.handle_lines.remove(&handle) else {
            return false;
        };
        let Some(slot) = self.markers.get_mut(line) else {
            return false;
        };
        let Some(set) = slot.as_mut().filter(|set| set.contains(handle)) else {
            return false;
        };
        set.remove_handle(handle);
        if set.is_empty() {
            *slot = None;
        }
        true
    }

    /// Current line of the marker identified by `handle`.
    pub fn line_from_handle(&self, handle: MarkerHandle) -> Option<usize> {
        self.handle_lines.get(&handle).copied()
    }

    /// Bitmask of marker numbers on `line`.
    pub fn mark_value(&self, line: usize) -> u32 {
        self.markers_on(line).map_or(0, MarkerHandleSet::mark_value)
    }

    /// First line at or after `line_start` carrying a marker in `mask`.
    pub fn marker_next(&self, line_start: usize, mask: u32) -> Option<usize> {
        self.markers
            .iter()
            .enumerate()
            .skip(line_start)
            .find(|(_, set)| {
                set.as_ref()
                    .is_some_and(|set| set.mark_value() & mask != 0)
            })
            .map(|(line, _)| line)
    }

    /// Handle of the `which`-th marker on `line`.
    pub fn handle_from_line(&self, line: usize, which: usize) -> Option<MarkerHandle> {
        self.markers_on(line)?
            .iter()
            .nth(which)
            .map(|entry| entry.handle)
    }

    /// Number of the `which`-th marker on `line`.
    pub fn number_from_line(&self, line: usize, which: usize) -> Option<u32> {
        self.markers_on(line)?
            .iter()
            .nth(which)
            .map(|entry| entry.number)
    }

    /// Move the markers of `line + 1` onto `line` (the two lines are being joined).
    pub fn merge_markers(&mut self, line: usize) {
        let Some(next) = line
            .checked_add(1)
            .and_then(|next_line| self.markers.get_mut(next_line))
            .and_then(Option::take)
        else {
            return;
        };
        for entry in next.iter() {
            self.handle_lines.insert(entry.handle, line);
        }
        self.markers[line]
            .get_or_insert_with(MarkerHandleSet::new)
            .combine_with(next);
    }
}

impl PerLine for LineMarkers {
    fn init(&mut self) {
        // Handles keep counting up across reloads.
        self.markers.clear();
        self.handle_lines.clear();
    }

    fn insert_line(&mut self, line: usize) {
        if self.markers.is_empty() {
            return;
        }
        let line = line.min(self.markers.len());
        self.markers.insert(line, None);
        for marker_line in self.handle_lines.values_mut() {
            if *marker_line >= line {
                *marker_line += 1;
            }
        }
    }

    fn remove_line(&mut self, line: usize) {
        if line >= self.markers.len() {
            return;
        }
        if line > 0 {
            self.merge_markers(line - 1);
        } else if let Some(set) = self.markers[0].take() {
            for entry in set.iter() {
                self.handle_lines.remove(&entry.handle);
            }
        }
        self.markers.remove(line);
        for marker_line in self.handle_lines.values_mut() {
            if *marker_line > line {
                *marker_line -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_never_reused() {
        let mut markers = LineMarkers::new();
        let first = markers.add_mark(0, 1, 5).unwrap();
        assert!(markers.delete_mark_from_handle(first));
        let second = markers.add_mark(0, 1, 5).unwrap();
        assert!(second.raw() > first.raw());
        assert_eq!(markers.line_from_handle(first), None);
    }

    #[test]
    fn test_add_mark_rejects_bad_input() {
        let mut markers = LineMarkers::new();
        assert_eq!(markers.add_mark(0, MARKER_MAX + 1, 5), None);
        assert_eq!(markers.add_mark(5, 0, 5), None);
        assert_eq!(markers.marker_count(), 0);
    }

    #[test]
    fn test_mark_value_and_delete_single() {
        let mut markers = LineMarkers::new();
        markers.add_mark(2, 1, 4);
        markers.add_mark(2, 1, 4);
        markers.add_mark(2, 3, 4);
        assert_eq!(markers.mark_value(2), 0b1010);

        assert!(markers.delete_mark(2, 1, false));
        assert_eq!(markers.mark_value(2), 0b1010);
        assert!(markers.delete_mark(2, 1, false));
        assert_eq!(markers.mark_value(2), 0b1000);
        assert!(!markers.delete_mark(2, 1, true));
        assert_eq!(markers.marker_count(), 1);
    }

    #[test]
    fn test_handle_and_number_from_line() {
        let mut markers = LineMarkers::new();
        let a = markers.add_mark(1, 4, 3).unwrap();
        let b = markers.add_mark(1, 7, 3).unwrap();

        assert_eq!(markers.handle_from_line(1, 0), Some(b));
        assert_eq!(markers.handle_from_line(1, 1), Some(a));
        assert_eq!(markers.number_from_line(1, 1), Some(4));
        assert_eq!(markers.number_from_line(1, 2), None);
        assert_eq!(markers.handle_from_line(0, 0), None);
    }

    #[test]
    fn test_insert_before_allocation_is_noop() {
        let mut markers = LineMarkers::new();
        markers.insert_line(0);
        markers.remove_line(0);
        let handle = markers.add_mark(1, 0, 2).unwrap();
        assert_eq!(markers.line_from_handle(handle), Some(1));
    }

    #[test]
    fn test_remove_first_line_drops_its_markers() {
        let mut markers = LineMarkers::new();
        let gone = markers.add_mark(0, 0, 3).unwrap();
        let kept = markers.add_mark(2, 0, 3).unwrap();

        markers.remove_line(0);
        assert_eq!(markers.line_from_handle(gone), None);
        assert_eq!(markers.line_from_handle(kept), Some(1));
        assert_eq!(markers.marker_count(), 1);
    }

    #[test]
    fn test_init_keeps_counting_handles() {
        let mut markers = LineMarkers::new();
        let before = markers.add_mark(0, 0, 1).unwrap();
        markers.init();
        assert_eq!(markers.marker_count(), 0);
        let after = markers.add_mark(0, 0, 1).unwrap();
        assert!(after > before);
    }

    #[test]
    fn test_merge_past_last_line_is_noop() {
        let mut markers = LineMarkers::new();
        let handle = markers.add_mark(1, 3, 2).unwrap();
        markers.merge_markers(usize::MAX);
        markers.merge_markers(1);
        assert_eq!(markers.line_from_handle(handle), Some(1));
        assert_eq!(markers.mark_value(1), 1 << 3);
    }

    #[test]
    fn test_set_contains_tracks_membership() {
        let mut markers = LineMarkers::new();
        let kept = markers.add_mark(0, 1, 1).unwrap();
        let removed = markers.add_mark(0, 2, 1).unwrap();
        assert!(markers.delete_mark_from_handle(removed));

        let set = markers.markers_on(0).unwrap();
        assert!(set.contains(kept));
        assert!(!set.contains(removed));
    }
}
