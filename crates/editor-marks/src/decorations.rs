//! Indicator decorations.
//!
//! An indicator is an integer-keyed channel of per-position values (search matches, spelling
//! squiggles, IME composition, ...). Each indicator that currently holds any non-zero value owns a
//! [`Decoration`]; indicators without one read as 0 everywhere, so unused indicators cost nothing.
//!
//! [`DecorationList`] keeps the decorations sorted by indicator id and in step with the document
//! length as the host reports insertions and deletions.

use std::ops::Range;

use crate::run_styles::RunStyles;

/// First indicator reserved for IME composition.
///
/// [`DecorationList::all_on_for`] only reports indicators below this value.
pub const INDICATOR_IME: u32 = 32;
/// Largest valid indicator id, the last IME indicator.
pub const INDICATOR_MAX: u32 = 35;

/// Per-position values for one indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    indicator: u32,
    runs: RunStyles,
}

impl Decoration {
    /// Create a decoration of `length` positions, all 0.
    pub fn new(indicator: u32, length: usize) -> Self {
        Self {
            indicator,
            runs: RunStyles::with_length(length),
        }
    }

    /// Indicator id this decoration stores.
    pub fn indicator(&self) -> u32 {
        self.indicator
    }

    /// Underlying run encoding.
    pub fn runs(&self) -> &RunStyles {
        &self.runs
    }

    /// Check if every position is 0 (nothing worth keeping).
    pub fn is_empty(&self) -> bool {
        self.runs.all_same_as(0)
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Value at `position`.
    pub fn value_at(&self, position: usize) -> i32 {
        self.runs.value_at(position)
    }

    /// Start of the run containing `position`.
    pub fn start_run(&self, position: usize) -> usize {
        self.runs.start_run(position)
    }

    /// End (exclusive) of the run containing `position`.
    pub fn end_run(&self, position: usize) -> usize {
        self.runs.end_run(position)
    }
}

/// All decorations of a document, ordered by indicator id.
#[derive(Debug, Clone)]
pub struct DecorationList {
    /// Sorted by indicator, at most one entry per indicator, none of them empty.
    decorations: Vec<Decoration>,
    current_indicator: u32,
    current_value: i32,
    /// Index of the current indicator's decoration; cleared on every structural change.
    current: Option<usize>,
    length_document: usize,
    click_notified: bool,
}

impl DecorationList {
    /// Create a decoration list for an empty document.
    pub fn new() -> Self {
        Self::with_length(0)
    }

    /// Create a decoration list for a document of `length` positions.
    pub fn with_length(length: usize) -> Self {
        Self {
            decorations: Vec::new(),
            current_indicator: 0,
            current_value: 1,
            current: None,
            length_document: length,
            click_notified: false,
        }
    }

    /// Document length this list tracks.
    pub fn len(&self) -> usize {
        self.length_document
    }

    /// Check if the tracked document is empty.
    pub fn is_empty(&self) -> bool {
        self.length_document == 0
    }

    /// Number of stored decorations.
    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    /// Iterate decorations in ascending indicator order.
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations.iter()
    }

    /// Indicators that currently hold data, ascending.
    pub fn indicators(&self) -> Vec<u32> {
        self.decorations.iter().map(Decoration::indicator).collect()
    }

    fn position_of(&self, indicator: u32) -> Result<usize, usize> {
        self.decorations
            .binary_search_by_key(&indicator, Decoration::indicator)
    }

    /// Decoration for `indicator`, if it holds any data.
    pub fn decoration_from_indicator(&self, indicator: u32) -> Option<&Decoration> {
        self.position_of(indicator)
            .ok()
            .map(|index| &self.decorations[index])
    }

    fn insert_decoration(&mut self, indicator: u32, length: usize) -> usize {
        let index = match self.position_of(indicator) {
            Ok(index) => {
                self.decorations[index] = Decoration::new(indicator, length);
                index
            }
            Err(index) => {
                self.decorations
                    .insert(index, Decoration::new(indicator, length));
                index
            }
        };
        tracing::trace!(indicator, length, "created decoration");
        self.current_indicator = indicator;
        self.current = Some(index);
        index
    }

    /// Create an all-zero decoration for `indicator` and make it current.
    ///
    /// An existing decoration for the same indicator is replaced.
    pub fn create(&mut self, indicator: u32, length: usize) -> &mut Decoration {
        let index = self.insert_decoration(indicator, length);
        &mut self.decorations[index]
    }

    /// Remove the decoration for `indicator`. Returns `false` if there was none.
    pub fn delete(&mut self, indicator: u32) -> bool {
        let Ok(index) = self.position_of(indicator) else {
            return false;
        };
        self.decorations.remove(index);
        self.current = None;
        tracing::trace!(indicator, "deleted decoration");
        true
    }

    /// Indicator used by [`fill_range`](Self::fill_range).
    pub fn current_indicator(&self) -> u32 {
        self.current_indicator
    }

    /// Select the indicator used by subsequent fills and reset the current value to 1.
    pub fn set_current_indicator(&mut self, indicator: u32) {
        self.current_indicator = indicator;
        self.current = self.position_of(indicator).ok();
        self.current_value = 1;
    }

    /// Value used by [`fill_current`](Self::fill_current).
    pub fn current_value(&self) -> i32 {
        self.current_value
    }

    /// Set the value used by [`fill_current`](Self::fill_current). 0 is stored as 1, since 0
    /// means "no decoration".
    pub fn set_current_value(&mut self, value: i32) {
        self.current_value = if value == 0 { 1 } else { value };
    }

    /// Set `[position, position + length)` of the current indicator to `value`.
    ///
    /// The decoration is created on demand and removed again if the fill leaves it all zero.
    /// Returns the range that actually changed, trimmed as described on
    /// [`RunStyles::fill_range`].
    pub fn fill_range(&mut self, position: usize, value: i32, length: usize) -> Option<Range<usize>> {
        let index = match self.current {
            Some(index) => index,
            None => match self.position_of(self.current_indicator) {
                Ok(index) => index,
                Err(_) => self.insert_decoration(self.current_indicator, self.length_document),
            },
        };
        self.current = Some(index);

        let decoration = &mut self.decorations[index];
        let changed = decoration.runs.fill_range(position, value, length);
        if decoration.is_empty() {
            self.delete(self.current_indicator);
        }
        changed
    }

    /// Fill with the current value.
    pub fn fill_current(&mut self, position: usize, length: usize) -> Option<Range<usize>> {
        self.fill_range(position, self.current_value, length)
    }

    /// Reset `[position, position + length)` of the current indicator to 0.
    ///
    /// Unlike a zero [`fill_range`](Self::fill_range), this never creates a decoration.
    pub fn clear_range(&mut self, position: usize, length: usize) -> Option<Range<usize>> {
        if self.position_of(self.current_indicator).is_err() {
            return None;
        }
        self.fill_range(position, 0, length)
    }

    /// Insert `length` zero positions before `position` in every decoration.
    pub fn insert_space(&mut self, position: usize, length: usize) {
        let position = position.min(self.length_document);
        let at_end = position == self.length_document;
        self.length_document += length;
        for decoration in &mut self.decorations {
            decoration.runs.insert_space(position, length);
            if at_end {
                // The tail must be an explicit zero run reaching the new length.
                decoration.runs.fill_range(position, 0, length);
            }
        }
    }

    /// Remove `[position, position + length)` from every decoration and prune empty ones.
    pub fn delete_range(&mut self, position: usize, length: usize) {
        let end = position.saturating_add(length).min(self.length_document);
        if position >= end {
            return;
        }
        let removed = end - position;
        self.length_document -= removed;
        for decoration in &mut self.decorations {
            decoration.runs.delete_range(position, removed);
        }
        self.delete_any_empty();
    }

    fn delete_any_empty(&mut self) {
        let before = self.decorations.len();
        let length_document = self.length_document;
        self.decorations
            .retain(|decoration| length_document != 0 && !decoration.is_empty());
        if self.decorations.len() != before {
            self.current = None;
            tracing::trace!(
                pruned = before - self.decorations.len(),
                "pruned empty decorations"
            );
        }
    }

    /// Drop every decoration and track a document of `length` positions.
    pub fn reset(&mut self, length: usize) {
        self.decorations.clear();
        self.current = None;
        self.length_document = length;
    }

    /// Bitmask with bit `i` set when indicator `i` is non-zero at `position`.
    ///
    /// IME indicators (`>= INDICATOR_IME`) are never reported.
    pub fn all_on_for(&self, position: usize) -> u32 {
        self.decorations
            .iter()
            .filter(|decoration| decoration.indicator < INDICATOR_IME)
            .filter(|decoration| decoration.value_at(position) != 0)
            .fold(0, |mask, decoration| mask | (1 << decoration.indicator))
    }

    /// Value of `indicator` at `position` (0 when the indicator has no data).
    pub fn value_at(&self, indicator: u32, position: usize) -> i32 {
        self.decoration_from_indicator(indicator)
            .map_or(0, |decoration| decoration.value_at(position))
    }

    /// Start of the `indicator` run containing `position` (0 when the indicator has no data).
    pub fn start(&self, indicator: u32, position: usize) -> usize {
        self.decoration_from_indicator(indicator)
            .map_or(0, |decoration| decoration.start_run(position))
    }

    /// End of the `indicator` run containing `position` (0 when the indicator has no data).
    pub fn end(&self, indicator: u32, position: usize) -> usize {
        self.decoration_from_indicator(indicator)
            .map_or(0, |decoration| decoration.end_run(position))
    }

    /// Whether the host already reported a click on an indicator.
    pub fn click_notified(&self) -> bool {
        self.click_notified
    }

    /// Record whether the host reported a click on an indicator.
    pub fn set_click_notified(&mut self, notified: bool) {
        self.click_notified = notified;
    }
}

impl Default for DecorationList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_keeps_indicator_order() {
        let mut list = DecorationList::with_length(10);
        list.create(9, 10);
        list.create(2, 10);
        list.create(5, 10);

        assert_eq!(list.indicators(), vec![2, 5, 9]);
        assert_eq!(list.current_indicator(), 5);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut list = DecorationList::with_length(10);
        assert!(!list.delete(3));
        list.create(3, 10);
        assert!(list.delete(3));
        assert!(list.decoration_from_indicator(3).is_none());
    }

    #[test]
    fn test_fill_range_creates_lazily() {
        let mut list = DecorationList::with_length(20);
        list.set_current_indicator(4);
        assert!(list.decoration_from_indicator(4).is_none());

        assert_eq!(list.fill_range(3, 2, 4), Some(3..7));
        let decoration = list.decoration_from_indicator(4).unwrap();
        assert_eq!(decoration.len(), 20);
        assert_eq!(decoration.value_at(5), 2);
    }

    #[test]
    fn test_cached_current_survives_other_creates() {
        let mut list = DecorationList::with_length(20);
        list.set_current_indicator(6);
        list.fill_range(0, 1, 2);

        // Inserting indicator 1 before 6 shifts storage; the cache must follow.
        list.create(1, 20);
        list.set_current_indicator(6);
        list.fill_range(10, 3, 2);

        assert_eq!(list.value_at(6, 0), 1);
        assert_eq!(list.value_at(6, 10), 3);
        assert_eq!(list.value_at(1, 10), 0);
    }

    #[test]
    fn test_clear_range_does_not_create() {
        let mut list = DecorationList::with_length(20);
        list.set_current_indicator(2);
        assert_eq!(list.clear_range(0, 5), None);
        assert_eq!(list.decoration_count(), 0);
    }

    #[test]
    fn test_fill_current_uses_current_value() {
        let mut list = DecorationList::with_length(20);
        list.set_current_indicator(1);
        list.set_current_value(9);
        list.fill_current(0, 3);
        assert_eq!(list.value_at(1, 2), 9);

        // Selecting an indicator resets the value.
        list.set_current_indicator(2);
        assert_eq!(list.current_value(), 1);
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut list = DecorationList::with_length(20);
        list.set_current_indicator(1);
        list.fill_range(0, 1, 5);
        list.reset(7);
        assert_eq!(list.decoration_count(), 0);
        assert_eq!(list.len(), 7);

        list.fill_range(0, 1, 3);
        assert_eq!(list.decoration_from_indicator(1).unwrap().len(), 7);
    }

    #[test]
    fn test_click_notified_flag() {
        let mut list = DecorationList::new();
        assert!(!list.click_notified());
        list.set_click_notified(true);
        assert!(list.click_notified());
    }
}
