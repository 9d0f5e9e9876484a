//! Visible range of mounted items

use std::ops::Range;

/// Half-open range `[start, end)` of item indices that are mounted.
///
/// # Invariants
/// - `start <= end`
/// - `end <= item_count` for the collection it was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first mounted item (inclusive).
    pub start: usize,
    /// Index one past the last mounted item (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if start > end.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {} > end {}", start, end);
        Self { start, end }
    }

    /// Number of mounted items.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over mounted indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a specific index is mounted.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Clamps a previous range into a collection of `item_count` items.
    ///
    /// `start` is pulled down to the last valid index and `end` is kept at
    /// least one past `start`, never beyond `item_count`.
    ///
    /// ```
    /// # use winlist::virtual_list::visible_range::VisibleRange;
    /// let clamped = VisibleRange::new(30, 40).clamp_to(10);
    /// assert_eq!(clamped, VisibleRange::new(9, 10));
    ///
    /// assert_eq!(VisibleRange::new(3, 7).clamp_to(0), VisibleRange::new(0, 0));
    /// ```
    pub fn clamp_to(&self, item_count: usize) -> Self {
        let start = self.start.min(item_count.max(1) - 1);
        let end = self.end.max(start + 1).min(item_count);
        Self::new(start.min(end), end)
    }
}
