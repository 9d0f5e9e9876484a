//! OffsetIndex - dense cumulative offsets rebuilt in one linear pass
//!
//! `offsets[0] == 0` and `offsets[i + 1] == offsets[i] + size(i)`, so the
//! array always holds one more entry than there are items. The last entry
//! is the total extent of the list.

/// Read access shared by the dense and Fenwick-backed offset indexes.
///
/// Offsets are addressed by *boundary*: `offset(i)` is the start of item
/// `i`, and `offset(len())` is the total extent.
pub trait OffsetLookup {
    /// Number of items covered by the index.
    fn len(&self) -> usize;

    /// Start offset of item `index`; `index == len()` yields the total.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    fn offset(&self, index: usize) -> u64;

    /// Rightmost boundary `i` in `0..=len()` with `offset(i) <= target`.
    fn floor_index(&self, target: u64) -> usize;

    /// Returns true if the index covers no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total extent of all items.
    fn total(&self) -> u64 {
        self.offset(self.len())
    }

    /// Recorded size of item `index`.
    fn size(&self, index: usize) -> u32 {
        (self.offset(index + 1) - self.offset(index)) as u32
    }
}

/// Dense prefix-sum array over item sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetIndex {
    offsets: Vec<u64>,
}

impl OffsetIndex {
    /// Builds the index for `count` items.
    ///
    /// `size_of` returns the recorded size for an index, or `None` when the
    /// item has no recorded size, in which case `estimate` is used.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winlist::virtual_list::offset_index::{OffsetIndex, OffsetLookup};
    /// let index = OffsetIndex::build(3, |i| if i == 1 { Some(50) } else { None }, 10);
    /// assert_eq!(index.offsets(), &[0, 10, 60, 70]);
    /// assert_eq!(index.total(), 70);
    ///
    /// let empty = OffsetIndex::build(0, |_| None, 10);
    /// assert_eq!(empty.offsets(), &[0]);
    /// ```
    pub fn build(count: usize, size_of: impl Fn(usize) -> Option<u32>, estimate: u32) -> Self {
        let mut offsets = Vec::with_capacity(count + 1);
        let mut running = 0u64;
        offsets.push(running);
        for index in 0..count {
            running += u64::from(size_of(index).unwrap_or(estimate));
            offsets.push(running);
        }
        Self { offsets }
    }

    /// Builds the index directly from a size slice.
    pub fn from_sizes(sizes: &[u32]) -> Self {
        Self::build(sizes.len(), |i| Some(sizes[i]), 0)
    }

    /// The raw boundary offsets, `len() + 1` entries.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}

impl Default for OffsetIndex {
    fn default() -> Self {
        Self { offsets: vec![0] }
    }
}

impl OffsetLookup for OffsetIndex {
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn offset(&self, index: usize) -> u64 {
        self.offsets[index]
    }

    fn floor_index(&self, target: u64) -> usize {
        // offsets[0] == 0 <= target, so the partition point is at least 1
        self.offsets
            .partition_point(|&offset| offset <= target)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_index_has_single_zero_entry() {
        let index = OffsetIndex::build(0, |_| None, 240);
        assert_eq!(index.offsets(), &[0]);
        assert_eq!(index.total(), 0);
        assert!(index.is_empty());
        assert_eq!(index.floor_index(0), 0);
        assert_eq!(index.floor_index(1_000), 0);
    }

    #[test]
    fn uniform_estimate() {
        let index = OffsetIndex::build(4, |_| None, 240);
        assert_eq!(index.offsets(), &[0, 240, 480, 720, 960]);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn measured_sizes_override_estimate() {
        let index = OffsetIndex::build(3, |i| (i == 0).then_some(5), 10);
        assert_eq!(index.offsets(), &[0, 5, 15, 25]);
        assert_eq!(index.size(0), 5);
        assert_eq!(index.size(2), 10);
    }

    #[test]
    fn floor_index_picks_rightmost_not_exceeding() {
        let index = OffsetIndex::from_sizes(&[10, 20, 15]);
        // [0..10) [10..30) [30..45)
        assert_eq!(index.floor_index(0), 0);
        assert_eq!(index.floor_index(9), 0);
        assert_eq!(index.floor_index(10), 1);
        assert_eq!(index.floor_index(29), 1);
        assert_eq!(index.floor_index(30), 2);
        assert_eq!(index.floor_index(45), 3);
        assert_eq!(index.floor_index(1_000), 3);
    }

    #[test]
    fn floor_index_skips_past_zero_sized_items() {
        // Items 1 and 2 are empty; boundaries 1, 2 and 3 all sit at 10.
        let index = OffsetIndex::from_sizes(&[10, 0, 0, 5]);
        assert_eq!(index.floor_index(10), 3);
        assert_eq!(index.floor_index(9), 0);
    }

    proptest! {
        /// Consecutive differences equal the recorded sizes.
        #[test]
        fn prop_differences_equal_sizes(sizes in prop::collection::vec(0u32..=500, 0..80)) {
            let index = OffsetIndex::from_sizes(&sizes);
            prop_assert_eq!(index.offsets().len(), sizes.len() + 1);
            prop_assert_eq!(index.offset(0), 0);
            for (i, &size) in sizes.iter().enumerate() {
                prop_assert_eq!(index.offset(i + 1) - index.offset(i), u64::from(size));
            }
        }

        /// floor_index agrees with a linear scan.
        #[test]
        fn prop_floor_matches_linear_scan(
            sizes in prop::collection::vec(0u32..=50, 0..60),
            target in 0u64..4_000,
        ) {
            let index = OffsetIndex::from_sizes(&sizes);
            let expected = index
                .offsets()
                .iter()
                .rposition(|&offset| offset <= target)
                .unwrap_or(0);
            prop_assert_eq!(index.floor_index(target), expected);
        }
    }
}
