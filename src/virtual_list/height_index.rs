//! HeightIndex - O(log n) point updates and prefix sums via Fenwick tree
//!
//! Incremental alternative to [`OffsetIndex`](super::offset_index::OffsetIndex):
//! a size correction touches O(log n) tree nodes instead of rebuilding the
//! whole suffix of the offset array.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `offset`: O(log n)
//! - `floor_index`: O(log² n)
//! - `rebuild`: O(n log n)
//! - `len`: O(1)

use super::offset_index::OffsetLookup;

/// Fenwick-backed cumulative size index.
///
/// The tree is always sized to exactly `len()` items. Growing a Fenwick tree
/// in place would leave the new upper nodes missing the sums of older
/// entries, so count changes go through [`HeightIndex::rebuild`].
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (0-indexed API over `fenwick::array`)
    tree: Vec<i64>,
    /// Current size of each item, for delta computation
    sizes: Vec<u32>,
}

impl HeightIndex {
    /// Creates an index over the given sizes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winlist::virtual_list::height_index::HeightIndex;
    /// # use winlist::virtual_list::offset_index::OffsetLookup;
    /// let index = HeightIndex::from_sizes(&[3, 4, 5]);
    /// assert_eq!(index.offset(0), 0);
    /// assert_eq!(index.offset(2), 7);
    /// assert_eq!(index.total(), 12);
    /// ```
    pub fn from_sizes(sizes: &[u32]) -> Self {
        let mut index = Self::default();
        index.rebuild(sizes);
        index
    }

    /// Replaces every entry, resizing the tree to `sizes.len()`.
    pub fn rebuild(&mut self, sizes: &[u32]) {
        self.tree.clear();
        self.tree.resize(sizes.len(), 0);
        self.sizes.clear();
        self.sizes.extend_from_slice(sizes);
        for (index, &size) in sizes.iter().enumerate() {
            if size != 0 {
                fenwick::array::update(&mut self.tree, index, i64::from(size));
            }
        }
    }

    /// Sets the size of one item.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winlist::virtual_list::height_index::HeightIndex;
    /// # use winlist::virtual_list::offset_index::OffsetLookup;
    /// let mut index = HeightIndex::from_sizes(&[5, 5]);
    /// index.set(0, 10);
    /// assert_eq!(index.offset(1), 10);
    /// assert_eq!(index.total(), 15);
    /// ```
    pub fn set(&mut self, index: usize, size: u32) {
        assert!(
            index < self.sizes.len(),
            "index {} out of bounds (len: {})",
            index,
            self.sizes.len()
        );

        let delta = i64::from(size) - i64::from(self.sizes[index]);
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
            self.sizes[index] = size;
        }
    }

    /// Sum of sizes `[0, index]`, inclusive.
    fn prefix_sum(&self, index: usize) -> u64 {
        let sum: i64 = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as u64
    }
}

impl OffsetLookup for HeightIndex {
    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn offset(&self, index: usize) -> u64 {
        assert!(
            index <= self.sizes.len(),
            "boundary {} out of bounds (len: {})",
            index,
            self.sizes.len()
        );
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    fn floor_index(&self, target: u64) -> usize {
        // Rightmost boundary whose offset does not exceed target
        let mut left = 0;
        let mut right = self.sizes.len();

        while left < right {
            let mid = left + (right - left).div_ceil(2);
            if self.offset(mid) <= target {
                left = mid;
            } else {
                right = mid - 1;
            }
        }

        left
    }

    fn size(&self, index: usize) -> u32 {
        self.sizes[index]
    }
}
