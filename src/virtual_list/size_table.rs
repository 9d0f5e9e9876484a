//! SizeTable - per-item recorded sizes keyed by logical item key
//!
//! Sizes are stored positionally for the current collection and carried
//! across collection changes by key, so a reordered item keeps its measured
//! size. With positional keys (`K = usize` from the index) this reduces to
//! carrying sizes forward by index.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Recorded sizes for the current item collection.
///
/// # Invariants
/// - `keys.len() == sizes.len() == measured.len()`
/// - `version` never decreases
#[derive(Debug, Clone)]
pub struct SizeTable<K> {
    estimate: u32,
    keys: Vec<K>,
    sizes: Vec<u32>,
    measured: Vec<bool>,
    version: u64,
    /// Indices corrected since the last `take_dirty`
    dirty: Vec<usize>,
}

impl<K> SizeTable<K>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty table with the given default estimate.
    pub fn new(estimate: u32) -> Self {
        Self {
            estimate,
            keys: Vec::new(),
            sizes: Vec::new(),
            measured: Vec::new(),
            version: 0,
            dirty: Vec::new(),
        }
    }

    /// Reseeds the table for a new collection.
    ///
    /// Keys seen in the previous collection keep their recorded size;
    /// unseen keys get the estimate. Sizes of keys no longer present are
    /// dropped. Bumps the version.
    ///
    /// Keys are expected to be unique. When a collection repeats a key,
    /// every item with that key starts from the size recorded for its first
    /// occurrence, and the repeat is logged at debug.
    ///
    /// # Examples
    ///
    /// ```
    /// # use winlist::virtual_list::size_table::SizeTable;
    /// let mut table = SizeTable::new(10);
    /// table.reseed(vec!["a", "b"]);
    /// table.correct(1, 40, 1);
    ///
    /// table.reseed(vec!["b", "c", "a"]);
    /// assert_eq!(table.sizes(), &[40, 10, 10]);
    /// ```
    pub fn reseed(&mut self, keys: Vec<K>) {
        let mut previous: HashMap<K, (u32, bool)> = HashMap::with_capacity(self.keys.len());
        for ((key, &size), &measured) in self
            .keys
            .drain(..)
            .zip(self.sizes.iter())
            .zip(self.measured.iter())
        {
            previous.entry(key).or_insert((size, measured));
        }

        self.sizes.clear();
        self.measured.clear();
        let mut seen = HashSet::with_capacity(keys.len());
        let mut duplicates = 0usize;
        for key in &keys {
            if !seen.insert(key) {
                duplicates += 1;
            }
            let (size, measured) = previous
                .get(key)
                .copied()
                .unwrap_or((self.estimate, false));
            self.sizes.push(size);
            self.measured.push(measured);
        }
        if duplicates > 0 {
            debug!(duplicates, "item keys repeat; repeated keys share one recorded size");
        }
        self.keys = keys;
        self.dirty.clear();
        self.version += 1;
    }

    /// Applies a measured size if it differs from the recorded one by more
    /// than `threshold`. Returns whether the table changed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn correct(&mut self, index: usize, measured: u32, threshold: u32) -> bool {
        let recorded = self.sizes[index];
        if recorded.abs_diff(measured) <= threshold {
            // Still counts as observed, so later reseeds keep it
            self.measured[index] = true;
            return false;
        }

        self.sizes[index] = measured;
        self.measured[index] = true;
        self.dirty.push(index);
        self.version += 1;
        true
    }

    /// Recorded size of item `index`.
    pub fn size(&self, index: usize) -> u32 {
        self.sizes[index]
    }

    /// Recorded sizes, positionally.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Key of item `index`.
    pub fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    /// Whether item `index` has been measured at least once.
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured[index]
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if the table holds no items.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Monotonic change counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Default size for unmeasured items.
    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Drains the indices corrected since the last call.
    pub fn take_dirty(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reseed_assigns_estimate_to_new_items() {
        let mut table: SizeTable<usize> = SizeTable::new(240);
        table.reseed((0..3).collect());
        assert_eq!(table.sizes(), &[240, 240, 240]);
        assert!(!table.is_measured(0));
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn repeated_key_carries_first_occurrence_size() {
        let mut table = SizeTable::new(10);
        table.reseed(vec!["a", "b", "a"]);
        table.correct(0, 40, 1);
        table.correct(2, 25, 1);

        table.reseed(vec!["a", "b", "a"]);
        assert_eq!(table.sizes(), &[40, 10, 40]);
        assert!(table.is_measured(2));
    }

    #[test]
    fn positional_keys_carry_forward_by_index() {
        let mut table: SizeTable<usize> = SizeTable::new(240);
        table.reseed((0..4).collect());
        table.correct(1, 300, 1);
        table.correct(3, 100, 1);

        table.reseed((0..6).collect());
        assert_eq!(table.sizes(), &[240, 300, 240, 100, 240, 240]);

        table.reseed((0..2).collect());
        assert_eq!(table.sizes(), &[240, 300]);
    }

    #[test]
    fn removed_keys_are_discarded() {
        let mut table = SizeTable::new(10);
        table.reseed(vec![1u64, 2, 3]);
        table.correct(2, 99, 1);

        table.reseed(vec![1, 2]);
        table.reseed(vec![1, 2, 3]);
        assert_eq!(table.size(2), 10, "key 3 was dropped and reseeded fresh");
    }

    #[test]
    fn correct_within_threshold_is_ignored() {
        let mut table: SizeTable<usize> = SizeTable::new(240);
        table.reseed(vec![0]);
        let version = table.version();

        assert!(!table.correct(0, 241, 1));
        assert!(!table.correct(0, 239, 1));
        assert_eq!(table.size(0), 240);
        assert_eq!(table.version(), version);
        assert!(table.is_measured(0));
    }

    #[test]
    fn correct_beyond_threshold_bumps_version_and_marks_dirty() {
        let mut table: SizeTable<usize> = SizeTable::new(240);
        table.reseed(vec![0, 1]);
        let version = table.version();

        assert!(table.correct(1, 400, 1));
        assert_eq!(table.size(1), 400);
        assert_eq!(table.version(), version + 1);
        assert_eq!(table.take_dirty(), vec![1]);
        assert!(table.take_dirty().is_empty());
    }

    #[test]
    fn repeated_identical_correction_applies_once() {
        let mut table: SizeTable<usize> = SizeTable::new(240);
        table.reseed(vec![0]);
        assert!(table.correct(0, 400, 1));
        assert!(!table.correct(0, 400, 1));
        assert_eq!(table.take_dirty(), vec![0]);
    }

    #[test]
    fn zero_threshold_accepts_single_unit_changes() {
        let mut table: SizeTable<usize> = SizeTable::new(3);
        table.reseed(vec![0]);
        assert!(table.correct(0, 4, 0));
    }
}
