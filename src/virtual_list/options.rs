//! Virtualizer construction options

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Default estimated item size, in units.
pub const DEFAULT_ESTIMATE_SIZE: u32 = 240;

/// Default number of items mounted beyond each viewport edge.
pub const DEFAULT_OVERSCAN: usize = 6;

/// Default tolerance below which a measurement is ignored.
pub const DEFAULT_REMEASURE_THRESHOLD: u32 = 1;

/// How cumulative offsets are maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStrategy {
    /// Dense prefix array rebuilt whenever the size table version changes.
    #[default]
    Dense,
    /// Fenwick tree updated in place for each corrected item.
    Fenwick,
}

impl fmt::Display for IndexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStrategy::Dense => f.write_str("dense"),
            IndexStrategy::Fenwick => f.write_str("fenwick"),
        }
    }
}

/// Error returned when parsing an unknown [`IndexStrategy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown index strategy {0:?} (expected \"dense\" or \"fenwick\")")]
pub struct UnknownStrategy(pub String);

impl FromStr for IndexStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(IndexStrategy::Dense),
            "fenwick" => Ok(IndexStrategy::Fenwick),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Key extraction function: `(item, index) -> key`.
pub type KeyFn<T, K> = Box<dyn Fn(&T, usize) -> K>;

/// Configuration for a [`Virtualizer`](super::Virtualizer).
///
/// Built with [`VirtualListOptions::new`], which keys items by position.
/// Collections that reorder should install a stable key with
/// [`with_key`](VirtualListOptions::with_key); positional keys
/// misattribute measured sizes after a reorder.
pub struct VirtualListOptions<T, K = usize> {
    /// Size assumed for items that have not been measured.
    pub estimate_size: u32,
    /// Items mounted beyond each viewport edge.
    pub overscan: usize,
    /// Measurements within this distance of the recorded size are ignored.
    pub remeasure_threshold: u32,
    /// Offset maintenance strategy.
    pub index_strategy: IndexStrategy,
    key_fn: KeyFn<T, K>,
    positional_keys: bool,
}

impl<T> VirtualListOptions<T, usize> {
    /// Options with default sizes and positional keys.
    pub fn new() -> Self {
        Self {
            estimate_size: DEFAULT_ESTIMATE_SIZE,
            overscan: DEFAULT_OVERSCAN,
            remeasure_threshold: DEFAULT_REMEASURE_THRESHOLD,
            index_strategy: IndexStrategy::default(),
            key_fn: Box::new(|_, index| index),
            positional_keys: true,
        }
    }
}

impl<T> Default for VirtualListOptions<T, usize> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> VirtualListOptions<T, K> {
    /// Replaces the key function, changing the key type.
    ///
    /// ```
    /// # use winlist::virtual_list::VirtualListOptions;
    /// struct Post { id: u64 }
    /// let options = VirtualListOptions::<Post>::new().with_key(|post, _| post.id);
    /// assert!(!options.has_positional_keys());
    /// assert_eq!(options.key_of(&Post { id: 7 }, 0), 7);
    /// ```
    pub fn with_key<K2>(self, key_fn: impl Fn(&T, usize) -> K2 + 'static) -> VirtualListOptions<T, K2> {
        VirtualListOptions {
            estimate_size: self.estimate_size,
            overscan: self.overscan,
            remeasure_threshold: self.remeasure_threshold,
            index_strategy: self.index_strategy,
            key_fn: Box::new(key_fn),
            positional_keys: false,
        }
    }

    /// Sets the estimated item size.
    pub fn estimate_size(mut self, estimate_size: u32) -> Self {
        self.estimate_size = estimate_size;
        self
    }

    /// Sets the overscan count.
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the remeasure threshold.
    pub fn remeasure_threshold(mut self, threshold: u32) -> Self {
        self.remeasure_threshold = threshold;
        self
    }

    /// Sets the offset maintenance strategy.
    pub fn index_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.index_strategy = strategy;
        self
    }

    /// Key for `item` at `index`.
    pub fn key_of(&self, item: &T, index: usize) -> K {
        (self.key_fn)(item, index)
    }

    /// Whether items are keyed by position.
    pub fn has_positional_keys(&self) -> bool {
        self.positional_keys
    }
}

impl<T, K> fmt::Debug for VirtualListOptions<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("estimate_size", &self.estimate_size)
            .field("overscan", &self.overscan)
            .field("remeasure_threshold", &self.remeasure_threshold)
            .field("index_strategy", &self.index_strategy)
            .field("positional_keys", &self.positional_keys)
            .finish_non_exhaustive()
    }
}
