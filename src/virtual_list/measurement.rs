//! Measurement feedback - observation handles for mounted items
//!
//! Every mounted item holds exactly one observation handle. Handles are
//! released as soon as the item leaves the mounted range or its slot is
//! taken by a different key.

use super::visible_range::VisibleRange;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Identifier of one active observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// Reasons an item could not be observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserveError {
    /// The host cannot measure layout right now.
    #[error("layout measurement unsupported: {0}")]
    Unsupported(String),

    /// The element to observe no longer exists.
    #[error("item {index} is not attached to the render surface")]
    Detached {
        /// Index of the item that could not be observed.
        index: usize,
    },
}

/// Host primitive that watches an item's rendered size.
///
/// Measurements are delivered back through
/// [`Virtualizer::report_size`](super::Virtualizer::report_size).
pub trait SizeObserver<K> {
    /// Starts observing the item with `key` at `index`.
    fn observe(&mut self, key: &K, index: usize) -> Result<ObservationId, ObserveError>;

    /// Stops an observation.
    fn unobserve(&mut self, id: ObservationId);
}

#[derive(Debug, Clone)]
struct Mounted<K> {
    key: K,
    /// `None` when observation failed; the item keeps its estimate.
    observation: Option<ObservationId>,
}

/// Tracks observation handles for the mounted range.
#[derive(Debug)]
pub struct MeasurementLoop<K, O> {
    observer: O,
    mounted: HashMap<usize, Mounted<K>>,
}

impl<K, O> MeasurementLoop<K, O>
where
    K: Eq + Clone,
    O: SizeObserver<K>,
{
    /// Creates a loop with no mounted items.
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            mounted: HashMap::new(),
        }
    }

    /// Aligns handles with the mounted `range`.
    ///
    /// `key_of` yields the current key for an index inside the range.
    /// Items whose observation failed earlier are retried.
    pub fn sync(&mut self, range: VisibleRange, key_of: impl Fn(usize) -> K) {
        let observer = &mut self.observer;
        self.mounted.retain(|&index, mounted| {
            let keep = mounted.observation.is_some()
                && range.contains(index)
                && mounted.key == key_of(index);
            if !keep {
                if let Some(id) = mounted.observation {
                    observer.unobserve(id);
                }
            }
            keep
        });

        for index in range.indices() {
            if self.mounted.contains_key(&index) {
                continue;
            }
            let key = key_of(index);
            let observation = match self.observer.observe(&key, index) {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(index, error = %err, "observation failed, keeping estimate");
                    None
                }
            };
            self.mounted.insert(index, Mounted { key, observation });
        }
    }

    /// Whether a measurement for `index` should be accepted.
    pub fn is_observed(&self, index: usize) -> bool {
        self.mounted
            .get(&index)
            .is_some_and(|mounted| mounted.observation.is_some())
    }

    /// Whether a mounted item is waiting for a successful observation.
    pub fn has_unobserved(&self) -> bool {
        self.mounted.values().any(|mounted| mounted.observation.is_none())
    }

    /// Number of live observation handles.
    pub fn active_observations(&self) -> usize {
        self.mounted
            .values()
            .filter(|mounted| mounted.observation.is_some())
            .count()
    }

    /// Releases every handle.
    pub fn detach_all(&mut self) {
        let released = self.mounted.len();
        for (_, mounted) in self.mounted.drain() {
            if let Some(id) = mounted.observation {
                self.observer.unobserve(id);
            }
        }
        if released > 0 {
            debug!(released, "released all observations");
        }
    }

    /// The underlying observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the underlying observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
