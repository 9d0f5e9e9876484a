//! Virtualizer - reconciliation state machine tying the pieces together
//!
//! Entry points and the phases they run:
//!
//! | trigger              | phases                                   |
//! |----------------------|------------------------------------------|
//! | `set_items`          | SEED → REBUILD-OFFSETS → CLAMP → RESOLVE |
//! | `on_scroll/resize`   | deferred frame → RESOLVE                 |
//! | `report_size`        | REBUILD-OFFSETS → RESOLVE                |

use super::height_index::HeightIndex;
use super::measurement::{MeasurementLoop, SizeObserver};
use super::offset_index::{OffsetIndex, OffsetLookup};
use super::options::{IndexStrategy, VirtualListOptions};
use super::resolver::resolve_range;
use super::scheduler::{FrameCoalescer, FrameScheduler, FrameToken};
use super::size_table::SizeTable;
use super::types::{ViewportGeometry, VirtualItem};
use super::visible_range::VisibleRange;
use std::hash::Hash;
use tracing::{debug, trace, warn};

/// Offset index in one of the two maintenance strategies.
#[derive(Debug, Clone)]
enum OffsetStore {
    /// Memoized dense index and the table version it was built from.
    Dense { index: OffsetIndex, built_version: u64 },
    /// Fenwick index and the table version it reflects.
    Fenwick { index: HeightIndex, synced_version: u64 },
}

impl OffsetStore {
    fn new(strategy: IndexStrategy) -> Self {
        match strategy {
            IndexStrategy::Dense => OffsetStore::Dense {
                index: OffsetIndex::default(),
                built_version: 0,
            },
            IndexStrategy::Fenwick => OffsetStore::Fenwick {
                index: HeightIndex::default(),
                synced_version: 0,
            },
        }
    }

    /// Brings the index up to date with `table`.
    fn refresh<K>(&mut self, table: &mut SizeTable<K>)
    where
        K: Hash + Eq + Clone,
    {
        let dirty = table.take_dirty();
        match self {
            OffsetStore::Dense {
                index,
                built_version,
            } => {
                if *built_version != table.version() || index.len() != table.len() {
                    *index = OffsetIndex::from_sizes(table.sizes());
                    *built_version = table.version();
                }
            }
            OffsetStore::Fenwick {
                index,
                synced_version,
            } => {
                // Each correction bumps the version once and marks one index
                // dirty; any other gap means a reseed happened.
                let only_corrections =
                    *synced_version + dirty.len() as u64 == table.version();
                if only_corrections && index.len() == table.len() {
                    for i in dirty {
                        index.set(i, table.size(i));
                    }
                } else {
                    index.rebuild(table.sizes());
                }
                *synced_version = table.version();
            }
        }
    }

    fn lookup(&self) -> &dyn OffsetLookup {
        match self {
            OffsetStore::Dense { index, .. } => index,
            OffsetStore::Fenwick { index, .. } => index,
        }
    }
}

/// Headless windowed-list virtualizer.
///
/// Owns the size table, the offset index and the mounted range for one
/// list. The host supplies a [`FrameScheduler`] for deferred range
/// resolution and a [`SizeObserver`] for measurement handles, forwards
/// viewport events, and reports measured sizes of mounted items.
///
/// # Examples
///
/// ```
/// use winlist::virtual_list::{
///     TickScheduler, ViewportGeometry, VirtualListOptions, Virtualizer,
/// };
/// use winlist::virtual_list::measurement::{ObservationId, ObserveError, SizeObserver};
///
/// struct AlwaysObserve;
/// impl SizeObserver<usize> for AlwaysObserve {
///     fn observe(&mut self, _: &usize, index: usize) -> Result<ObservationId, ObserveError> {
///         Ok(ObservationId(index as u64))
///     }
///     fn unobserve(&mut self, _: ObservationId) {}
/// }
///
/// let items: Vec<u32> = (0..1_000).collect();
/// let mut list = Virtualizer::new(VirtualListOptions::new(), TickScheduler::new(), AlwaysObserve);
/// list.set_items(&items);
///
/// list.on_scroll(ViewportGeometry::new(4_800, 800, 0));
/// for token in list.scheduler_mut().take_due() {
///     list.run_frame(token);
/// }
/// assert_eq!((list.range().start, list.range().end), (14, 30));
/// assert_eq!(list.total_extent(), 240_000);
/// ```
pub struct Virtualizer<T, K, S, O>
where
    K: Hash + Eq + Clone,
    S: FrameScheduler,
    O: SizeObserver<K>,
{
    options: VirtualListOptions<T, K>,
    table: SizeTable<K>,
    offsets: OffsetStore,
    range: VisibleRange,
    viewport: ViewportGeometry,
    frames: FrameCoalescer,
    scheduler: S,
    measurement: MeasurementLoop<K, O>,
    torn_down: bool,
}

impl<T, K, S, O> Virtualizer<T, K, S, O>
where
    K: Hash + Eq + Clone,
    S: FrameScheduler,
    O: SizeObserver<K>,
{
    /// Creates an empty virtualizer.
    ///
    /// A zero `estimate_size` is a caller contract violation; it is clamped
    /// to 1 so offsets stay strictly increasing for unmeasured items.
    pub fn new(mut options: VirtualListOptions<T, K>, scheduler: S, observer: O) -> Self {
        if options.estimate_size == 0 {
            warn!("estimate_size of 0 clamped to 1");
            options.estimate_size = 1;
        }
        if options.has_positional_keys() {
            debug!("items keyed by position; reordering will misattribute sizes");
        }

        Self {
            table: SizeTable::new(options.estimate_size),
            offsets: OffsetStore::new(options.index_strategy),
            options,
            range: VisibleRange::default(),
            viewport: ViewportGeometry::default(),
            frames: FrameCoalescer::new(),
            scheduler,
            measurement: MeasurementLoop::new(observer),
            torn_down: false,
        }
    }

    /// Replaces the item collection and runs a full reconciliation pass.
    ///
    /// Returns true if the mounted range changed.
    pub fn set_items(&mut self, items: &[T]) -> bool {
        if self.torn_down {
            return false;
        }
        let previous = self.range;

        // SEED
        let keys = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.options.key_of(item, index))
            .collect();
        self.table.reseed(keys);

        // REBUILD-OFFSETS
        self.offsets.refresh(&mut self.table);

        // CLAMP-RANGE
        self.range = previous.clamp_to(self.table.len());

        // RESOLVE
        self.resolve();
        self.sync_mounted();

        debug!(
            count = self.table.len(),
            total = self.total_extent(),
            start = self.range.start,
            end = self.range.end,
            "items reconciled"
        );
        self.range != previous
    }

    /// Records a scroll event; resolution runs in the next frame.
    ///
    /// Returns true if a new frame was requested.
    pub fn on_scroll(&mut self, geometry: ViewportGeometry) -> bool {
        if self.torn_down {
            return false;
        }
        self.frames.schedule(&mut self.scheduler, geometry)
    }

    /// Records a resize event; resolution runs in the next frame.
    pub fn on_resize(&mut self, geometry: ViewportGeometry) -> bool {
        self.on_scroll(geometry)
    }

    /// Runs the deferred frame for `token`.
    ///
    /// Returns true if the mounted range changed. Stale, cancelled and
    /// post-teardown tokens are ignored.
    pub fn run_frame(&mut self, token: FrameToken) -> bool {
        if self.torn_down {
            trace!(token = token.get(), "frame after teardown ignored");
            return false;
        }
        let Some(geometry) = self.frames.begin(token) else {
            return false;
        };

        self.viewport = geometry;
        let changed = self.resolve();
        if changed || self.measurement.has_unobserved() {
            self.sync_mounted();
        }
        self.frames.finish(&mut self.scheduler);
        changed
    }

    /// Applies a viewport immediately, bypassing the frame scheduler.
    ///
    /// A frame still pending from an earlier scroll or resize is cancelled;
    /// its geometry is older than this one.
    ///
    /// Returns true if the mounted range changed.
    pub fn set_viewport(&mut self, geometry: ViewportGeometry) -> bool {
        if self.torn_down {
            return false;
        }
        self.frames.cancel(&mut self.scheduler);
        self.viewport = geometry;
        let changed = self.resolve();
        if changed || self.measurement.has_unobserved() {
            self.sync_mounted();
        }
        changed
    }

    /// Reports the rendered size of a mounted item.
    ///
    /// Returns true if the size table was corrected, in which case offsets
    /// and the mounted range have already been recomputed. Reports for
    /// items without a live observation are ignored.
    pub fn report_size(&mut self, index: usize, measured: u32) -> bool {
        if self.torn_down || !self.measurement.is_observed(index) {
            trace!(index, "measurement for unobserved item ignored");
            return false;
        }
        if !self
            .table
            .correct(index, measured, self.options.remeasure_threshold)
        {
            return false;
        }

        debug!(index, measured, version = self.table.version(), "size corrected");
        self.offsets.refresh(&mut self.table);
        if self.resolve() {
            self.sync_mounted();
        }
        true
    }

    /// Cancels the pending frame and releases every observation handle.
    ///
    /// Idempotent. Also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.frames.cancel(&mut self.scheduler);
        self.measurement.detach_all();
        self.torn_down = true;
        debug!("virtualizer torn down");
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Currently mounted range.
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    /// Last applied viewport.
    pub fn viewport(&self) -> ViewportGeometry {
        self.viewport
    }

    /// Number of items in the current collection.
    pub fn item_count(&self) -> usize {
        self.table.len()
    }

    /// Total extent of the list; the container is sized to this.
    pub fn total_extent(&self) -> u64 {
        self.offsets.lookup().total()
    }

    /// Start offset of item `index`; `index == item_count()` is the total.
    ///
    /// # Panics
    ///
    /// Panics if `index > item_count()`.
    pub fn offset_of(&self, index: usize) -> u64 {
        self.offsets.lookup().offset(index)
    }

    /// Item covering list offset `offset`, or the last item when `offset`
    /// is past the end. `None` for an empty list.
    pub fn item_at(&self, offset: u64) -> Option<usize> {
        let lookup = self.offsets.lookup();
        let last = lookup.len().checked_sub(1)?;
        Some(lookup.floor_index(offset).min(last))
    }

    /// Recorded size of item `index`.
    pub fn size_of(&self, index: usize) -> u32 {
        self.table.size(index)
    }

    /// Size table version; bumps on every reseed and correction.
    pub fn version(&self) -> u64 {
        self.table.version()
    }

    /// Key of item `index`.
    pub fn key_of(&self, index: usize) -> &K {
        self.table.key(index)
    }

    /// Active options.
    pub fn options(&self) -> &VirtualListOptions<T, K> {
        &self.options
    }

    /// Mounted items in render order.
    pub fn virtual_items(&self) -> impl Iterator<Item = VirtualItem<K>> + '_ {
        let lookup = self.offsets.lookup();
        self.range.indices().map(move |index| VirtualItem {
            index,
            key: self.table.key(index).clone(),
            offset: lookup.offset(index),
            size: self.table.size(index),
        })
    }

    /// Number of live observation handles.
    pub fn active_observations(&self) -> usize {
        self.measurement.active_observations()
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the frame scheduler, for hosts that drain it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The size observer.
    pub fn observer(&self) -> &O {
        self.measurement.observer()
    }

    /// Mutable access to the size observer.
    pub fn observer_mut(&mut self) -> &mut O {
        self.measurement.observer_mut()
    }

    /// RESOLVE: recomputes the range against the current viewport.
    /// Stores and reports a change only when the range actually differs.
    fn resolve(&mut self) -> bool {
        let Some(resolved) =
            resolve_range(self.offsets.lookup(), self.viewport, self.options.overscan)
        else {
            return false;
        };
        if resolved == self.range {
            return false;
        }
        trace!(
            from_start = self.range.start,
            from_end = self.range.end,
            to_start = resolved.start,
            to_end = resolved.end,
            "range changed"
        );
        self.range = resolved;
        true
    }

    fn sync_mounted(&mut self) {
        let table = &self.table;
        self.measurement
            .sync(self.range, |index| table.key(index).clone());
    }
}

impl<T, K, S, O> Drop for Virtualizer<T, K, S, O>
where
    K: Hash + Eq + Clone,
    S: FrameScheduler,
    O: SizeObserver<K>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, K, S, O> std::fmt::Debug for Virtualizer<T, K, S, O>
where
    K: Hash + Eq + Clone,
    S: FrameScheduler,
    O: SizeObserver<K>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Virtualizer")
            .field("options", &self.options)
            .field("item_count", &self.table.len())
            .field("version", &self.table.version())
            .field("range", &self.range)
            .field("viewport", &self.viewport)
            .field("frame_state", &self.frames.state())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "virtualizer_tests.rs"]
mod tests;
