//! Headless windowed-list virtualizer
//!
//! Mounts only the items that intersect the viewport (plus an overscan
//! margin) while keeping the container sized to the full content extent.
//! The host owns rendering; this layer owns geometry.
//!
//! # Module Structure
//!
//! - `types`: ViewportGeometry, VirtualItem
//! - `offset_index`: OffsetIndex - dense cumulative offsets, OffsetLookup trait
//! - `height_index`: HeightIndex - Fenwick-backed incremental offsets
//! - `size_table`: SizeTable - recorded sizes keyed by item key
//! - `visible_range`: VisibleRange - mounted half-open range and clamping
//! - `resolver`: viewport → range floor search with overscan
//! - `measurement`: SizeObserver trait and per-item observation handles
//! - `scheduler`: FrameScheduler trait, FrameCoalescer, TickScheduler
//! - `options`: VirtualListOptions, IndexStrategy
//! - `virtualizer`: Virtualizer - reconciliation state machine

pub mod height_index;
pub mod measurement;
pub mod offset_index;
pub mod options;
pub mod resolver;
pub mod scheduler;
pub mod size_table;
pub mod types;
pub mod virtualizer;
pub mod visible_range;

pub use measurement::{ObservationId, ObserveError, SizeObserver};
pub use offset_index::{OffsetIndex, OffsetLookup};
pub use options::{IndexStrategy, VirtualListOptions};
pub use scheduler::{FrameScheduler, FrameToken, TickScheduler};
pub use types::{ViewportGeometry, VirtualItem};
pub use virtualizer::Virtualizer;
pub use visible_range::VisibleRange;
