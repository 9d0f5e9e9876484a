//! Visible range resolution
//!
//! Maps a viewport window onto item indices with two floor searches over
//! the offset index, then pads both ends by the overscan margin.

use super::offset_index::OffsetLookup;
use super::types::ViewportGeometry;
use super::visible_range::VisibleRange;

/// Resolves the mounted range for the given viewport.
///
/// Returns `None` when the container is not mounted yet; the caller keeps
/// its previous range in that case.
///
/// An item straddling either viewport edge is included, because the floor
/// search picks the rightmost item whose start does not exceed the edge.
///
/// # Examples
///
/// ```
/// # use winlist::virtual_list::offset_index::OffsetIndex;
/// # use winlist::virtual_list::resolver::resolve_range;
/// # use winlist::virtual_list::types::ViewportGeometry;
/// # use winlist::virtual_list::visible_range::VisibleRange;
/// let index = OffsetIndex::build(1_000, |_| None, 240);
/// let geometry = ViewportGeometry::new(4_800, 800, 0);
/// assert_eq!(resolve_range(&index, geometry, 6), Some(VisibleRange::new(14, 30)));
/// ```
pub fn resolve_range<I>(index: &I, geometry: ViewportGeometry, overscan: usize) -> Option<VisibleRange>
where
    I: OffsetLookup + ?Sized,
{
    let (y0, y1) = geometry.list_window()?;
    let count = index.len();

    let start_index = index.floor_index(y0);
    let end_index = index.floor_index(y1) + 1;

    let start = start_index.saturating_sub(overscan).min(count);
    let end = end_index.saturating_add(overscan).min(count);
    Some(VisibleRange::new(start.min(end), end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_list::offset_index::OffsetIndex;

    fn uniform(count: usize, size: u32) -> OffsetIndex {
        OffsetIndex::build(count, |_| None, size)
    }

    #[test]
    fn unmounted_container_skips_resolution() {
        let index = uniform(10, 10);
        let geometry = ViewportGeometry::unmounted(0, 100);
        assert_eq!(resolve_range(&index, geometry, 2), None);
    }

    #[test]
    fn top_of_list_without_overscan() {
        let index = uniform(100, 10);
        let range = resolve_range(&index, ViewportGeometry::new(0, 35, 0), 0);
        // y1 = 35 lands inside item 3
        assert_eq!(range, Some(VisibleRange::new(0, 4)));
    }

    #[test]
    fn viewport_edge_on_item_boundary_includes_next_item() {
        let index = uniform(100, 10);
        let range = resolve_range(&index, ViewportGeometry::new(0, 40, 0), 0);
        // y1 = 40 is exactly item 4's top; floor picks 4, +1 mounts it
        assert_eq!(range, Some(VisibleRange::new(0, 5)));
    }

    #[test]
    fn overscan_clamps_at_both_ends() {
        let index = uniform(10, 10);
        let range = resolve_range(&index, ViewportGeometry::new(0, 100, 0), 6);
        assert_eq!(range, Some(VisibleRange::new(0, 10)));
    }

    #[test]
    fn container_offset_shifts_window() {
        let index = uniform(100, 10);
        // Container starts 200 below the scroll origin; list-space window is [50, 80)
        let range = resolve_range(&index, ViewportGeometry::new(250, 30, 200), 1);
        assert_eq!(range, Some(VisibleRange::new(4, 10)));
    }

    #[test]
    fn scrolled_above_container_shows_head() {
        let index = uniform(100, 10);
        let range = resolve_range(&index, ViewportGeometry::new(0, 20, 500), 0);
        assert_eq!(range, Some(VisibleRange::new(0, 1)));
    }

    #[test]
    fn scrolled_past_end_yields_tail() {
        let index = uniform(10, 10);
        let range = resolve_range(&index, ViewportGeometry::new(5_000, 50, 0), 2);
        assert_eq!(range, Some(VisibleRange::new(8, 10)));
    }

    #[test]
    fn empty_collection_yields_empty_range() {
        let index = uniform(0, 10);
        let range = resolve_range(&index, ViewportGeometry::new(0, 50, 0), 6);
        assert_eq!(range, Some(VisibleRange::new(0, 0)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let index = uniform(1_000, 240);
        let geometry = ViewportGeometry::new(12_345, 800, 0);
        assert_eq!(
            resolve_range(&index, geometry, 6),
            resolve_range(&index, geometry, 6)
        );
    }
}
