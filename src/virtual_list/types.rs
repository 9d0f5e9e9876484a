//! Core virtualizer value types

/// Geometry of the scroll viewport relative to the list container.
///
/// `container_top` is the container's offset from the scroll origin. It is
/// `None` until the container has been laid out at least once; range
/// resolution is skipped while it is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportGeometry {
    /// Current scroll offset of the viewport.
    pub scroll_top: u64,
    /// Visible height of the viewport.
    pub viewport_height: u64,
    /// Top of the list container in scroll coordinates, once mounted.
    pub container_top: Option<u64>,
}

impl ViewportGeometry {
    /// Geometry for a mounted container.
    pub fn new(scroll_top: u64, viewport_height: u64, container_top: u64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            container_top: Some(container_top),
        }
    }

    /// Geometry for a container that has not been laid out yet.
    pub fn unmounted(scroll_top: u64, viewport_height: u64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            container_top: None,
        }
    }

    /// Returns the `(y0, y1)` window in list coordinates, or `None` when
    /// the container is not mounted.
    ///
    /// ```
    /// # use winlist::virtual_list::types::ViewportGeometry;
    /// let geometry = ViewportGeometry::new(100, 50, 40);
    /// assert_eq!(geometry.list_window(), Some((60, 110)));
    ///
    /// // Scrolled above the container: clamps to zero.
    /// let geometry = ViewportGeometry::new(0, 30, 40);
    /// assert_eq!(geometry.list_window(), Some((0, 0)));
    /// ```
    pub fn list_window(&self) -> Option<(u64, u64)> {
        let container_top = self.container_top?;
        let y0 = self.scroll_top.saturating_sub(container_top);
        let y1 = self
            .scroll_top
            .saturating_add(self.viewport_height)
            .saturating_sub(container_top);
        Some((y0, y1))
    }
}

/// One mounted item as handed to a render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualItem<K> {
    /// Position in the item collection.
    pub index: usize,
    /// Stable identity key.
    pub key: K,
    /// Start offset within the list container.
    pub offset: u64,
    /// Recorded size (estimated or measured).
    pub size: u32,
}

impl<K> VirtualItem<K> {
    /// Offset one past the item's last unit.
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_geometry_has_no_window() {
        let geometry = ViewportGeometry::unmounted(500, 800);
        assert_eq!(geometry.list_window(), None);
    }

    #[test]
    fn default_geometry_is_unmounted() {
        assert_eq!(ViewportGeometry::default().container_top, None);
    }

    #[test]
    fn window_subtracts_container_top() {
        let geometry = ViewportGeometry::new(4800, 800, 0);
        assert_eq!(geometry.list_window(), Some((4800, 5600)));
    }

    #[test]
    fn window_partially_above_container() {
        let geometry = ViewportGeometry::new(10, 100, 50);
        assert_eq!(geometry.list_window(), Some((0, 60)));
    }

    #[test]
    fn virtual_item_end_adds_size() {
        let item = VirtualItem {
            index: 3,
            key: 3usize,
            offset: 720,
            size: 240,
        };
        assert_eq!(item.end(), 960);
    }
}
