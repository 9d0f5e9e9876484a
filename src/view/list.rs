//! Render surface for the virtualized entry list.
//!
//! Only mounted items are drawn. Each one is placed at its recorded offset
//! minus the scroll position and clipped to its recorded size, so an
//! estimate that is too small never bleeds into the next item. The content
//! area stands in for the container sized to the total extent; the
//! scrollbar shows where the viewport sits within it.

use super::constants::{SCROLLBAR_WIDTH, STATUS_BAR_HEIGHT};
use super::styles::ListStyles;
use crate::virtual_list::{IndexStrategy, VirtualItem, VisibleRange};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget};

/// Character used for the rule below each entry.
const SEPARATOR: &str = "─";

/// Screen regions of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceLayout {
    /// Rows and columns available to entry text.
    pub content: Rect,
    /// Scrollbar column, if shown.
    pub scrollbar: Option<Rect>,
    /// Bottom status row.
    pub status: Rect,
}

impl SurfaceLayout {
    /// Split the frame into content, scrollbar and status regions.
    pub fn split(area: Rect, show_scrollbar: bool) -> Self {
        let status_height = STATUS_BAR_HEIGHT.min(area.height);
        let list_height = area.height - status_height;
        let status = Rect::new(area.x, area.y + list_height, area.width, status_height);

        let bar_width = if show_scrollbar && area.width > SCROLLBAR_WIDTH {
            SCROLLBAR_WIDTH
        } else {
            0
        };
        let content = Rect::new(area.x, area.y, area.width - bar_width, list_height);
        let scrollbar = (bar_width > 0).then(|| {
            Rect::new(
                area.x + content.width,
                area.y,
                bar_width,
                list_height,
            )
        });

        Self {
            content,
            scrollbar,
            status,
        }
    }
}

/// Widget drawing the mounted slice of a virtualized list.
///
/// `render_item(item, index, width)` produces an item's rows. The host must
/// measure with the same function (plus one row when the separator is on)
/// or the recorded sizes will not match what is drawn.
pub struct VirtualListView<'a, T, K, F> {
    items: &'a [T],
    mounted: &'a [VirtualItem<K>],
    render_item: F,
    scroll_top: u64,
    total_extent: u64,
    styles: ListStyles,
    separator: bool,
}

impl<'a, T, K, F> VirtualListView<'a, T, K, F>
where
    F: Fn(&T, usize, u16) -> Vec<Line<'static>>,
{
    /// View over `mounted`, indices into `items`.
    pub fn new(items: &'a [T], mounted: &'a [VirtualItem<K>], render_item: F) -> Self {
        Self {
            items,
            mounted,
            render_item,
            scroll_top: 0,
            total_extent: 0,
            styles: ListStyles::default(),
            separator: true,
        }
    }

    /// Scroll position in rows.
    pub fn scroll_top(mut self, scroll_top: u64) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    /// Total list extent in rows, used to size the scrollbar.
    pub fn total_extent(mut self, total_extent: u64) -> Self {
        self.total_extent = total_extent;
        self
    }

    /// Container, item and separator styles.
    pub fn styles(mut self, styles: ListStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Draw a rule row below each item.
    pub fn separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    fn render_items(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.styles.container);

        let top = self.scroll_top;
        let bottom = top + u64::from(area.height);
        let rule = Line::from(Span::styled(
            SEPARATOR.repeat(usize::from(area.width)),
            self.styles.separator,
        ));

        for item in self.mounted {
            let Some(value) = self.items.get(item.index) else {
                continue;
            };
            let first = item.offset.max(top);
            let last = item.end().min(bottom);
            if first >= last {
                continue;
            }
            buf.set_style(
                Rect::new(area.x, area.y + (first - top) as u16, area.width, (last - first) as u16),
                self.styles.item,
            );

            let mut lines = (self.render_item)(value, item.index, area.width);
            if self.separator {
                lines.push(rule.clone());
            }

            // Rows past the recorded size belong to the next item.
            for (row, line) in lines.iter().take(item.size as usize).enumerate() {
                let y = item.offset + row as u64;
                if (top..bottom).contains(&y) {
                    buf.set_line(area.x, area.y + (y - top) as u16, line, area.width);
                }
            }
        }
    }

    /// Render items into `layout.content` and the scrollbar, if any.
    pub fn render_surface(self, layout: &SurfaceLayout, buf: &mut Buffer) {
        self.render_items(layout.content, buf);

        if let Some(bar) = layout.scrollbar {
            let viewport = usize::from(layout.content.height);
            let scrollable = self.total_extent.saturating_sub(viewport as u64);
            let mut state = ScrollbarState::new(scrollable as usize + 1)
                .position(self.scroll_top.min(scrollable) as usize)
                .viewport_content_length(viewport);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(bar, buf, &mut state);
        }
    }
}

impl<T, K, F> Widget for VirtualListView<'_, T, K, F>
where
    F: Fn(&T, usize, u16) -> Vec<Line<'static>>,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_items(area, buf);
    }
}

/// Values shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Mounted range.
    pub range: VisibleRange,
    /// Number of entries.
    pub count: usize,
    /// Scroll position in rows.
    pub scroll_top: u64,
    /// Total extent in rows.
    pub total_extent: u64,
    /// Size table version.
    pub version: u64,
    /// Active offset index strategy.
    pub strategy: IndexStrategy,
}

/// Status bar line.
///
/// ```
/// use winlist::view::list::{status_line, StatusInfo};
/// use winlist::virtual_list::{IndexStrategy, VisibleRange};
///
/// let line = status_line(&StatusInfo {
///     range: VisibleRange::new(14, 30),
///     count: 1000,
///     scroll_top: 4800,
///     total_extent: 240_000,
///     version: 3,
///     strategy: IndexStrategy::Dense,
/// });
/// assert_eq!(
///     line.to_string(),
///     " items 14..30 of 1000 | row 4800 of 240000 | v3 dense | q quit"
/// );
/// ```
pub fn status_line(info: &StatusInfo) -> Line<'static> {
    Line::from(format!(
        " items {}..{} of {} | row {} of {} | v{} {} | q quit",
        info.range.start,
        info.range.end,
        info.count,
        info.scroll_top,
        info.total_extent,
        info.version,
        info.strategy,
    ))
}
