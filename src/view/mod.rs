//! TUI rendering and terminal management (impure shell)
//!
//! The terminal is the host environment for the virtualizer: crossterm
//! events become scroll and resize notifications, the main loop is the
//! frame clock, and wrapped row counts are the measurements.

pub mod constants;
pub mod list;
pub mod observer;
pub mod styles;
pub mod wrap;

pub use list::{StatusInfo, SurfaceLayout, VirtualListView};
pub use observer::RowObserver;
pub use styles::{ColorConfig, ListStyles};

use crate::config::ResolvedConfig;
use crate::model::{Entry, EntryId, InputError};
use crate::source::InputSource;
use crate::virtual_list::{
    IndexStrategy, TickScheduler, ViewportGeometry, VirtualItem, VirtualListOptions, Virtualizer,
};
use constants::MAX_SETTLE_PASSES;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// The virtualizer as hosted by the terminal.
pub type EntryList = Virtualizer<Entry, EntryId, TickScheduler, RowObserver>;

/// Settings the viewer takes from resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    /// Estimated entry height in rows.
    pub estimate_size: u32,
    /// Entries mounted beyond each viewport edge.
    pub overscan: usize,
    /// Height differences up to this many rows are ignored.
    pub remeasure_threshold: u32,
    /// Offset index strategy.
    pub index_strategy: IndexStrategy,
    /// Draw the scrollbar column.
    pub show_scrollbar: bool,
    /// Rows per mouse wheel tick.
    pub wheel_step: u16,
    /// Color output.
    pub colors: ColorConfig,
}

impl ViewSettings {
    /// Settings from resolved configuration.
    pub fn from_config(config: &ResolvedConfig, colors: ColorConfig) -> Self {
        Self {
            estimate_size: config.estimate_size,
            overscan: config.overscan,
            remeasure_threshold: config.remeasure_threshold,
            index_strategy: config.index_strategy,
            show_scrollbar: config.show_scrollbar,
            wheel_step: config.wheel_step,
            colors,
        }
    }

    fn list_options(&self) -> VirtualListOptions<Entry, EntryId> {
        VirtualListOptions::<Entry>::new()
            .with_key(|entry: &Entry, _index| entry.id())
            .estimate_size(self.estimate_size)
            .overscan(self.overscan)
            .remeasure_threshold(self.remeasure_threshold)
            .index_strategy(self.index_strategy)
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    entries: Vec<Entry>,
    list: EntryList,
    scroll_top: u64,
    /// Keep the view at the end of the list as measurements change it.
    pinned_to_end: bool,
    layout: SurfaceLayout,
    styles: ListStyles,
    settings: ViewSettings,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(entries: Vec<Entry>, settings: ViewSettings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, entries, settings)
    }

    /// Main event loop
    ///
    /// Blocks on the next terminal event, then drains whatever else is
    /// already queued so a burst of wheel ticks costs one frame and one
    /// draw. Returns when the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.settle();
        self.draw()?;

        loop {
            let mut quit = self.handle_event(event::read()?);
            while !quit && event::poll(Duration::ZERO)? {
                quit = self.handle_event(event::read()?);
            }
            if quit {
                return Ok(());
            }

            self.settle();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an existing terminal and mount the first screen.
    ///
    /// Entries are measured against the terminal's current width before
    /// this returns.
    pub fn with_terminal(
        terminal: Terminal<B>,
        entries: Vec<Entry>,
        settings: ViewSettings,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let layout = SurfaceLayout::split(
            Rect::new(0, 0, size.width, size.height),
            settings.show_scrollbar,
        );
        let list = Virtualizer::new(
            settings.list_options(),
            TickScheduler::new(),
            RowObserver::new(layout.content.width),
        );

        let mut app = Self {
            terminal,
            entries,
            list,
            scroll_top: 0,
            pinned_to_end: false,
            layout,
            styles: ListStyles::with_color_config(settings.colors),
            settings,
        };

        app.list.set_items(&app.entries);
        app.list.set_viewport(app.geometry());
        app.settle();
        info!(
            count = app.entries.len(),
            width = size.width,
            height = size.height,
            strategy = %settings.index_strategy,
            "viewer ready"
        );
        Ok(app)
    }

    /// Dispatch one terminal event. Returns true if the user quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                false
            }
            _ => false,
        }
    }

    /// Handle a key press. Returns true if the user quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = i64::from(self.layout.content.height.max(1));

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('d') if ctrl => self.scroll_by(page / 2),
            KeyCode::Char('u') if ctrl => self.scroll_by(-page / 2),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to(0),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to_end(),
            KeyCode::Char(']') => self.next_entry(),
            KeyCode::Char('[') => self.previous_entry(),
            _ => {}
        }
        false
    }

    /// Handle mouse wheel scrolling.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = i64::from(self.settings.wheel_step);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(step),
            MouseEventKind::ScrollUp => self.scroll_by(-step),
            _ => {}
        }
    }

    /// Recompute the layout for a new terminal size.
    ///
    /// Width changes re-measure every observed entry on the next settle.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "resize");
        self.layout = SurfaceLayout::split(
            Rect::new(0, 0, width, height),
            self.settings.show_scrollbar,
        );
        self.list.observer_mut().set_width(self.layout.content.width);
        self.list.on_resize(self.geometry());
    }

    /// Run due frames and feed measurements back until the list is stable.
    ///
    /// Returns the number of passes taken.
    pub fn settle(&mut self) -> usize {
        for pass in 1..=MAX_SETTLE_PASSES {
            self.run_due_frames();
            let corrected = self.remeasure();
            let scrolled = self.clamp_scroll();
            if !corrected && !scrolled && self.list.scheduler().queued() == 0 {
                return pass;
            }
        }
        debug!(passes = MAX_SETTLE_PASSES, "settle pass limit reached");
        MAX_SETTLE_PASSES
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let items: Vec<VirtualItem<EntryId>> = self.list.virtual_items().collect();
        let status = list::status_line(&self.status_info());
        let total = self.list.total_extent();
        let scroll_top = self.scroll_top;
        let layout = self.layout;
        let entries = &self.entries;
        let styles = self.styles;

        self.terminal.draw(|frame| {
            VirtualListView::new(entries, &items, |entry: &Entry, _index, width| {
                wrap::entry_lines(entry, width, &styles)
            })
            .styles(styles)
            .scroll_top(scroll_top)
            .total_extent(total)
            .render_surface(&layout, frame.buffer_mut());
            frame.render_widget(Paragraph::new(status).style(styles.status), layout.status);
        })?;
        Ok(())
    }

    /// Values for the status bar.
    pub fn status_info(&self) -> StatusInfo {
        StatusInfo {
            range: self.list.range(),
            count: self.list.item_count(),
            scroll_top: self.scroll_top,
            total_extent: self.list.total_extent(),
            version: self.list.version(),
            strategy: self.settings.index_strategy,
        }
    }

    /// Current scroll position in rows.
    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    /// Largest valid scroll position.
    pub fn max_scroll(&self) -> u64 {
        self.list
            .total_extent()
            .saturating_sub(u64::from(self.layout.content.height))
    }

    /// The hosted virtualizer.
    pub fn list(&self) -> &EntryList {
        &self.list
    }

    /// Current screen layout.
    pub fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    /// The terminal, for inspecting rendered buffers.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable terminal access, e.g. to resize a test backend.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn geometry(&self) -> ViewportGeometry {
        let height = u64::from(self.layout.content.height);
        if height == 0 {
            ViewportGeometry::unmounted(self.scroll_top, 0)
        } else {
            ViewportGeometry::new(self.scroll_top, height, 0)
        }
    }

    fn scroll_by(&mut self, delta: i64) {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    fn scroll_to(&mut self, target: u64) {
        self.pinned_to_end = false;
        self.move_viewport(target);
    }

    fn scroll_to_end(&mut self) {
        self.pinned_to_end = true;
        self.move_viewport(self.max_scroll());
    }

    fn next_entry(&mut self) {
        let Some(current) = self.list.item_at(self.scroll_top) else {
            return;
        };
        if current + 1 < self.list.item_count() {
            self.scroll_to(self.list.offset_of(current + 1));
        }
    }

    fn previous_entry(&mut self) {
        let Some(current) = self.list.item_at(self.scroll_top) else {
            return;
        };
        let start = self.list.offset_of(current);
        if start < self.scroll_top {
            self.scroll_to(start);
        } else if current > 0 {
            self.scroll_to(self.list.offset_of(current - 1));
        }
    }

    fn move_viewport(&mut self, target: u64) -> bool {
        let target = target.min(self.max_scroll());
        if target == self.scroll_top {
            return false;
        }
        self.scroll_top = target;
        self.list.on_scroll(self.geometry());
        true
    }

    fn run_due_frames(&mut self) {
        for token in self.list.scheduler_mut().take_due() {
            self.list.run_frame(token);
        }
    }

    /// Report the wrapped height of every observed entry.
    fn remeasure(&mut self) -> bool {
        let width = self.list.observer().width();
        let mut corrected = false;
        for index in self.list.observer().observed_indices() {
            if let Some(entry) = self.entries.get(index) {
                corrected |= self.list.report_size(index, wrap::measure_entry(entry, width));
            }
        }
        corrected
    }

    /// Keep the scroll position valid after the total extent changed.
    fn clamp_scroll(&mut self) -> bool {
        let max = self.max_scroll();
        if self.pinned_to_end && self.scroll_top != max {
            return self.move_viewport(max);
        }
        if self.scroll_top > max {
            return self.move_viewport(max);
        }
        false
    }
}

/// Load entries and run the viewer until the user quits.
///
/// The terminal is restored even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(input_source: InputSource, settings: ViewSettings) -> Result<(), TuiError> {
    let entries = input_source.load()?;

    let mut app = match TuiApp::new(entries, settings) {
        Ok(app) => app,
        Err(err) => {
            let _ = restore_terminal();
            return Err(err);
        }
    };
    let result = app.run();
    drop(app);

    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
