//! Layout and loop constants for the terminal host.

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the scrollbar column when shown.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// Upper bound on frame-and-measure passes before a draw.
///
/// A correction can mount new items that need measuring in turn. The loop
/// normally settles in two or three passes; the bound keeps a pathological
/// layout from stalling input handling.
pub const MAX_SETTLE_PASSES: usize = 8;
