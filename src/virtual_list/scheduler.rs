//! Deferred frame scheduling with single-flight coalescing
//!
//! Scroll and resize events never resolve the range inline. They record the
//! latest viewport and ask the host for one deferred frame; further events
//! that arrive before the frame runs only overwrite the recorded viewport.

use super::types::ViewportGeometry;
use std::collections::VecDeque;
use tracing::trace;

/// Handle for one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Wraps a raw token id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw token id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Host primitive that runs a callback before the next repaint.
///
/// The host later calls [`Virtualizer::run_frame`](super::Virtualizer::run_frame)
/// with the token it handed out.
pub trait FrameScheduler {
    /// Requests a frame callback.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancels a previously requested frame. Cancelling a token that
    /// already ran is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// State of the single in-flight frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    /// No frame requested.
    #[default]
    Idle,
    /// A frame was requested and has not run yet.
    Scheduled(FrameToken),
    /// The frame callback is executing.
    Running,
}

/// Coalesces viewport events into at most one pending frame.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer {
    state: FrameState,
    pending: Option<ViewportGeometry>,
}

impl FrameCoalescer {
    /// Creates an idle coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Latest viewport waiting for the next frame.
    pub fn pending(&self) -> Option<ViewportGeometry> {
        self.pending
    }

    /// Records `geometry` and requests a frame if none is in flight.
    ///
    /// Returns true if a new frame was requested.
    pub fn schedule<S>(&mut self, scheduler: &mut S, geometry: ViewportGeometry) -> bool
    where
        S: FrameScheduler + ?Sized,
    {
        self.pending = Some(geometry);
        match self.state {
            FrameState::Idle => {
                let token = scheduler.request_frame();
                trace!(token = token.get(), "frame requested");
                self.state = FrameState::Scheduled(token);
                true
            }
            // Picked up by `finish` once the running frame completes
            FrameState::Scheduled(_) | FrameState::Running => false,
        }
    }

    /// Starts the frame for `token`, returning the viewport to resolve.
    ///
    /// Returns `None` for stale or cancelled tokens.
    pub fn begin(&mut self, token: FrameToken) -> Option<ViewportGeometry> {
        match self.state {
            FrameState::Scheduled(expected) if expected == token => {
                self.state = FrameState::Running;
                self.pending.take()
            }
            _ => {
                trace!(token = token.get(), "ignoring stale frame");
                None
            }
        }
    }

    /// Ends the running frame. If events arrived while it ran, a follow-up
    /// frame is requested and true is returned.
    pub fn finish<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler + ?Sized,
    {
        if self.state != FrameState::Running {
            return false;
        }
        self.state = FrameState::Idle;
        match self.pending {
            Some(geometry) => self.schedule(scheduler, geometry),
            None => false,
        }
    }

    /// Cancels any pending frame and drops the recorded viewport.
    pub fn cancel<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if let FrameState::Scheduled(token) = self.state {
            scheduler.cancel_frame(token);
        }
        self.state = FrameState::Idle;
        self.pending = None;
    }
}

/// Frame scheduler driven by an explicit host loop.
///
/// Each loop turn the host drains [`TickScheduler::take_due`] and runs the
/// returned frames. Used by the terminal host and by tests.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    next_id: u64,
    queue: VecDeque<FrameToken>,
}

impl TickScheduler {
    /// Creates a scheduler with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued frame, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        self.queue.drain(..).collect()
    }

    /// Number of queued frames.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for TickScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.queue.push_back(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.queue.retain(|queued| *queued != token);
    }
}
