//! Debounced redraw scheduling.
//!
//! Rapid-fire input changes are coalesced: a redraw only fires after a short
//! quiet period following the last request. While a drag gesture is active the
//! scheduler keeps deferring, re-arming itself at a fixed retry interval, so a
//! mid-drag layout change can never fight the pointer. The scheduler is driven
//! entirely by injected instants, so it stays deterministic under test.

use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(100);
pub const DEFAULT_DRAG_RETRY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    quiet_period: Duration,
    drag_retry: Duration,
    deadline: Option<Instant>,
    drag_active: bool,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::with_periods(DEFAULT_QUIET_PERIOD, DEFAULT_DRAG_RETRY)
    }
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_periods(quiet_period: Duration, drag_retry: Duration) -> Self {
        Self {
            quiet_period,
            drag_retry,
            deadline: None,
            drag_active: false,
        }
    }

    /// Registers an input change; resets the quiet-period deadline.
    pub fn request(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    #[must_use]
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly when the host should run a redraw now.
    ///
    /// A deferred request survives the drag and replays once it ends.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        if self.drag_active {
            self.deadline = Some(now + self.drag_retry);
            return false;
        }
        self.deadline = None;
        true
    }
}
