//! Edit debouncing driven by caller-supplied instants.

use std::time::{Duration, Instant};

/// Coalesces bursts of change notifications into one firing.
///
/// The debouncer never reads the clock itself. Hosts report changes with
/// [`trigger`](Self::trigger) and poll with [`fire`](Self::fire) from their
/// own event loop.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given idle gap.
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Configured idle gap.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a change at `at`, pushing the deadline back.
    pub fn trigger(&mut self, at: Instant) -> Instant {
        self.last = Some(at);
        at + self.delay
    }

    /// When the pending change fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.last.map(|last| last + self.delay)
    }

    /// Whether a change is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.last.is_some()
    }

    /// Fire if the idle gap has elapsed by `now`. Fires at most once per burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending change.
    pub fn cancel(&mut self) {
        self.last = None;
    }
}
