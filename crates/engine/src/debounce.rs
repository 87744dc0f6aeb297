//! Minimum-interval gate for regeneration requests.
//!
//! The gate stamps the time of the last accepted request and rejects
//! anything arriving inside the configured window. State is local to
//! one coordinator instance; there is no global gate.

use std::time::{Duration, Instant};

/// Default spacing between accepted regeneration requests.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(400);

/// Gate that accepts at most one request per window.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    /// Gate with the given minimum spacing between accepted requests.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Accept or reject a request arriving at `now`.
    ///
    /// Acceptance stamps `now` as the new reference point; rejection
    /// leaves the gate untouched, so a burst of rejected requests does
    /// not push the window forward.
    pub fn should_proceed_at(&mut self, now: Instant) -> bool {
        let ok = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        };
        if ok {
            self.last_accepted = Some(now);
        }
        ok
    }

    /// [`Self::should_proceed_at`] against the wall clock.
    pub fn should_proceed(&mut self) -> bool {
        self.should_proceed_at(Instant::now())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}
