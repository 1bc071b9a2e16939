//! Quiescence timers driven by caller-supplied instants.
//!
//! Nothing here sleeps or spawns; the owner calls [`Debouncer::poll`] with the
//! current time and receives the pending value once it has settled.

use std::time::{Duration, Instant};

/// Delay between the last keystroke and committing alpha text.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A single scheduled commit of `value`.
#[derive(Debug, Clone)]
pub struct DebounceTimer<T> {
    value: T,
    deadline: Instant,
    cancelled: bool,
}

impl<T> DebounceTimer<T> {
    pub fn start(value: T, now: Instant, delay: Duration) -> Self {
        Self {
            value,
            deadline: now + delay,
            cancelled: false,
        }
    }

    /// A cancelled timer never fires.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.cancelled && now >= self.deadline
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Holds at most one outstanding timer.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<DebounceTimer<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, cancelling any timer still outstanding.
    pub fn start(&mut self, value: T, now: Instant) {
        if let Some(previous) = self.pending.as_mut() {
            previous.cancel();
        }
        self.pending = Some(DebounceTimer::start(value, now, self.delay));
    }

    /// Cancel the outstanding timer. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(mut timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|timer| !timer.is_cancelled())
    }

    /// Value of the outstanding timer if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|timer| timer.is_due(now)) {
            return self.pending.take().map(|timer| timer.value);
        }
        None
    }

    /// Fire the outstanding timer immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending
            .take()
            .filter(|timer| !timer.is_cancelled())
            .map(|timer| timer.value)
    }
}
