#![forbid(unsafe_code)]

//! Trailing-edge debouncer with schedule-or-replace semantics.
//!
//! A [`Debouncer`] coalesces a burst of submissions into a single trailing
//! evaluation: each [`submit`](Debouncer::submit) replaces the pending value
//! and pushes the deadline a full window out, and [`poll`](Debouncer::poll)
//! releases the value once the window has elapsed with no further
//! submissions. There is no leading-edge execution and no cancellation —
//! a pending value is only ever superseded by the next one.
//!
//! Time is injected by the caller on every call; the debouncer never samples
//! a clock. That keeps coalescing behavior fully deterministic under test.
//!
//! # Invariants
//!
//! 1. Only the last value of a burst is ever released.
//! 2. A value is released at most once.
//! 3. `poll` before the deadline returns `None` and leaves the value pending.

use web_time::{Duration, Instant};

struct Pending<T> {
    value: T,
    due: Instant,
}

/// Coalesces rapid submissions into a single trailing value.
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `value` for release after the quiet window.
    ///
    /// Replaces any pending value and restarts the window from `now`.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.window,
        });
    }

    /// Release the pending value if its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Whether a value is waiting for its window to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured quiet window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn releases_after_quiet_window() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WINDOW);

        debounce.submit(1, start);
        assert_eq!(debounce.poll(start), None);
        assert_eq!(debounce.poll(start + Duration::from_millis(499)), None);
        assert_eq!(debounce.poll(start + WINDOW), Some(1));
    }

    #[test]
    fn burst_releases_only_last_value() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WINDOW);

        debounce.submit(1, start);
        debounce.submit(2, start + Duration::from_millis(100));
        debounce.submit(3, start + Duration::from_millis(200));

        // The first submission's deadline has passed, but it was superseded.
        assert_eq!(debounce.poll(start + Duration::from_millis(600)), None);
        assert_eq!(
            debounce.poll(start + Duration::from_millis(700)),
            Some(3),
            "only the trailing submission survives the burst"
        );
    }

    #[test]
    fn releases_at_most_once() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WINDOW);

        debounce.submit(7, start);
        assert_eq!(debounce.poll(start + WINDOW), Some(7));
        assert_eq!(debounce.poll(start + WINDOW + WINDOW), None);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn submission_after_release_starts_a_fresh_window() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WINDOW);

        debounce.submit(1, start);
        assert_eq!(debounce.poll(start + WINDOW), Some(1));

        let later = start + Duration::from_secs(10);
        debounce.submit(2, later);
        assert_eq!(debounce.poll(later), None);
        assert_eq!(debounce.poll(later + WINDOW), Some(2));
    }

    #[test]
    fn pending_state_is_observable() {
        let start = Instant::now();
        let mut debounce = Debouncer::new(WINDOW);
        assert!(!debounce.is_pending());

        debounce.submit((), start);
        assert!(debounce.is_pending());

        let _ = debounce.poll(start + WINDOW);
        assert!(!debounce.is_pending());
    }
}
