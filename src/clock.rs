// SPDX-License-Identifier: MPL-2.0
//! Time sources for notification timers.
//!
//! Every timer in this crate is a deadline computed from [`Clock::now`] at arm
//! time. The event loop owning a channel decides when to look at the clock
//! again (see `NotificationChannel::tick`), so swapping [`SystemClock`] for a
//! [`ManualClock`] gives fully deterministic virtual time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle and give
/// another to the component under test.
///
/// ```
/// use cart_snackbar::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_micros: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward.
    ///
    /// The offset saturates instead of wrapping. A step that would take the
    /// clock past the last representable `Instant` leaves it where it is.
    pub fn advance(&self, by: Duration) {
        let micros = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        let origin = self.origin;
        let _ = self
            .offset_micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                let next = current.saturating_add(micros);
                origin
                    .checked_add(Duration::from_micros(next))
                    .map(|_| next)
            });
    }

    /// Moves the clock forward by a number of milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Returns how far the clock has moved since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.offset_micros.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_does_not_move_on_its_own() {
        let clock = ManualClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
    }

    #[test]
    fn clones_share_the_same_offset() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();

        other.advance_millis(1500);

        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
        assert_eq!(clock.now() - start, Duration::from_millis(1500));
    }

    #[test]
    fn huge_advance_never_moves_the_clock_backwards() {
        let clock = ManualClock::new();
        clock.advance_millis(10);
        let before = clock.now();

        clock.advance(Duration::MAX);
        let after = clock.now();
        assert!(after >= before);

        clock.advance(Duration::MAX);
        assert!(clock.now() >= after);
        assert!(clock.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
