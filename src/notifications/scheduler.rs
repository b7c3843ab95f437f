// SPDX-License-Identifier: MPL-2.0
//! Per-notification expiry timers.
//!
//! Timers are plain deadlines; nothing runs in the background. The owner asks
//! for due entries with [`ExpiryScheduler::take_due`] whenever its event loop
//! ticks. Taking a timer removes it, which is what makes cancellation after
//! firing a harmless no-op.

use super::notification::NotificationId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Pending expiry deadlines keyed by notification.
#[derive(Debug, Default)]
pub struct ExpiryScheduler {
    deadlines: HashMap<NotificationId, Instant>,
}

impl ExpiryScheduler {
    /// Creates a scheduler with no pending timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `id` to expire `duration` after `now`.
    ///
    /// Arming an id that is already pending replaces its deadline.
    pub fn arm(&mut self, id: NotificationId, now: Instant, duration: Duration) {
        self.deadlines.insert(id, now + duration);
    }

    /// Cancels the timer for `id`.
    ///
    /// Returns `false` if it already fired or was never armed.
    pub fn cancel(&mut self, id: NotificationId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    /// Removes and returns every timer due at `now`, earliest first.
    ///
    /// Ties are broken by id so that notifications published in the same turn
    /// expire in publish order.
    pub fn take_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut due: Vec<(Instant, NotificationId)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort_unstable();

        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Returns whether a timer is pending for `id`.
    #[must_use]
    pub fn is_armed(&self, id: NotificationId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Returns the deadline pending for `id`.
    #[must_use]
    pub fn deadline(&self, id: NotificationId) -> Option<Instant> {
        self.deadlines.get(&id).copied()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRY: Duration = Duration::from_millis(3000);

    fn id(n: u64) -> NotificationId {
        NotificationId::from_raw(n)
    }

    #[test]
    fn timer_is_due_exactly_at_deadline() {
        let mut scheduler = ExpiryScheduler::new();
        let start = Instant::now();
        scheduler.arm(id(1), start, EXPIRY);

        assert!(scheduler
            .take_due(start + EXPIRY - Duration::from_millis(1))
            .is_empty());
        assert_eq!(scheduler.take_due(start + EXPIRY), vec![id(1)]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancel_after_firing_is_a_no_op() {
        let mut scheduler = ExpiryScheduler::new();
        let start = Instant::now();
        scheduler.arm(id(1), start, EXPIRY);

        assert_eq!(scheduler.take_due(start + EXPIRY), vec![id(1)]);
        assert!(!scheduler.cancel(id(1)));
        assert!(scheduler.take_due(start + EXPIRY * 2).is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = ExpiryScheduler::new();
        let start = Instant::now();
        scheduler.arm(id(1), start, EXPIRY);

        assert!(scheduler.cancel(id(1)));
        assert!(!scheduler.cancel(id(1)));
        assert!(!scheduler.is_armed(id(1)));
        assert!(scheduler.take_due(start + EXPIRY).is_empty());
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let mut scheduler = ExpiryScheduler::new();
        let start = Instant::now();
        scheduler.arm(id(1), start, EXPIRY);
        scheduler.arm(id(1), start + Duration::from_millis(1000), EXPIRY);

        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.take_due(start + EXPIRY).is_empty());
        assert_eq!(
            scheduler.take_due(start + EXPIRY + Duration::from_millis(1000)),
            vec![id(1)]
        );
    }

    #[test]
    fn due_timers_come_back_in_deadline_then_id_order() {
        let mut scheduler = ExpiryScheduler::new();
        let start = Instant::now();
        scheduler.arm(id(3), start, EXPIRY);
        scheduler.arm(id(2), start, EXPIRY);
        scheduler.arm(id(1), start + Duration::from_millis(10), EXPIRY);

        let due = scheduler.take_due(start + EXPIRY * 2);
        assert_eq!(due, vec![id(2), id(3), id(1)]);
    }

    #[test]
    fn next_deadline_is_the_earliest() {
        let mut scheduler = ExpiryScheduler::new();
        assert_eq!(scheduler.next_deadline(), None);

        let start = Instant::now();
        scheduler.arm(id(1), start + Duration::from_millis(500), EXPIRY);
        scheduler.arm(id(2), start, EXPIRY);

        assert_eq!(scheduler.next_deadline(), Some(start + EXPIRY));
        assert_eq!(scheduler.deadline(id(1)), Some(start + EXPIRY + Duration::from_millis(500)));
    }
}
