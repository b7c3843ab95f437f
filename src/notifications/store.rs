// SPDX-License-Identifier: MPL-2.0
//! Bounded, insertion-ordered notification storage.
//!
//! The `NotificationStore` assigns identities, enforces the capacity bound
//! with FIFO eviction, and owns the expiry timer of every entry it holds so
//! that no removal path can leave a timer behind.

use super::notification::{Notification, NotificationId, Severity};
use super::scheduler::ExpiryScheduler;
use crate::domain::QueueCapacity;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Outcome of admitting a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Identity assigned to the new notification.
    pub id: NotificationId,
    /// Oldest entry pushed out to make room, if the queue was full.
    pub evicted: Option<Notification>,
}

/// Holds the active notifications, oldest first.
///
/// Mutation is crate-private: producers go through `NotificationChannel`,
/// which guarantees every admitted entry gets exactly one expiry timer.
#[derive(Debug)]
pub struct NotificationStore {
    entries: VecDeque<Notification>,
    capacity: QueueCapacity,
    next_id: u64,
    timers: ExpiryScheduler,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(QueueCapacity::default())
    }
}

impl NotificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(capacity: QueueCapacity) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.value()),
            capacity,
            next_id: 1,
            timers: ExpiryScheduler::new(),
        }
    }

    /// Appends a notification, evicting the oldest one first if the store is full.
    ///
    /// Eviction is strictly FIFO regardless of severity, and cancels the
    /// evicted entry's timer.
    pub(crate) fn publish(
        &mut self,
        message: String,
        severity: Severity,
        now: Instant,
    ) -> Published {
        let id = NotificationId::from_raw(self.next_id);
        self.next_id += 1;

        let evicted = if self.entries.len() >= self.capacity.value() {
            self.entries.pop_front().inspect(|oldest| {
                self.timers.cancel(oldest.id());
            })
        } else {
            None
        };

        self.entries.push_back(Notification::new(id, message, severity, now));
        debug_assert!(self.entries.len() <= self.capacity.value());

        Published { id, evicted }
    }

    /// Arms the expiry timer of a stored notification.
    ///
    /// Ids that are not (or no longer) stored are ignored.
    pub(crate) fn arm_expiry(&mut self, id: NotificationId, now: Instant, duration: Duration) {
        if self.contains(id) {
            self.timers.arm(id, now, duration);
        }
    }

    /// Removes a notification and cancels its timer.
    ///
    /// Returns `true` if the notification was found and removed. Unknown ids
    /// are a silent no-op since dismissal may race with expiry.
    pub(crate) fn dismiss(&mut self, id: NotificationId) -> bool {
        self.timers.cancel(id);
        match self.entries.iter().position(|n| n.id() == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes every notification whose timer is due at `now`.
    ///
    /// Returns the removed ids in expiry order.
    pub(crate) fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        self.timers
            .take_due(now)
            .into_iter()
            .filter(|id| {
                self.entries
                    .iter()
                    .position(|n| n.id() == *id)
                    .and_then(|pos| self.entries.remove(pos))
                    .is_some()
            })
            .collect()
    }

    /// Clears all notifications and their timers.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.timers.cancel_all();
    }

    /// Returns a snapshot of the active notifications in insertion order.
    ///
    /// The snapshot is detached: changing it does not touch the store.
    #[must_use]
    pub fn list(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    /// Like [`NotificationStore::list`], minus entries whose timer is due at `now`.
    #[must_use]
    pub fn list_live(&self, now: Instant) -> Vec<Notification> {
        self.entries
            .iter()
            .filter(|n| self.timers.deadline(n.id()).is_none_or(|deadline| deadline > now))
            .cloned()
            .collect()
    }

    /// Iterates over the active notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Looks up an active notification.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id() == id)
    }

    /// Returns whether `id` is currently active.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns whether `id` has a pending expiry timer.
    #[must_use]
    pub fn has_pending_expiry(&self, id: NotificationId) -> bool {
        self.timers.is_armed(id)
    }

    /// Returns the number of pending expiry timers.
    #[must_use]
    pub fn pending_expiries(&self) -> usize {
        self.timers.pending()
    }

    /// Returns the earliest pending expiry deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Returns the number of active notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no notification is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }
}
