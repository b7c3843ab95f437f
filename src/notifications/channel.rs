// SPDX-License-Identifier: MPL-2.0
//! Single entry point for producers of notifications.
//!
//! `NotificationChannel` fronts the store, its expiry timers and the pulse
//! coordinator. Going through it is what guarantees that every published
//! notification has exactly one armed expiry, and that eviction or dismissal
//! always cancels it.

use super::notification::{Notification, NotificationId, Severity};
use super::pulse::{PulseCoordinator, PulseTransition};
use super::store::NotificationStore;
use crate::clock::{Clock, SystemClock};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, PulseStopReason};
use crate::domain::{ExpiryDelay, PulseWindow, QueueCapacity};
use std::time::Instant;

/// The only severity that pulses the cart indicator.
const PULSE_SEVERITY: Severity = Severity::Success;

/// Tuning fixed at construction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSettings {
    /// Maximum number of notifications active at once.
    pub capacity: QueueCapacity,
    /// Delay after which every notification expires.
    pub expiry: ExpiryDelay,
    /// Pulse length counted from the latest success notification.
    pub pulse: PulseWindow,
}

/// Messages for notification state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Publish a new notification.
    Publish { message: String, severity: Severity },
    /// Dismiss a specific notification by ID (the close button).
    Dismiss(NotificationId),
    /// Let due timers fire.
    Tick,
    /// The indicator finished its pulse animation.
    AnimationFinished,
}

/// Facade over the notification queue and the pulse.
#[derive(Debug)]
pub struct NotificationChannel<C: Clock = SystemClock> {
    store: NotificationStore,
    pulse: PulseCoordinator,
    expiry: ExpiryDelay,
    clock: C,
    diagnostics: Option<DiagnosticsHandle>,
}

impl NotificationChannel<SystemClock> {
    /// Creates a channel with default settings on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(ChannelSettings::default(), SystemClock)
    }
}

impl Default for NotificationChannel<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NotificationChannel<C> {
    /// Creates a channel driven by `clock`.
    #[must_use]
    pub fn with_clock(settings: ChannelSettings, clock: C) -> Self {
        Self {
            store: NotificationStore::new(settings.capacity),
            pulse: PulseCoordinator::new(settings.pulse),
            expiry: settings.expiry,
            clock,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for recording notification events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Publishes a notification and returns its id.
    ///
    /// Timers already due fire first, so only live notifications can be
    /// evicted. If the queue is still full the oldest notification is
    /// evicted. A success notification also triggers the pulse.
    pub fn publish(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let now = self.clock.now();
        self.fire_due(now);
        let published = self.store.publish(message.into(), severity, now);
        let id = published.id;

        if let Some(evicted) = published.evicted {
            log::info!(
                "Evicted notification {} ({}) to make room for {id}",
                evicted.id(),
                evicted.severity()
            );
            self.report(
                DiagnosticEventKind::Evicted {
                    id: evicted.id(),
                    severity: evicted.severity(),
                },
                now,
            );
        }

        self.store.arm_expiry(id, now, self.expiry.as_duration());
        log::debug!("Published notification {id} ({severity})");
        self.report(DiagnosticEventKind::Published { id, severity }, now);

        if severity == PULSE_SEVERITY {
            let kind = match self.pulse.trigger(now) {
                PulseTransition::Started => DiagnosticEventKind::PulseStarted,
                PulseTransition::Restarted => DiagnosticEventKind::PulseRestarted,
            };
            self.report(kind, now);
        }

        id
    }

    /// Publishes a success notification.
    pub fn publish_default(&mut self, message: impl Into<String>) -> NotificationId {
        self.publish(message, Severity::default())
    }

    /// Dismisses a notification and cancels its timer.
    ///
    /// Returns `true` if it was still active. Unknown, expired or already
    /// dismissed ids are a no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let now = self.clock.now();
        self.fire_due(now);
        let removed = self.store.dismiss(id);
        if removed {
            log::debug!("Dismissed notification {id}");
            self.report(DiagnosticEventKind::Dismissed { id }, now);
        }
        removed
    }

    /// Fires every timer due at the clock's current instant.
    ///
    /// Returns the ids of notifications that expired.
    pub fn tick(&mut self) -> Vec<NotificationId> {
        let now = self.clock.now();
        self.fire_due(now)
    }

    fn fire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired = self.store.expire_due(now);
        for id in &expired {
            log::debug!("Notification {id} expired");
            self.report(DiagnosticEventKind::Expired { id: *id }, now);
        }

        if self.pulse.tick(now) {
            self.report(
                DiagnosticEventKind::PulseStopped {
                    reason: PulseStopReason::Timer,
                },
                now,
            );
        }
        expired
    }

    /// Forwards the indicator's animation-completed callback.
    pub fn on_animation_finished(&mut self) -> bool {
        let stopped = self.pulse.on_animation_finished();
        if stopped {
            self.report(
                DiagnosticEventKind::PulseStopped {
                    reason: PulseStopReason::AnimationFinished,
                },
                self.clock.now(),
            );
        }
        stopped
    }

    /// Removes every notification, cancels all timers and stops the pulse.
    pub fn clear(&mut self) {
        self.store.clear();
        if self.pulse.deactivate() {
            self.report(
                DiagnosticEventKind::PulseStopped {
                    reason: PulseStopReason::Cleared,
                },
                self.clock.now(),
            );
        }
    }

    /// Handles a notification message.
    ///
    /// Returns the new id for [`Message::Publish`].
    pub fn handle_message(&mut self, message: Message) -> Option<NotificationId> {
        match message {
            Message::Publish { message, severity } => Some(self.publish(message, severity)),
            Message::Dismiss(id) => {
                self.dismiss(id);
                None
            }
            Message::Tick => {
                self.tick();
                None
            }
            Message::AnimationFinished => {
                self.on_animation_finished();
                None
            }
        }
    }

    /// Returns a snapshot of the active notifications, oldest first.
    ///
    /// Entries whose timer is due but has not fired yet are left out.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.store.list_live(self.clock.now())
    }

    /// Read-only access to the store.
    #[must_use]
    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Read-only access to the pulse.
    #[must_use]
    pub fn pulse(&self) -> &PulseCoordinator {
        &self.pulse
    }

    /// Returns whether the indicator should currently be pulsing.
    #[must_use]
    pub fn is_pulsing(&self) -> bool {
        self.pulse.currently_active()
    }

    /// Returns the earliest instant at which a timer needs to fire.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.store.next_deadline(), self.pulse.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns whether nothing is shown and no timer is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.store.is_empty() && !self.pulse.currently_active()
    }

    /// Returns the clock driving this channel.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn report(&self, kind: DiagnosticEventKind, at: Instant) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};

    const EXPIRY_MS: u64 = 3000;
    const PULSE_MS: u64 = 600;

    fn channel() -> (NotificationChannel<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let channel = NotificationChannel::with_clock(ChannelSettings::default(), clock.clone());
        (channel, clock)
    }

    fn messages<C: Clock>(channel: &NotificationChannel<C>) -> Vec<String> {
        channel
            .notifications()
            .iter()
            .map(|n| n.message().to_string())
            .collect()
    }

    #[test]
    fn new_channel_is_idle() {
        let (channel, _) = channel();
        assert!(channel.is_idle());
        assert_eq!(channel.next_deadline(), None);
    }

    #[test]
    fn length_stays_within_capacity_after_every_publish() {
        let (mut channel, _) = channel();
        for i in 0..20 {
            let severity = Severity::ALL[i % Severity::ALL.len()];
            channel.publish(format!("n-{i}"), severity);
            assert!(channel.notifications().len() <= channel.store().capacity());
            assert_eq!(
                channel.store().pending_expiries(),
                channel.notifications().len()
            );
        }
    }

    #[test]
    fn fourth_publish_evicts_exactly_the_first() {
        let (mut channel, _) = channel();
        let a = channel.publish("A", Severity::Error);
        channel.publish("B", Severity::Info);
        channel.publish("C", Severity::Warning);
        channel.publish("D", Severity::Success);

        assert_eq!(messages(&channel), vec!["B", "C", "D"]);
        assert!(!channel.store().has_pending_expiry(a));
    }

    #[test]
    fn list_keeps_insertion_order_across_severities() {
        let (mut channel, _) = channel();
        channel.publish("error", Severity::Error);
        channel.publish("success", Severity::Success);
        channel.publish("warning", Severity::Warning);

        let severities: Vec<_> = channel
            .notifications()
            .iter()
            .map(Notification::severity)
            .collect();
        assert_eq!(
            severities,
            vec![Severity::Error, Severity::Success, Severity::Warning]
        );
    }

    #[test]
    fn dismiss_twice_leaves_same_state_as_once() {
        let (mut channel, _) = channel();
        let a = channel.publish_default("A");
        channel.publish_default("B");

        assert!(channel.dismiss(a));
        let once = channel.notifications();
        assert!(!channel.dismiss(a));
        assert_eq!(channel.notifications(), once);
    }

    #[test]
    fn notification_expires_after_exactly_the_default_duration() {
        let (mut channel, clock) = channel();
        let id = channel.publish("A", Severity::Info);

        clock.advance_millis(EXPIRY_MS - 1);
        assert!(channel.tick().is_empty());
        assert!(channel.store().contains(id));

        clock.advance_millis(1);
        assert_eq!(channel.tick(), vec![id]);
        assert!(channel.notifications().is_empty());
    }

    #[test]
    fn dismiss_before_expiry_prevents_a_second_removal() {
        let (mut channel, clock) = channel();
        let id = channel.publish("A", Severity::Info);
        assert!(channel.dismiss(id));

        clock.advance_millis(EXPIRY_MS);
        assert!(channel.tick().is_empty());
        assert!(!channel.dismiss(id));
    }

    #[test]
    fn each_notification_expires_on_its_own_schedule() {
        let (mut channel, clock) = channel();
        let a = channel.publish("A", Severity::Info);
        clock.advance_millis(1000);
        let b = channel.publish("B", Severity::Info);

        clock.advance_millis(2000);
        assert_eq!(channel.tick(), vec![a]);
        clock.advance_millis(1000);
        assert_eq!(channel.tick(), vec![b]);
    }

    #[test]
    fn success_pulses_and_error_does_not() {
        let (mut channel, _) = channel();
        channel.publish("boom", Severity::Error);
        channel.publish("careful", Severity::Warning);
        channel.publish("fyi", Severity::Info);
        assert!(!channel.is_pulsing());

        channel.publish("added", Severity::Success);
        assert!(channel.is_pulsing());
    }

    #[test]
    fn pulse_retrigger_counts_from_the_second_trigger() {
        let (mut channel, clock) = channel();
        channel.publish_default("first");
        clock.advance_millis(400);
        channel.publish_default("second");

        clock.advance_millis(PULSE_MS - 400);
        channel.tick();
        assert!(channel.is_pulsing());

        clock.advance_millis(399);
        channel.tick();
        assert!(channel.is_pulsing());

        clock.advance_millis(1);
        channel.tick();
        assert!(!channel.is_pulsing());
    }

    #[test]
    fn animation_finished_stops_the_pulse_early() {
        let (mut channel, clock) = channel();
        channel.publish_default("added");

        assert!(channel.on_animation_finished());
        assert!(!channel.is_pulsing());
        assert_eq!(channel.pulse().deadline(), None);

        clock.advance_millis(PULSE_MS);
        channel.tick();
        assert!(!channel.on_animation_finished());
    }

    #[test]
    fn next_deadline_prefers_the_pulse_window() {
        let (mut channel, clock) = channel();
        let start = clock.now();
        channel.publish_default("added");

        assert_eq!(
            channel.next_deadline(),
            Some(start + std::time::Duration::from_millis(PULSE_MS))
        );

        clock.advance_millis(PULSE_MS);
        channel.tick();
        assert_eq!(
            channel.next_deadline(),
            Some(start + std::time::Duration::from_millis(EXPIRY_MS))
        );
    }

    #[test]
    fn handle_message_routes_every_variant() {
        let (mut channel, clock) = channel();
        let id = channel
            .handle_message(Message::Publish {
                message: "A".to_string(),
                severity: Severity::Success,
            })
            .expect("publish returns an id");
        assert!(channel.is_pulsing());

        channel.handle_message(Message::AnimationFinished);
        assert!(!channel.is_pulsing());

        channel.handle_message(Message::Dismiss(id));
        assert!(channel.notifications().is_empty());

        channel.publish("B", Severity::Info);
        clock.advance_millis(EXPIRY_MS);
        assert_eq!(channel.handle_message(Message::Tick), None);
        assert!(channel.is_idle());
    }

    #[test]
    fn clear_resets_everything() {
        let (mut channel, _) = channel();
        channel.publish_default("A");
        channel.publish("B", Severity::Error);

        channel.clear();
        assert!(channel.is_idle());
        assert_eq!(channel.next_deadline(), None);
    }

    #[test]
    fn small_capacity_from_settings_is_honored() {
        let clock = ManualClock::new();
        let settings = ChannelSettings {
            capacity: QueueCapacity::new(1),
            ..ChannelSettings::default()
        };
        let mut channel = NotificationChannel::with_clock(settings, clock);
        channel.publish("A", Severity::Info);
        channel.publish("B", Severity::Info);
        assert_eq!(messages(&channel), vec!["B"]);
    }

    #[test]
    fn diagnostics_record_the_lifecycle() {
        let (mut channel, clock) = channel();
        let mut collector =
            DiagnosticsCollector::with_start(BufferCapacity::default(), clock.now());
        channel.set_diagnostics(collector.handle());

        let a = channel.publish_default("A");
        channel.publish("B", Severity::Info);
        channel.publish("C", Severity::Info);
        channel.publish("D", Severity::Info);
        clock.advance_millis(EXPIRY_MS);
        channel.tick();

        collector.process_pending();
        let kinds: Vec<&'static str> = collector.events().map(|e| e.kind.type_name()).collect();
        assert_eq!(
            kinds,
            vec![
                "published",
                "pulse_started",
                "published",
                "published",
                "evicted",
                "published",
                "expired",
                "expired",
                "expired",
                "pulse_stopped",
            ]
        );
        assert!(collector.events().any(|e| e.kind
            == DiagnosticEventKind::Evicted {
                id: a,
                severity: Severity::Success
            }));
    }

    #[test]
    fn publish_fires_due_timers_before_evicting() {
        let (mut channel, clock) = channel();
        let mut collector =
            DiagnosticsCollector::with_start(BufferCapacity::default(), clock.now());
        channel.set_diagnostics(collector.handle());

        let a = channel.publish("A", Severity::Info);
        let b = channel.publish("B", Severity::Info);
        clock.advance_millis(2000);
        channel.publish("C", Severity::Info);

        // A and B are due, but nothing has ticked yet.
        clock.advance_millis(1500);
        assert_eq!(messages(&channel), vec!["C"]);

        channel.publish("D", Severity::Info);
        assert_eq!(messages(&channel), vec!["C", "D"]);
        assert_eq!(channel.store().len(), 2);

        collector.process_pending();
        assert!(!collector
            .events()
            .any(|e| matches!(e.kind, DiagnosticEventKind::Evicted { .. })));
        let expired: Vec<_> = collector
            .events()
            .filter_map(|e| match e.kind {
                DiagnosticEventKind::Expired { id } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(expired, vec![a, b]);
    }

    #[test]
    fn dismiss_fires_due_timers_first() {
        let (mut channel, clock) = channel();
        let a = channel.publish("A", Severity::Info);
        clock.advance_millis(1000);
        let b = channel.publish("B", Severity::Info);

        clock.advance_millis(EXPIRY_MS - 1000);
        assert!(!channel.dismiss(a));
        assert_eq!(channel.store().iter().map(Notification::id).collect::<Vec<_>>(), vec![b]);
        assert!(channel.tick().is_empty());
    }
}
