// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for the notification subsystem.
//!
//! Events carry identities and severities only. Message text is never
//! recorded, since it may contain product names or other user data.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{NotificationId, Severity};

/// Why the pulse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseStopReason {
    /// The deactivation deadline passed.
    Timer,
    /// The indicator reported that its animation completed.
    AnimationFinished,
    /// The channel was cleared.
    Cleared,
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic).
    pub timestamp: Instant,
    /// The event data.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current instant.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Instant::now())
    }

    /// Creates an event with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// Things that happen to notifications and to the pulse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification was admitted.
    Published {
        id: NotificationId,
        severity: Severity,
    },
    /// A notification was pushed out by a newer one.
    Evicted {
        id: NotificationId,
        severity: Severity,
    },
    /// A notification's timer fired.
    Expired { id: NotificationId },
    /// A notification was closed explicitly.
    Dismissed { id: NotificationId },
    /// The pulse went from idle to active.
    PulseStarted,
    /// The pulse window restarted while already active.
    PulseRestarted,
    /// The pulse went back to idle.
    PulseStopped { reason: PulseStopReason },
}

impl DiagnosticEventKind {
    /// Returns the snake_case name used in reports.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            DiagnosticEventKind::Published { .. } => "published",
            DiagnosticEventKind::Evicted { .. } => "evicted",
            DiagnosticEventKind::Expired { .. } => "expired",
            DiagnosticEventKind::Dismissed { .. } => "dismissed",
            DiagnosticEventKind::PulseStarted => "pulse_started",
            DiagnosticEventKind::PulseRestarted => "pulse_restarted",
            DiagnosticEventKind::PulseStopped { .. } => "pulse_stopped",
        }
    }
}
