// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording what happened to notifications.
//!
//! Producers never see this module. A `NotificationChannel` given a
//! [`DiagnosticsHandle`] reports every publish, eviction, expiry, dismissal
//! and pulse transition; the [`DiagnosticsCollector`] stores them in a
//! memory-bounded [`CircularBuffer`] and can export them as JSON.
//!
//! Evictions are the interesting signal: they are notifications nobody had
//! the chance to read.

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, PulseStopReason};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
