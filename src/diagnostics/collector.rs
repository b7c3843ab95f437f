// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing notification events.
//!
//! The channel holds a cheap `DiagnosticsHandle`; the collector drains the
//! handle's queue into a bounded buffer whenever the owner asks it to.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, DiagnosticReport,
    ReportMetadata, SerializableEvent,
};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Sending never blocks: events are dropped when the queue is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records an event that happened at `at`.
    ///
    /// This method is non-blocking and will drop the event if the
    /// internal channel is full (backpressure protection).
    pub fn log(&self, kind: DiagnosticEventKind, at: Instant) {
        let _ = self
            .event_tx
            .try_send(DiagnosticEvent::with_timestamp(kind, at));
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(
        &self,
        kind: DiagnosticEventKind,
        at: Instant,
    ) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx
            .try_send(DiagnosticEvent::with_timestamp(kind, at))
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, used for relative event offsets.
    collection_started_at: Instant,
    /// Wall-clock start, used for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a collector whose offsets count from now.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_start(capacity, Instant::now())
    }

    /// Creates a collector whose offsets count from `started_at`.
    ///
    /// Pass the channel clock's current instant when running on virtual time.
    #[must_use]
    pub fn with_start(capacity: BufferCapacity, started_at: Instant) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: started_at,
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves all pending events from the channel into the buffer.
    ///
    /// Returns how many events were drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            drained += 1;
        }
        drained
    }

    /// Iterates over buffered events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Returns the number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops all buffered events.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Builds a report from the buffered events as of `now`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn build_report(&self, now: Instant) -> DiagnosticReport {
        let collection_duration_ms = now
            .saturating_duration_since(self.collection_started_at)
            .as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }

    /// Exports the buffered events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self, now: Instant) -> serde_json::Result<String> {
        self.build_report(now).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationId;
    use std::time::Duration;

    fn dismissed(n: u64) -> DiagnosticEventKind {
        DiagnosticEventKind::Dismissed {
            id: NotificationId::from_raw(n),
        }
    }

    #[test]
    fn events_are_buffered_after_processing() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();

        handle.log(dismissed(1), Instant::now());
        handle.log(dismissed(2), Instant::now());
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 2);
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();
        let now = Instant::now();

        for i in 0..DEFAULT_CHANNEL_CAPACITY {
            handle.log(dismissed(i as u64), now);
        }
        assert!(matches!(
            handle.try_log(dismissed(0), now),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn buffer_keeps_only_the_newest_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let handle = collector.handle();
        let now = Instant::now();

        // BufferCapacity::new(0) clamps to the minimum of 100.
        for round in 0..2 {
            for i in 0..100 {
                handle.log(dismissed(round * 100 + i), now);
            }
            collector.process_pending();
        }

        assert_eq!(collector.len(), 100);
        assert_eq!(collector.events().next().map(|e| e.kind.clone()), Some(dismissed(100)));
    }

    #[test]
    fn export_json_reports_relative_offsets() {
        let start = Instant::now();
        let mut collector = DiagnosticsCollector::with_start(BufferCapacity::default(), start);
        collector
            .handle()
            .log(DiagnosticEventKind::PulseStarted, start + Duration::from_millis(40));
        collector.process_pending();

        let json = collector
            .export_json(start + Duration::from_millis(100))
            .expect("export");
        let report: DiagnosticReport = serde_json::from_str(&json).expect("parse");

        assert_eq!(report.metadata.event_count, 1);
        assert_eq!(report.metadata.collection_duration_ms, 100);
        assert_eq!(report.events[0].timestamp_ms, 40);
        assert_eq!(report.events[0].kind, DiagnosticEventKind::PulseStarted);
    }
}
