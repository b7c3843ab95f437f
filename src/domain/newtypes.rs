// SPDX-License-Identifier: MPL-2.0
//! Notification and diagnostics newtypes.
//!
//! This module provides type-safe wrappers for tunable values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Bounds
// =============================================================================

/// Queue capacity bounds (1 to 10 notifications).
pub mod queue_capacity_bounds {
    /// Minimum queue capacity.
    pub const MIN: usize = 1;
    /// Maximum queue capacity.
    pub const MAX: usize = 10;
    /// Default queue capacity.
    pub const DEFAULT: usize = 3;
}

/// Expiry delay bounds in milliseconds.
pub mod expiry_bounds {
    /// Minimum expiry delay.
    pub const MIN: u64 = 500;
    /// Maximum expiry delay.
    pub const MAX: u64 = 60_000;
    /// Default expiry delay.
    pub const DEFAULT: u64 = 3000;
}

/// Pulse window bounds in milliseconds.
pub mod pulse_bounds {
    /// Minimum pulse window.
    pub const MIN: u64 = 50;
    /// Maximum pulse window.
    pub const MAX: u64 = 5_000;
    /// Default pulse window.
    pub const DEFAULT: u64 = 600;
}

/// Buffer capacity bounds (100 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 100;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1000;
}

// =============================================================================
// QueueCapacity
// =============================================================================

/// Maximum number of simultaneously active notifications.
///
/// Values outside 1–10 are clamped, so a queue can never be configured
/// with zero slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacity(usize);

impl QueueCapacity {
    /// Creates a new queue capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(queue_capacity_bounds::MIN, queue_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for QueueCapacity {
    fn default() -> Self {
        Self(queue_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// ExpiryDelay
// =============================================================================

/// Time a notification stays active before it is removed automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDelay(u64);

impl ExpiryDelay {
    /// Creates a new expiry delay in milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(expiry_bounds::MIN, expiry_bounds::MAX))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ExpiryDelay {
    fn default() -> Self {
        Self(expiry_bounds::DEFAULT)
    }
}

// =============================================================================
// PulseWindow
// =============================================================================

/// Length of the pulse measured from the most recent trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseWindow(u64);

impl PulseWindow {
    /// Creates a new pulse window in milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(pulse_bounds::MIN, pulse_bounds::MAX))
    }

    /// Returns the window in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for PulseWindow {
    fn default() -> Self {
        Self(pulse_bounds::DEFAULT)
    }
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Buffer capacity for diagnostic events.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (100–10000 events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
