// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Queue**: Maximum number of simultaneously active notifications
//! - **Expiry**: Auto-dismiss delay applied to every notification
//! - **Pulse**: Cart indicator emphasis window
//! - **Diagnostics**: Event buffer bounds

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of notifications visible at once.
pub const DEFAULT_CAPACITY: usize = 3;

/// Minimum queue capacity.
pub const MIN_CAPACITY: usize = 1;

/// Maximum queue capacity.
pub const MAX_CAPACITY: usize = 10;

// ==========================================================================
// Expiry Defaults
// ==========================================================================

/// Default auto-dismiss delay for a notification (in milliseconds).
pub const DEFAULT_EXPIRY_MS: u64 = 3000;

/// Minimum auto-dismiss delay (in milliseconds).
pub const MIN_EXPIRY_MS: u64 = 500;

/// Maximum auto-dismiss delay (in milliseconds).
pub const MAX_EXPIRY_MS: u64 = 60_000;

// ==========================================================================
// Pulse Defaults
// ==========================================================================

/// Default pulse window after the most recent trigger (in milliseconds).
pub const DEFAULT_PULSE_MS: u64 = 600;

/// Minimum pulse window (in milliseconds).
pub const MIN_PULSE_MS: u64 = 50;

/// Maximum pulse window (in milliseconds).
pub const MAX_PULSE_MS: u64 = 5_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Queue validation
    assert!(MIN_CAPACITY > 0);
    assert!(MAX_CAPACITY >= MIN_CAPACITY);
    assert!(DEFAULT_CAPACITY >= MIN_CAPACITY);
    assert!(DEFAULT_CAPACITY <= MAX_CAPACITY);

    // Expiry validation
    assert!(MIN_EXPIRY_MS > 0);
    assert!(MAX_EXPIRY_MS >= MIN_EXPIRY_MS);
    assert!(DEFAULT_EXPIRY_MS >= MIN_EXPIRY_MS);
    assert!(DEFAULT_EXPIRY_MS <= MAX_EXPIRY_MS);

    // Pulse validation
    assert!(MIN_PULSE_MS > 0);
    assert!(MAX_PULSE_MS >= MIN_PULSE_MS);
    assert!(DEFAULT_PULSE_MS >= MIN_PULSE_MS);
    assert!(DEFAULT_PULSE_MS <= MAX_PULSE_MS);

    // The pulse must end well before the notification that caused it.
    assert!(DEFAULT_PULSE_MS < DEFAULT_EXPIRY_MS);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
