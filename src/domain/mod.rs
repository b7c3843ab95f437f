// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! - [`QueueCapacity`], [`ExpiryDelay`], [`PulseWindow`]: notification tuning
//! - [`BufferCapacity`]: diagnostic event buffer size

pub mod newtypes;

pub use newtypes::{
    buffer_capacity_bounds, expiry_bounds, pulse_bounds, queue_capacity_bounds, BufferCapacity,
    ExpiryDelay, PulseWindow, QueueCapacity,
};
