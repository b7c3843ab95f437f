// SPDX-License-Identifier: MPL-2.0
//! `cart_snackbar` is the notification core of a storefront: a bounded,
//! insertion-ordered snackbar queue with per-item auto-expiry, plus the pulse
//! that draws attention to the cart badge when an item is added.
//!
//! Rendering is left to the caller. A render layer reads
//! [`NotificationChannel::notifications`](notifications::NotificationChannel::notifications)
//! and [`NotificationChannel::is_pulsing`](notifications::NotificationChannel::is_pulsing)
//! each turn, and reports close clicks and finished animations back.

#![doc(html_root_url = "https://docs.rs/cart_snackbar/0.1.0")]

pub mod cart;
pub mod clock;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
