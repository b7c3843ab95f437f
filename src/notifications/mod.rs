// SPDX-License-Identifier: MPL-2.0
//! Snackbar notification system for user feedback.
//!
//! Notifications appear temporarily to confirm an action (an item added to
//! the cart, an error while doing so) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - `Notification` data and `Severity` levels
//! - [`store`] - bounded, insertion-ordered `NotificationStore`
//! - [`scheduler`] - per-notification `ExpiryScheduler`
//! - [`pulse`] - `PulseCoordinator` for the cart indicator
//! - [`channel`] - `NotificationChannel`, the facade producers talk to
//!
//! # Usage
//!
//! ```
//! use cart_snackbar::notifications::{NotificationChannel, Severity};
//!
//! let mut channel = NotificationChannel::new();
//! let id = channel.publish("Added \"Nike Air\" to cart!", Severity::Success);
//! assert!(channel.is_pulsing());
//!
//! // Close button
//! channel.dismiss(id);
//! assert!(channel.notifications().is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - At most 3 notifications at once; a 4th pushes out the oldest
//! - Every notification expires 3s after it was published
//! - Only success notifications pulse the cart, for 600ms after the latest one

pub mod channel;
pub mod notification;
pub mod pulse;
pub mod scheduler;
pub mod store;

pub use channel::{ChannelSettings, Message as NotificationMessage, NotificationChannel};
pub use notification::{Notification, NotificationId, Severity, UnknownSeverity};
pub use pulse::{PulseCoordinator, PulseTransition};
pub use scheduler::ExpiryScheduler;
pub use store::{NotificationStore, Published};
