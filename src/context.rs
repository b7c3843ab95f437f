// SPDX-License-Identifier: MPL-2.0
//! Explicit session scope for the notification channel and the cart.
//!
//! Components receive the session by reference instead of reaching for a
//! global. Asking for a collaborator the session was never given is a
//! [`MisuseError`], reported at the call site.

use crate::cart::CartTotal;
use crate::clock::{Clock, SystemClock};
use crate::error::{MisuseError, Result};
use crate::notifications::NotificationChannel;

/// Collaborators shared by the producers and the render layer of one session.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    notifications: Option<NotificationChannel<C>>,
    cart: Option<CartTotal>,
}

impl<C: Clock> Default for Session<C> {
    fn default() -> Self {
        Self {
            notifications: None,
            cart: None,
        }
    }
}

impl<C: Clock> Session<C> {
    /// Creates a session providing nothing yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a session providing both collaborators.
    #[must_use]
    pub fn new(notifications: NotificationChannel<C>, cart: CartTotal) -> Self {
        Self {
            notifications: Some(notifications),
            cart: Some(cart),
        }
    }

    /// Installs the notification channel, replacing any previous one.
    pub fn provide_notifications(&mut self, channel: NotificationChannel<C>) {
        self.notifications = Some(channel);
    }

    /// Installs the cart, replacing any previous one.
    pub fn provide_cart(&mut self, cart: CartTotal) {
        self.cart = Some(cart);
    }

    /// # Errors
    ///
    /// [`MisuseError::NoNotificationChannel`] if none was provided.
    pub fn notifications(&self) -> Result<&NotificationChannel<C>> {
        self.notifications
            .as_ref()
            .ok_or_else(|| MisuseError::NoNotificationChannel.into())
    }

    /// # Errors
    ///
    /// [`MisuseError::NoNotificationChannel`] if none was provided.
    pub fn notifications_mut(&mut self) -> Result<&mut NotificationChannel<C>> {
        self.notifications
            .as_mut()
            .ok_or_else(|| MisuseError::NoNotificationChannel.into())
    }

    /// # Errors
    ///
    /// [`MisuseError::NoCart`] if none was provided.
    pub fn cart(&self) -> Result<&CartTotal> {
        self.cart.as_ref().ok_or_else(|| MisuseError::NoCart.into())
    }

    /// # Errors
    ///
    /// [`MisuseError::NoCart`] if none was provided.
    pub fn cart_mut(&mut self) -> Result<&mut CartTotal> {
        self.cart.as_mut().ok_or_else(|| MisuseError::NoCart.into())
    }
}
