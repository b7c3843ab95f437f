// SPDX-License-Identifier: MPL-2.0
//! Cart collaborator and the "item added" producer.
//!
//! The notification core never looks inside the cart. This module only needs
//! enough of it to count items for the badge and to announce additions.

use crate::clock::Clock;
use crate::context::Session;
use crate::error::Result;
use crate::notifications::{NotificationId, Severity};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The slice of a product the cart cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
        }
    }
}

/// Per-product quantities.
///
/// A product absent from the map has quantity 0; zero entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartTotal {
    items: BTreeMap<ProductId, NonZeroU32>,
}

impl CartTotal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, returning its new quantity.
    pub fn add(&mut self, product: &Product) -> NonZeroU32 {
        let quantity = self
            .items
            .entry(product.id.clone())
            .and_modify(|q| *q = q.saturating_add(1))
            .or_insert(NonZeroU32::MIN);
        *quantity
    }

    /// Returns the quantity of a product, 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.items.get(id).map_or(0, |q| q.get())
    }

    /// Sum of all quantities, as shown on the cart badge.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .values()
            .fold(0u32, |total, q| total.saturating_add(q.get()))
    }

    /// Cart lines ordered by product id.
    pub fn lines(&self) -> impl Iterator<Item = (&ProductId, NonZeroU32)> {
        self.items.iter().map(|(id, q)| (id, *q))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Text shown when a product lands in the cart.
#[must_use]
pub fn added_message(product: &Product) -> String {
    format!("Added \"{}\" to cart!", product.name)
}

/// Adds `product` to the session's cart and announces it.
///
/// The announcement is a success notification, so it pulses the cart badge.
///
/// # Errors
///
/// Returns [`crate::error::MisuseError`] if the session provides no cart or
/// no notification channel. Nothing is modified in that case.
pub fn add_to_cart<C: Clock>(
    session: &mut Session<C>,
    product: &Product,
) -> Result<NotificationId> {
    // Check both collaborators before touching either.
    session.notifications()?;
    let quantity = session.cart_mut()?.add(product);
    log::debug!("Cart now holds {quantity} x {}", product.id);

    let id = session
        .notifications_mut()?
        .publish(added_message(product), Severity::Success);
    Ok(id)
}
