//! Shopping cart state store.
//!
//! # Model
//!
//! The store owns the cart lines exclusively. Consumers read [`CartSnapshot`]s
//! and change the cart only through the mutation methods below. Every
//! mutation:
//!
//! 1. builds a new line sequence from the current one,
//! 2. writes the whole sequence as JSON under [`CART_STORAGE_KEY`],
//! 3. hands the new snapshot to every subscriber, in registration order.
//!
//! Loading is the only read. A missing or undecodable entry yields an empty
//! cart and is never reported to consumers.
//!
//! # Example
//!
//! ```rust
//! use shopfront_core::{Product, ProductId};
//! use shopfront_storefront::cart::CartStore;
//! use shopfront_storefront::storage::MemoryStorage;
//!
//! let mut cart = CartStore::load(MemoryStorage::new());
//! cart.add_to_cart(Product::new("A"));
//! cart.add_to_cart(Product::new("A"));
//!
//! assert_eq!(cart.snapshot().get(&ProductId::from("A")).map(|i| i.quantity()), Some(2));
//! ```

mod snapshot;

pub use snapshot::CartSnapshot;

use std::collections::HashSet;
use std::fmt;

use shopfront_core::{CartItem, Product, ProductId};

use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CartSnapshot)>;

/// The authoritative in-memory cart, mirrored into a [`KeyValueStore`].
pub struct CartStore<S> {
    storage: S,
    snapshot: CartSnapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from `storage`.
    ///
    /// Nothing is written back during load.
    pub fn load(storage: S) -> Self {
        let items = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => decode_cart(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored cart is malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored cart, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(lines = items.len(), "Cart loaded");

        Self {
            storage,
            snapshot: CartSnapshot::from(items),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshot.clone()
    }

    /// Register `subscriber` to receive every new snapshot.
    ///
    /// Subscribers are called synchronously after each mutation, in the
    /// order they were registered. They are not called with the current
    /// state on registration.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&CartSnapshot) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Stop notifying the subscriber behind `id`.
    ///
    /// Returns `false` if `id` was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Add one unit of `product`.
    ///
    /// A product not yet in the cart is appended as a new line with quantity 1.
    /// Otherwise its line is replaced in place with the quantity incremented.
    pub fn add_to_cart(&mut self, product: Product) {
        let existing = self
            .snapshot
            .iter()
            .position(|item| item.product_id() == &product.product_id);

        let items = match existing {
            Some(index) => self
                .snapshot
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if i == index {
                        item.incremented()
                    } else {
                        item.clone()
                    }
                })
                .collect(),
            None => {
                tracing::debug!(product_id = %product.product_id, "New cart line");
                self.snapshot
                    .iter()
                    .cloned()
                    .chain(std::iter::once(CartItem::from_product(product)))
                    .collect()
            }
        };

        self.commit(items);
    }

    /// Drop the line for `product_id`. Unknown ids leave the lines unchanged.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        let items = self
            .snapshot
            .iter()
            .filter(|item| item.product_id() != product_id)
            .cloned()
            .collect();

        self.commit(items);
    }

    /// Add `amount` (possibly negative) to the quantity of `product_id`.
    ///
    /// A line whose quantity would reach zero or below is removed. Unknown
    /// ids leave the lines unchanged.
    pub fn update_quantity(&mut self, product_id: &ProductId, amount: i64) {
        let items = self
            .snapshot
            .iter()
            .filter_map(|item| {
                if item.product_id() == product_id {
                    item.adjusted(amount)
                } else {
                    Some(item.clone())
                }
            })
            .collect();

        self.commit(items);
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.commit(Vec::new());
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self, items: Vec<CartItem>) {
        self.snapshot = CartSnapshot::from(items);
        self.persist();

        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.snapshot);
        }
    }

    /// Write the current lines to storage.
    ///
    /// The in-memory cart stays authoritative when the write fails; the next
    /// successful mutation rewrites the full state anyway.
    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.snapshot) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(CART_STORAGE_KEY, &encoded) {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Decode a stored cart.
///
/// Data holding two lines for the same product is rejected like any other
/// malformed entry.
fn decode_cart(raw: &str) -> Result<Vec<CartItem>, serde_json::Error> {
    let items: Vec<CartItem> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(items.len());
    if let Some(dup) = items.iter().find(|item| !seen.insert(item.product_id())) {
        return Err(serde::de::Error::custom(format!(
            "duplicate cart line for product {}",
            dup.product_id()
        )));
    }

    Ok(items)
}
