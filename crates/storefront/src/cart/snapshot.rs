//! Immutable views of the cart.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use shopfront_core::{CartItem, ProductId};

/// A point-in-time, read-only copy of the cart lines.
///
/// Cloning is cheap: all clones share one allocation. A snapshot never
/// changes after it is handed out; mutations on the store produce a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    items: Arc<[CartItem]>,
}

impl CartSnapshot {
    /// Number of distinct product lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Find the line for `product_id`.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }
}

impl Deref for CartSnapshot {
    type Target = [CartItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<CartItem>> for CartSnapshot {
    fn from(items: Vec<CartItem>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl Serialize for CartSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (*self.items).serialize(serializer)
    }
}
