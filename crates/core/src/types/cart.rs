//! Cart line items.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{PRODUCT_ID_FIELD, Product, ProductId};

/// JSON field holding a line's quantity.
pub const QUANTITY_FIELD: &str = "quantity";

/// One product line in the cart.
///
/// Serializes as the product record with a `quantity` field added, e.g.
/// `{"productId": "A", "name": "Tee", "quantity": 2}`. The quantity is
/// always at least 1; a stored quantity of zero fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    product: Product,
    quantity: NonZeroU32,
}

impl CartItem {
    /// Start a new line for `product` with a quantity of 1.
    ///
    /// `productId` and `quantity` entries in the source record's metadata
    /// are dropped, so the line serializes exactly one of each.
    #[must_use]
    pub fn from_product(mut product: Product) -> Self {
        product.fields.remove(PRODUCT_ID_FIELD);
        product.fields.remove(QUANTITY_FIELD);
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// The line's product identifier.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.product_id
    }

    /// The product record this line was created from.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Number of units on this line.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Return this line with its quantity increased by one.
    #[must_use]
    pub fn incremented(&self) -> Self {
        Self {
            product: self.product.clone(),
            quantity: self.quantity.saturating_add(1),
        }
    }

    /// Return this line with `amount` added to its quantity.
    ///
    /// Returns `None` when the resulting quantity would be zero or negative,
    /// meaning the line should leave the cart. Quantities above `u32::MAX`
    /// saturate.
    #[must_use]
    pub fn adjusted(&self, amount: i64) -> Option<Self> {
        let next = i64::from(self.quantity.get()).saturating_add(amount);
        if next <= 0 {
            return None;
        }
        let clamped = u32::try_from(next).unwrap_or(u32::MAX);
        let quantity = NonZeroU32::new(clamped)?;
        Some(Self {
            product: self.product.clone(),
            quantity,
        })
    }
}
