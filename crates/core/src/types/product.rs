//! Product records as handed to the cart.
//!
//! The cart only relies on `productId`. Every other field on the source
//! record (title, price, image, ...) is carried along untouched so that
//! consumers can render it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::ProductId;

/// JSON field holding the product identifier.
pub const PRODUCT_ID_FIELD: &str = "productId";

/// Errors building a [`Product`] from an untyped record.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The record is not a JSON object.
    #[error("product record must be a JSON object")]
    NotAnObject,

    /// The record has no usable `productId`.
    #[error("product record has no valid productId: {0}")]
    InvalidId(#[source] serde_json::Error),
}

/// A product record: an identifier plus arbitrary metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Remaining fields of the source record.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Create a product with no metadata.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            fields: Map::new(),
        }
    }

    /// Attach a metadata field, replacing any previous value under `key`.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Build a product from an untyped JSON record.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` if the record is not an object or its
    /// `productId` is missing or not a string/integer.
    pub fn from_value(value: Value) -> Result<Self, ProductError> {
        let Value::Object(mut fields) = value else {
            return Err(ProductError::NotAnObject);
        };
        let raw_id = fields.remove(PRODUCT_ID_FIELD).unwrap_or(Value::Null);
        let product_id = serde_json::from_value(raw_id).map_err(ProductError::InvalidId)?;
        Ok(Self { product_id, fields })
    }

    /// Look up a metadata field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_keeps_metadata() {
        let product = Product::from_value(json!({
            "productId": "A",
            "name": "Pineapple Tee",
            "price": 25
        }))
        .unwrap();

        assert_eq!(product.product_id, ProductId::from("A"));
        assert_eq!(product.field("name"), Some(&json!("Pineapple Tee")));
        assert_eq!(product.field("price"), Some(&json!(25)));
        assert!(product.field(PRODUCT_ID_FIELD).is_none());
    }

    #[test]
    fn test_from_value_requires_id() {
        let err = Product::from_value(json!({"name": "no id"})).unwrap_err();
        assert!(matches!(err, ProductError::InvalidId(_)));
    }

    #[test]
    fn test_from_value_requires_object() {
        let err = Product::from_value(json!(["A"])).unwrap_err();
        assert!(matches!(err, ProductError::NotAnObject));
    }

    #[test]
    fn test_serializes_flat() {
        let product = Product::new(9).with_field("name", "Mug");
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value, json!({"productId": 9, "name": "Mug"}));
    }
}
