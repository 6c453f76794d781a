//! Product identifiers.
//!
//! Product records come from an external catalog where the identifier may be
//! either a string or a number. `ProductId` keeps whichever form it was given
//! and compares strictly: the string `"1"` and the number `1` are different
//! products.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Opaque product identifier.
///
/// Serializes transparently as the underlying JSON string or number.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::ProductId;
/// let by_sku = ProductId::from("sku-123");
/// let by_number = ProductId::from(123);
///
/// assert_ne!(by_number, ProductId::from("123"));
/// assert_eq!(by_sku.to_string(), "sku-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier: any JSON number, including fractions and values
    /// beyond `i64`.
    Number(Number),
    /// String identifier.
    Text(String),
}

impl ProductId {
    /// Parse user input into an identifier.
    ///
    /// Input that reads as a JSON number becomes a numeric id, anything else
    /// is kept as a string id. Use [`ProductId::from`] with a string to keep
    /// digits as text.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        input
            .parse::<Number>()
            .map_or_else(|_| Self::Text(input.to_string()), Self::Number)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<Number> for ProductId {
    fn from(id: Number) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
