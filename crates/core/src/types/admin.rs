//! Admin identity carried by the admin session.

use serde::{Deserialize, Serialize};

/// The signed-in admin, as far as the storefront knows.
///
/// This is a plain value holder. No validation, expiry or persistence is
/// attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    /// Admin account identifier.
    pub id: String,
    /// Display name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AdminIdentity {
    /// Create an identity with no display name.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}
