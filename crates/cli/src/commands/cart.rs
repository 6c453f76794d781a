//! Cart commands over the file-backed store.

use std::path::Path;

use serde_json::Value;
use shopfront_core::{Product, ProductError, ProductId};
use shopfront_storefront::cart::CartStore;
use shopfront_storefront::storage::{FileStorage, StorageError};
use thiserror::Error;
use tracing::info;

/// Errors parsing command-line product data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("metadata must be KEY=VALUE, got '{0}'")]
    Malformed(String),
    #[error("metadata key '{0}' is reserved")]
    Reserved(String),
    #[error("product record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// How a command-line product identifier is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdForm {
    /// Numbers become numeric ids, anything else a string id.
    Lenient,
    /// Always a string id, so `"42"` can be addressed.
    Text,
}

impl IdForm {
    #[must_use]
    pub const fn from_flag(text_id: bool) -> Self {
        if text_id { Self::Text } else { Self::Lenient }
    }

    fn parse(self, input: &str) -> ProductId {
        match self {
            Self::Lenient => ProductId::parse_lenient(input),
            Self::Text => ProductId::from(input),
        }
    }
}

/// Open the cart stored at `path`.
///
/// # Errors
///
/// Returns `StorageError` if the storage file exists but cannot be read.
pub fn open(path: &Path) -> Result<CartStore<FileStorage>, StorageError> {
    let storage = FileStorage::open(path)?;
    info!(path = %path.display(), "Using cart storage");
    Ok(CartStore::load(storage))
}

/// Log every cart line and the total unit count.
pub fn show(cart: &CartStore<FileStorage>) {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        info!("Cart is empty");
        return;
    }

    for item in snapshot.iter() {
        let details = Value::Object(item.product().fields.clone());
        info!("  {} x{} {}", item.product_id(), item.quantity(), details);
    }
    info!(
        "{} line(s), {} item(s)",
        snapshot.line_count(),
        snapshot.item_count()
    );
}

/// Add one unit of `product`.
pub fn add(cart: &mut CartStore<FileStorage>, product: Product) {
    info!(product_id = %product.product_id, "Adding to cart");
    cart.add_to_cart(product);
}

/// Remove the line for `product_id`.
pub fn remove(cart: &mut CartStore<FileStorage>, product_id: &str, form: IdForm) {
    let id = form.parse(product_id);
    info!(product_id = %id, "Removing from cart");
    cart.remove_from_cart(&id);
}

/// Change the quantity of `product_id` by `amount`.
pub fn update(cart: &mut CartStore<FileStorage>, product_id: &str, form: IdForm, amount: i64) {
    let id = form.parse(product_id);
    info!(product_id = %id, amount, "Updating quantity");
    cart.update_quantity(&id, amount);
}

/// Parse a whole product record given as a JSON object.
///
/// # Errors
///
/// Returns `InputError` if `raw` is not JSON or has no valid `productId`.
pub fn parse_record(raw: &str) -> Result<Product, InputError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(Product::from_value(value)?)
}

/// Build a product record from an identifier and `key=value` metadata.
///
/// Values that parse as JSON keep their JSON type; anything else is a string.
///
/// # Errors
///
/// Returns `InputError` if a metadata entry is malformed or uses a reserved key.
pub fn build_product(
    product_id: &str,
    form: IdForm,
    meta: &[String],
) -> Result<Product, InputError> {
    let mut product = Product::new(form.parse(product_id));

    for entry in meta {
        let (key, raw) = entry
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| InputError::Malformed(entry.clone()))?;
        if key == shopfront_core::PRODUCT_ID_FIELD || key == shopfront_core::QUANTITY_FIELD {
            return Err(InputError::Reserved(key.to_string()));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        product = product.with_field(key, value);
    }

    Ok(product)
}
