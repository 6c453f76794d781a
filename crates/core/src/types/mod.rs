//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod admin;
pub mod cart;
pub mod id;
pub mod product;

pub use admin::AdminIdentity;
pub use cart::{CartItem, QUANTITY_FIELD};
pub use id::ProductId;
pub use product::{PRODUCT_ID_FIELD, Product, ProductError};
