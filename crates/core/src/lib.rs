//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `storefront` - Cart store, admin session, theme and dev proxy
//! - `cli` - Command-line cart tooling
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, product records, cart lines and admin identities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
