//! Shopfront Storefront library.
//!
//! Client-side storefront state and the local dev server, as a library so
//! it can be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`cart`] - Shopping cart store with persistence and subscriptions
//! - [`admin`] - Admin session holder
//! - [`storage`] - Durable key-value storage backends
//! - [`theme`] - Theme palette
//! - [`proxy`] - Dev proxy rules and forwarding
//! - [`routes`] - Dev server router

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod config;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod storage;
pub mod theme;
