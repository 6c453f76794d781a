//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file-backed storage, across reloads
//! - `dev_proxy` - Dev server forwarding to a live upstream on an ephemeral port
//!
//! No external services are required; upstreams are spawned in-process.
