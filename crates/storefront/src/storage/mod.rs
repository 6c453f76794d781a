//! Durable local key-value storage.
//!
//! Mirrors the browser's local storage: a flat map from string keys to
//! string values, read and written synchronously. The cart store keeps its
//! whole state under a single key.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - `HashMap`-backed, lost when dropped
//! - [`FileStorage`] - a single JSON object on disk, rewritten on every write

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default location of the file-backed store.
pub const DEFAULT_STORAGE_PATH: &str = ".shopfront/storage.json";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded.
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A synchronous string-keyed store.
///
/// Removing a missing key is not an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
