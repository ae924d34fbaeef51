//! Key-value persistence boundary.
//!
//! Every surface that keeps state between sessions (cart, favorites) writes a
//! complete serialized value under a single constant key. Values are opaque
//! strings to the store; callers own the encoding.
//!
//! Two backends are provided:
//! - [`MemoryStore`] - process-local map, used by tests and ephemeral carts
//! - [`FileStore`] - one JSON file per key inside a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Key under which the cart snapshot is stored.
pub const CART_KEY: &str = "cart";

/// Key under which the favorite product ids are stored.
pub const FAVORITES_KEY: &str = "favorites";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A string key-value store with whole-value replacement semantics.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refused the deletion.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read a value, treating backend failures as absence.
///
/// Surfaces rehydrate once on start-up and must come up empty rather than
/// fail when their stored state cannot be read.
pub(crate) fn read_or_absent<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, starting empty");
            None
        }
    }
}
