//! Durable key/value storage for the persisted cart.
//!
//! The cart writes one string value under one key. Back-ends implement
//! [`KeyValueStore`]; reads and writes are synchronous.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a [`KeyValueStore`] back-end.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key is empty or contains characters outside `[A-Za-z0-9._-]`.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key/value store that survives process restarts.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the back-end cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the back-end cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the back-end cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Check that `key` is a non-empty run of `[A-Za-z0-9._-]` and not a dot path.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if key.is_empty() || key == "." || key == ".." || !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
