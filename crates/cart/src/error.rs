//! Cart error types.
//!
//! The public mutation API never returns these: load and persist failures are
//! logged and the cart degrades to in-memory state. They exist so the internal
//! helpers can use `?` and so callers of [`crate::CartStore::reload`] can see
//! what went wrong.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The durable store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
