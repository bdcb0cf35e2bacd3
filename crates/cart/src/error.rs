//! Cart error types.
//!
//! Out-of-bounds mutations are not errors here: the service clamps or
//! ignores them. The only thing that can fail is the storage slot.

use thiserror::Error;

/// Errors from the durable snapshot slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from the slot backend.
    #[error("Storage database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The snapshot could not be serialized or parsed.
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot slot failed.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Convenience type alias for cart results.
pub type Result<T> = std::result::Result<T, CartError>;
