//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a payload that does not parse.
    #[error("Catalog payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
