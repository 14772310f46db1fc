use thiserror::Error;

use crate::store::StoreError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Underlying key-value store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),
}
