//! State store error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors from reading or writing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The state file exists but could not be read
    #[error("failed to read state file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The state file could not be written
    #[error("failed to write state file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The state file does not hold a JSON object
    #[error("state file {} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    /// A value could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value failed domain validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}
