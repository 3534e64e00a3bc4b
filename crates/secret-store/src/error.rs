//! Error types for secret storage.

use thiserror::Error;

/// Errors that can occur when writing or removing a credential.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// Filesystem access failed.
    #[error("secret store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store cannot be used (e.g. a poisoned lock).
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}
