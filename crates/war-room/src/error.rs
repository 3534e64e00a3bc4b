//! Error types for War Room operations.

use incident_client::ClientError;
use secret_store::SecretStoreError;
use thiserror::Error;

/// Errors surfaced by settings operations and startup.
///
/// Refreshes never fail: feed errors are answered with mock data.
#[derive(Debug, Error)]
pub enum WarRoomError {
    /// The credential was empty after trimming.
    #[error("credential is empty")]
    EmptyCredential,

    /// The secret store rejected a write or delete.
    #[error("secret store error: {0}")]
    SecretStore(#[from] SecretStoreError),

    /// The incident client could not be built.
    #[error("incident client error: {0}")]
    Client(#[from] ClientError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
