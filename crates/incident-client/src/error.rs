//! Error types for building the incident client.

use thiserror::Error;

/// Errors raised while configuring or constructing an [`IncidentClient`](crate::IncidentClient).
///
/// Feed call failures are reported as [`FetchError`](incident_core::FetchError) instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
