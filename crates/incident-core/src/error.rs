//! Error types for incident feed calls.

use thiserror::Error;

/// Reasons a feed call did not produce an incident list.
///
/// Every variant is recoverable: the orchestrator answers all of them by
/// showing mock data for that cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No usable credential was available, so no request was sent.
    #[error("no credential configured")]
    NoCredential,

    /// The feed answered with a non-2xx status.
    #[error("incident feed returned HTTP {0}")]
    HttpStatus(u16),

    /// The request never produced a response (DNS, TLS, connect, reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The feed answered 2xx but the body was not an incident list.
    #[error("could not decode incident list: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether the error came from talking to the feed rather than from
    /// missing configuration.
    pub fn is_feed_failure(&self) -> bool {
        !matches!(self, FetchError::NoCredential)
    }
}
