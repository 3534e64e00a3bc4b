//! The IncidentFeed trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::Incident;

/// A source of incident snapshots.
///
/// Implemented by the live HTTP client and by the in-memory feeds used in
/// tests. The trait is object-safe, and `Arc<F>` forwards to `F` so a feed can
/// be shared with the caller that built it.
#[async_trait]
pub trait IncidentFeed: Send + Sync {
    /// Fetch the current incident list using the given bearer credential.
    ///
    /// The credential is expected to be trimmed and non-empty; implementations
    /// return [`FetchError::NoCredential`] instead of sending an empty one.
    /// The list is returned in feed order, untruncated.
    async fn fetch_incidents(&self, credential: &str) -> Result<Vec<Incident>, FetchError>;

    /// Get a human-readable name for this feed.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: IncidentFeed + ?Sized> IncidentFeed for Arc<T> {
    async fn fetch_incidents(&self, credential: &str) -> Result<Vec<Incident>, FetchError> {
        (**self).fetch_incidents(credential).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
