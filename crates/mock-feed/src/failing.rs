//! Failing feed implementation - always returns the same error.

use async_trait::async_trait;
use incident_core::{FetchError, Incident, IncidentFeed};

/// A feed whose every call fails with a fixed [`FetchError`].
#[derive(Debug, Clone)]
pub struct FailingFeed {
    error: FetchError,
}

impl FailingFeed {
    pub fn new(error: FetchError) -> Self {
        Self { error }
    }

    /// A feed that rejects every credential with HTTP 401.
    pub fn unauthorized() -> Self {
        Self::new(FetchError::HttpStatus(401))
    }
}

#[async_trait]
impl IncidentFeed for FailingFeed {
    async fn fetch_incidents(&self, _credential: &str) -> Result<Vec<Incident>, FetchError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_feed() {
        let feed = FailingFeed::unauthorized();
        assert_eq!(
            feed.fetch_incidents("key").await,
            Err(FetchError::HttpStatus(401))
        );

        let feed = FailingFeed::new(FetchError::Decode("eof".to_string()));
        assert_eq!(
            feed.fetch_incidents("key").await,
            Err(FetchError::Decode("eof".to_string()))
        );
    }
}
