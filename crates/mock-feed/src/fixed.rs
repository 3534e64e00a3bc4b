//! Static feed implementation - returns a fixed incident list.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use incident_core::{FetchError, Incident, IncidentFeed};
use tokio::time::sleep;

/// A feed that returns the same incident list on every call.
///
/// Records each credential as the call arrives, so tests can check what a
/// caller sent even when the response is still pending. An optional
/// response delay stands in for a slow or hung API.
#[derive(Debug, Default)]
pub struct StaticFeed {
    incidents: Vec<Incident>,
    response_delay: Duration,
    credentials: Mutex<Vec<String>>,
}

impl StaticFeed {
    /// Create a feed returning `incidents` immediately.
    pub fn new(incidents: Vec<Incident>) -> Self {
        Self {
            incidents,
            response_delay: Duration::ZERO,
            credentials: Mutex::new(Vec::new()),
        }
    }

    /// Create a feed returning an empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Hold every response for `delay` before answering.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay
    }

    /// Credentials received so far, oldest first.
    pub fn credentials(&self) -> Vec<String> {
        self.credentials
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.credentials().len()
    }
}

#[async_trait]
impl IncidentFeed for StaticFeed {
    async fn fetch_incidents(&self, credential: &str) -> Result<Vec<Incident>, FetchError> {
        if let Ok(mut seen) = self.credentials.lock() {
            seen.push(credential.to_string());
        }
        if !self.response_delay.is_zero() {
            sleep(self.response_delay).await;
        }
        Ok(self.incidents.clone())
    }

    fn name(&self) -> &str {
        "StaticFeed"
    }
}
