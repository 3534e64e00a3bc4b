//! incident.io incidents feed HTTP client.

use async_trait::async_trait;
use incident_core::{FetchError, Incident, IncidentFeed, IncidentsResponse};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the incident.io incidents list endpoint.
#[derive(Clone)]
pub struct IncidentClient {
    http: Client,
    config: ClientConfig,
}

impl IncidentClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the full incident list with the given bearer credential.
    pub async fn fetch(&self, credential: &str) -> Result<Vec<Incident>, FetchError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(FetchError::NoCredential);
        }

        let url = self.config.incidents_url();
        debug!("Fetching incidents: {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", credential))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Incident feed returned HTTP {}", status);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let decoded: IncidentsResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!("Decoded {} incidents", decoded.incidents.len());
        Ok(decoded.incidents)
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        let cause = if error.is_timeout() {
            format!("request timed out after {:?}", self.config.timeout)
        } else {
            error.to_string()
        };
        warn!("Incident feed transport failure: {}", cause);
        FetchError::Transport(cause)
    }
}

#[async_trait]
impl IncidentFeed for IncidentClient {
    async fn fetch_incidents(&self, credential: &str) -> Result<Vec<Incident>, FetchError> {
        self.fetch(credential).await
    }

    fn name(&self) -> &str {
        "incident.io"
    }
}

impl std::fmt::Debug for IncidentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncidentClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_credential_is_not_sent() {
        // Port 9 (discard) would fail if a request were attempted.
        let client = IncidentClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        assert_eq!(client.fetch("").await, Err(FetchError::NoCredential));
        assert_eq!(client.fetch("  \n").await, Err(FetchError::NoCredential));
    }

    #[test]
    fn test_debug_output() {
        let client = IncidentClient::new(ClientConfig::default()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.incident.io"));
    }
}
