//! Configuration for the incident client.

use std::env;
use std::time::Duration;

use crate::error::ClientError;

/// Default incident.io API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.incident.io";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for connecting to the incident feed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.incident.io").
    pub base_url: String,
    /// Upper bound on a whole request, connect to last body byte.
    pub timeout: Duration,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("war-room/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `INCIDENT_IO_API_URL` - API base URL (default: https://api.incident.io)
    /// - `INCIDENT_IO_TIMEOUT_SECS` - Request timeout in seconds (default: 15)
    pub fn from_env() -> Result<Self, ClientError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("INCIDENT_IO_API_URL") {
            config.base_url = url;
        }

        if let Ok(raw) = env::var("INCIDENT_IO_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ClientError::Config(format!("Invalid INCIDENT_IO_TIMEOUT_SECS: {}", e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Get the incidents list endpoint URL.
    pub fn incidents_url(&self) -> String {
        format!("{}/v2/incidents", self.base_url.trim_end_matches('/'))
    }
}
