//! Credential management for the dashboard's settings surface.

use incident_core::{FetchError, IncidentFeed};
use secret_store::{ExposeSecret, SecretStore};
use tracing::info;

use crate::error::WarRoomError;
use crate::orchestrator::RefreshOrchestrator;
use crate::state::RefreshOutcome;

/// Characters of the stored credential shown in the settings preview.
pub const PREVIEW_CHARS: usize = 8;

/// Result of probing the feed with a candidate credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    /// The feed answered; `incident_count` is the untruncated size.
    Connected { incident_count: usize },
    /// The feed call failed.
    Failed(FetchError),
}

impl ConnectionCheck {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionCheck::Connected { .. })
    }
}

impl<F: IncidentFeed, S: SecretStore> RefreshOrchestrator<F, S> {
    /// Store a new credential and refresh immediately.
    pub async fn save_credential(&self, raw: &str) -> Result<RefreshOutcome, WarRoomError> {
        let credential = raw.trim();
        if credential.is_empty() {
            return Err(WarRoomError::EmptyCredential);
        }

        self.secrets().set(credential)?;
        info!("Saved incident.io credential");

        Ok(self.refresh_queued().await)
    }

    /// Remove the stored credential and refresh, which shows mock data.
    pub async fn clear_credential(&self) -> Result<RefreshOutcome, WarRoomError> {
        self.secrets().delete()?;
        info!("Cleared incident.io credential");

        Ok(self.refresh_queued().await)
    }

    /// Call the feed once with `raw` without touching the dashboard state.
    pub async fn test_connection(&self, raw: &str) -> Result<ConnectionCheck, WarRoomError> {
        let credential = raw.trim();
        if credential.is_empty() {
            return Err(WarRoomError::EmptyCredential);
        }

        let check = match self.fetch_with_timeout(credential).await {
            Ok(incidents) => ConnectionCheck::Connected {
                incident_count: incidents.len(),
            },
            Err(error) => ConnectionCheck::Failed(error),
        };
        info!("Connection test against '{}': {:?}", self.feed().name(), check);

        Ok(check)
    }

    /// The first characters of the stored credential followed by `...`.
    pub fn credential_preview(&self) -> Option<String> {
        let credential = self.read_credential()?;
        let prefix: String = credential
            .expose_secret()
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        Some(format!("{}...", prefix))
    }
}
