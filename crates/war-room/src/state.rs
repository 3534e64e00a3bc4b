//! Dashboard state published by the orchestrator.

use chrono::{DateTime, Utc};
use incident_core::{FetchError, Incident};
use serde::Serialize;

/// One complete snapshot of the dashboard's data.
///
/// Each completed refresh replaces the whole snapshot; readers never see a
/// mix of old and new fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    /// Incidents in feed order (live data) or mock order.
    pub incidents: Vec<Incident>,

    /// A refresh is running.
    pub is_loading: bool,

    /// When the last refresh completed; `None` before the first one.
    pub last_updated: Option<DateTime<Utc>>,

    /// The incidents are the synthetic mock board.
    pub using_mock_data: bool,

    /// The secret store reported a credential at the last refresh.
    pub has_credential: bool,
}

/// Why a refresh showed mock data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReason {
    /// No usable credential was configured.
    NoCredential,
    /// The live call failed; the error is logged, never shown.
    Fallback(FetchError),
}

/// Result of a single refresh request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Live data was published.
    Live {
        /// Incidents the feed returned.
        fetched: usize,
        /// Incidents kept after truncation.
        shown: usize,
    },
    /// Mock data was published.
    Mock(MockReason),
    /// Another refresh was already running; nothing changed.
    Skipped,
}

impl RefreshOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, RefreshOutcome::Live { .. })
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, RefreshOutcome::Mock(_))
    }
}
