//! Incident snapshot types as delivered by the incident feed.
//!
//! Field names follow the feed's snake_case wire format. Optional fields
//! decode from either a missing key or an explicit `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamps::parse_timestamp;

/// Status category used when an incident carries no status.
pub const UNKNOWN_STATUS_CATEGORY: &str = "unknown";

/// Status name used when an incident carries no status.
pub const UNKNOWN_STATUS_NAME: &str = "Unknown";

/// Response envelope of the incidents list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentsResponse {
    pub incidents: Vec<Incident>,
}

/// One unit of operational disruption.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Incident {
    /// Opaque identifier, stable across refreshes.
    pub id: String,

    /// Free-text title.
    pub name: String,

    /// Current status. Read through [`Incident::status_category`] and
    /// [`Incident::status_name`] to get the "unknown" default.
    #[serde(rename = "incident_status", default)]
    pub status: Option<IncidentStatus>,

    /// Creation time as sent by the feed.
    pub created_at: String,

    /// Last update time as sent by the feed.
    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub severity: Option<Severity>,

    /// Role assignments in feed order.
    #[serde(rename = "incident_role_assignments", default)]
    pub role_assignments: Option<Vec<RoleAssignment>>,
}

/// Status of an incident, e.g. `{category: "live", name: "Live"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentStatus {
    /// Lowercase token: `triage`, `live`, `learning`, `closed`, or anything else.
    pub category: String,
    pub name: String,
}

impl IncidentStatus {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

/// Severity of an incident. Higher rank is more severe (3 Critical, 2 Major, 1 Minor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Severity {
    pub name: String,
    #[serde(default)]
    pub rank: Option<i32>,
}

impl Severity {
    pub fn new(name: impl Into<String>, rank: i32) -> Self {
        Self {
            name: name.into(),
            rank: Some(rank),
        }
    }
}

/// A role and the person holding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: Role,
    #[serde(default)]
    pub assignee: Option<Assignee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shortform: Option<String>,
    #[serde(default)]
    pub role_type: Option<String>,
}

impl Role {
    /// Whether this role is the incident lead.
    ///
    /// Matches a `role_type` of `lead` or any role name containing `lead`,
    /// both case-insensitively.
    pub fn is_lead(&self) -> bool {
        let typed_lead = self
            .role_type
            .as_deref()
            .is_some_and(|role_type| role_type.eq_ignore_ascii_case("lead"));
        typed_lead || self.name.to_lowercase().contains("lead")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Incident {
    /// Status category, or `unknown` when the incident has no status.
    pub fn status_category(&self) -> &str {
        self.status
            .as_ref()
            .map(|status| status.category.as_str())
            .unwrap_or(UNKNOWN_STATUS_CATEGORY)
    }

    /// Status name, or `Unknown` when the incident has no status.
    pub fn status_name(&self) -> &str {
        self.status
            .as_ref()
            .map(|status| status.name.as_str())
            .unwrap_or(UNKNOWN_STATUS_NAME)
    }

    /// Severity rank, 0 when unknown.
    pub fn severity_rank(&self) -> i32 {
        self.severity
            .as_ref()
            .and_then(|severity| severity.rank)
            .unwrap_or(0)
    }

    /// Role assignments in feed order (empty when the feed sent none).
    pub fn role_assignments(&self) -> &[RoleAssignment] {
        self.role_assignments.as_deref().unwrap_or(&[])
    }

    /// The assignee of the first lead role, if any.
    ///
    /// Only the first matching assignment is considered: when it has no
    /// assignee the incident has no lead.
    pub fn lead(&self) -> Option<&Assignee> {
        self.role_assignments()
            .iter()
            .find(|assignment| assignment.role.is_lead())
            .and_then(|assignment| assignment.assignee.as_ref())
    }

    /// Parsed creation time, `None` when unparsable.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Parsed update time, `None` when absent or unparsable.
    pub fn updated_instant(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}
