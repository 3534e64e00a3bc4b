//! The fixed synthetic incident board.

use std::time::Duration;

use incident_core::{Assignee, Incident, IncidentStatus, Role, RoleAssignment, Severity};
use tokio::time::sleep;

/// Latency simulated before mock data is returned, so the board does not
/// flash between loading and loaded.
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_secs(1);

struct MockIncident {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    status: &'static str,
    severity: &'static str,
    rank: i32,
    created_at: &'static str,
    updated_at: &'static str,
    summary: &'static str,
    lead_id: &'static str,
    lead_name: &'static str,
    lead_email: &'static str,
}

const MOCK_BOARD: [MockIncident; 4] = [
    MockIncident {
        id: "1",
        name: "Critical Database Connection Failure",
        category: "live",
        status: "Live",
        severity: "Critical",
        rank: 3,
        created_at: "2025-07-31T14:30:00Z",
        updated_at: "2025-07-31T15:00:00Z",
        summary: "Primary database cluster experiencing connection timeouts affecting 85% of users",
        lead_id: "u1",
        lead_name: "Sarah Chen",
        lead_email: "s.chen@company.com",
    },
    MockIncident {
        id: "2",
        name: "Payment Gateway API Degradation",
        category: "learning",
        status: "Learning",
        severity: "Major",
        rank: 2,
        created_at: "2025-07-31T13:15:00Z",
        updated_at: "2025-07-31T14:45:00Z",
        summary: "Payment processing experiencing 15% failure rate due to third-party API issues",
        lead_id: "u2",
        lead_name: "Mike Rodriguez",
        lead_email: "m.rodriguez@company.com",
    },
    MockIncident {
        id: "3",
        name: "CDN Performance Issues",
        category: "triage",
        status: "Triage",
        severity: "Major",
        rank: 2,
        created_at: "2025-07-31T12:00:00Z",
        updated_at: "2025-07-31T13:30:00Z",
        summary: "Slow asset loading in EU regions due to CDN provider issues",
        lead_id: "u3",
        lead_name: "Alex Kim",
        lead_email: "a.kim@company.com",
    },
    MockIncident {
        id: "4",
        name: "Email Service Restored",
        category: "closed",
        status: "Closed",
        severity: "Minor",
        rank: 1,
        created_at: "2025-07-31T10:00:00Z",
        updated_at: "2025-07-31T11:30:00Z",
        summary: "Email delivery delays have been resolved after infrastructure update",
        lead_id: "u4",
        lead_name: "Emma Wilson",
        lead_email: "e.wilson@company.com",
    },
];

impl MockIncident {
    fn to_incident(&self) -> Incident {
        Incident {
            id: self.id.to_string(),
            name: self.name.to_string(),
            status: Some(IncidentStatus::new(self.category, self.status)),
            created_at: self.created_at.to_string(),
            updated_at: Some(self.updated_at.to_string()),
            summary: Some(self.summary.to_string()),
            severity: Some(Severity::new(self.severity, self.rank)),
            role_assignments: Some(vec![RoleAssignment {
                role: Role {
                    id: "1".to_string(),
                    name: "Incident Lead".to_string(),
                    shortform: Some("lead".to_string()),
                    role_type: Some("lead".to_string()),
                },
                assignee: Some(Assignee {
                    id: self.lead_id.to_string(),
                    name: Some(self.lead_name.to_string()),
                    email: Some(self.lead_email.to_string()),
                }),
            }]),
        }
    }
}

/// The fixed placeholder board: one incident per status (live, learning,
/// triage, closed) with severity ranks 3, 2, 2 and 1, each with a lead.
pub fn mock_incidents() -> Vec<Incident> {
    MOCK_BOARD.iter().map(MockIncident::to_incident).collect()
}

/// Produces the mock board after a simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFeed {
    latency: Duration,
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_LATENCY)
    }
}

impl MockFeed {
    /// Create a mock feed with the given latency.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Create a mock feed that answers without delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Wait for the simulated latency, then return [`mock_incidents`].
    pub async fn generate(&self) -> Vec<Incident> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        mock_incidents()
    }
}
