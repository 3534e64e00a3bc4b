//! Theme-agnostic view model of the dashboard.
//!
//! Everything a renderer needs is computed here from a [`DashboardState`]
//! and the current local time, so the presentation layer stays free of
//! ranking and counting rules.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use incident_core::display::{relative_age, sentence_case, short_id, StatusTone};
use incident_core::metrics::{self, HourBucket, StatusBreakdown};
use incident_core::{ranking, Incident};
use serde::Serialize;

use crate::state::DashboardState;

/// Where the shown incidents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceBanner {
    Live,
    /// No credential is configured.
    MockNoCredential,
    /// A credential exists but the live call failed.
    MockFallback,
}

impl DataSourceBanner {
    pub fn for_state(state: &DashboardState) -> Self {
        match (state.using_mock_data, state.has_credential) {
            (false, _) => DataSourceBanner::Live,
            (true, false) => DataSourceBanner::MockNoCredential,
            (true, true) => DataSourceBanner::MockFallback,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSourceBanner::Live => "Live data",
            DataSourceBanner::MockNoCredential => "No API key - using mock data",
            DataSourceBanner::MockFallback => "Using mock data",
        }
    }
}

/// One row of the active incident list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentCard {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub status_label: String,
    pub status_category: String,
    pub tone: StatusTone,
    pub severity_label: Option<String>,
    pub lead: Option<String>,
    /// `None` when the creation time does not parse.
    pub age: Option<String>,
}

impl IncidentCard {
    pub fn from_incident<Tz: TimeZone>(incident: &Incident, now: &DateTime<Tz>) -> Self {
        let category = incident.status_category().to_lowercase();
        Self {
            id: incident.id.clone(),
            short_id: short_id(&incident.id).to_string(),
            title: sentence_case(&incident.name),
            summary: incident
                .summary
                .as_deref()
                .filter(|summary| !summary.trim().is_empty())
                .map(sentence_case),
            status_label: incident.status_name().to_string(),
            tone: StatusTone::for_category(&category),
            status_category: category,
            severity_label: incident.severity.as_ref().map(|s| s.name.clone()),
            lead: incident.lead().and_then(|lead| lead.name.clone()),
            age: incident
                .created_instant()
                .map(|created| relative_age(created, now.with_timezone(&Utc))),
        }
    }
}

/// Header counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub critical: usize,
    pub active: usize,
    pub resolved_today: usize,
}

impl DashboardSummary {
    pub fn from_incidents<Tz: TimeZone>(incidents: &[Incident], now: &DateTime<Tz>) -> Self {
        Self {
            total: incidents.len(),
            critical: metrics::critical_count(incidents),
            active: metrics::active_count(incidents),
            resolved_today: metrics::resolved_today(incidents, now),
        }
    }
}

/// The whole dashboard, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Active incidents in ranked order.
    pub cards: Vec<IncidentCard>,
    pub summary: DashboardSummary,
    pub status_breakdown: StatusBreakdown,
    pub hourly_trend: Vec<HourBucket>,
    /// `None` until the first refresh completes.
    pub banner: Option<DataSourceBanner>,
    /// Local `HH:MM:SS` of the last completed refresh.
    pub last_updated: Option<String>,
    pub is_loading: bool,
    /// Loading with nothing to show yet.
    pub show_loading_placeholder: bool,
}

impl DashboardView {
    /// Build the view of `state` as seen at local time `now`.
    pub fn build<Tz>(state: &DashboardState, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let incidents = &state.incidents;
        let cards = ranking::active_sorted(incidents)
            .iter()
            .map(|incident| IncidentCard::from_incident(incident, now))
            .collect();

        let zone = now.timezone();
        let last_updated = state.last_updated.map(|instant| {
            instant
                .with_timezone(&zone)
                .format("%H:%M:%S")
                .to_string()
        });
        let banner = state
            .last_updated
            .is_some()
            .then(|| DataSourceBanner::for_state(state));

        Self {
            cards,
            summary: DashboardSummary::from_incidents(incidents, now),
            status_breakdown: StatusBreakdown::from_incidents(incidents),
            hourly_trend: metrics::hourly_trend(incidents, now),
            banner,
            last_updated,
            is_loading: state.is_loading,
            show_loading_placeholder: state.is_loading && incidents.is_empty(),
        }
    }
}
