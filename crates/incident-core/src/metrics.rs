//! Aggregate counts for the dashboard header and charts.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::model::Incident;
use crate::ranking::is_active;

pub use crate::ranking::resolved_today;

/// Number of hourly buckets in the trend chart.
pub const TREND_HOURS: usize = 24;

/// Incidents with the highest severity rank (3 or more).
pub fn critical_count(incidents: &[Incident]) -> usize {
    incidents
        .iter()
        .filter(|incident| incident.severity_rank() >= 3)
        .count()
}

/// Incidents on the active board.
pub fn active_count(incidents: &[Incident]) -> usize {
    incidents.iter().filter(|incident| is_active(incident)).count()
}

/// Incident counts per well-known status category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub live: usize,
    pub triage: usize,
    pub learning: usize,
    pub closed: usize,
}

impl StatusBreakdown {
    /// Count incidents by lowercased status category. Other categories are
    /// not counted.
    pub fn from_incidents(incidents: &[Incident]) -> Self {
        let mut breakdown = Self::default();
        for incident in incidents {
            match incident.status_category().to_lowercase().as_str() {
                "live" => breakdown.live += 1,
                "triage" => breakdown.triage += 1,
                "learning" => breakdown.learning += 1,
                "closed" => breakdown.closed += 1,
                _ => {}
            }
        }
        breakdown
    }

    /// Rows in display order: label and count.
    pub fn rows(&self) -> [(&'static str, usize); 4] {
        [
            ("Live", self.live),
            ("Triage", self.triage),
            ("Learning", self.learning),
            ("Closed", self.closed),
        ]
    }
}

/// One hour of the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    /// Local hour of day, two digits ("00" to "23").
    pub label: String,
    pub start: DateTime<Utc>,
    pub count: usize,
}

/// Incidents created per hour over the last [`TREND_HOURS`] hours.
///
/// Buckets run oldest first; the last one is the hour containing `now`.
/// Incidents whose creation time does not parse are left out.
pub fn hourly_trend<Tz>(incidents: &[Incident], now: &DateTime<Tz>) -> Vec<HourBucket>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let zone = now.timezone();
    let current_hour = crate::timestamps::start_of_hour(now);
    let created: Vec<DateTime<Utc>> = incidents
        .iter()
        .filter_map(Incident::created_instant)
        .collect();

    (0..TREND_HOURS)
        .rev()
        .map(|hours_ago| {
            let start = current_hour - Duration::hours(hours_ago as i64);
            let end = start + Duration::hours(1);
            let count = created
                .iter()
                .filter(|instant| **instant >= start && **instant < end)
                .count();
            HourBucket {
                label: start.with_timezone(&zone).format("%H").to_string(),
                start,
                count,
            }
        })
        .collect()
}
