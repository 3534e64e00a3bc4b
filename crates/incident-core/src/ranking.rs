//! Display ordering for the incident board.
//!
//! Incidents sort by severity (most severe first), then by how urgent their
//! status is, then newest first. Only triage, live and learning incidents are
//! "active".

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone};

use crate::model::Incident;
use crate::timestamps::start_of_day;

/// Status categories shown on the active board.
pub const ACTIVE_CATEGORIES: [&str; 3] = ["triage", "live", "learning"];

/// Status categories counted as resolved.
pub const RESOLVED_CATEGORIES: [&str; 2] = ["closed", "resolved"];

/// Priority assigned to incidents without a severity rank.
pub const UNRANKED_PRIORITY: i32 = 99;

/// Whether the incident belongs on the active board.
pub fn is_active(incident: &Incident) -> bool {
    is_active_category(incident.status_category())
}

/// Whether a status category is active (case-insensitive).
pub fn is_active_category(category: &str) -> bool {
    let category = category.to_lowercase();
    ACTIVE_CATEGORIES.contains(&category.as_str())
}

/// Sort priority derived from severity rank; lower sorts first.
///
/// Critical (3) maps to 1, Major (2) to 2, Minor (1) to 3 and a missing
/// rank to [`UNRANKED_PRIORITY`].
pub fn priority_value(incident: &Incident) -> i32 {
    let rank = incident.severity_rank();
    if rank > 0 {
        4 - rank
    } else {
        UNRANKED_PRIORITY
    }
}

/// Urgency of a status category; lower sorts first.
pub fn status_urgency(category: &str) -> i32 {
    match category.to_lowercase().as_str() {
        "triage" => 1,
        "live" => 2,
        "learning" => 3,
        "closed" => 4,
        _ => 5,
    }
}

/// Total display order over incidents.
///
/// Priority ascending, then status urgency ascending, then creation time
/// descending. An incident whose `created_at` does not parse sorts after one
/// that does; two unparsable incidents compare equal so a stable sort keeps
/// their feed order.
pub fn compare(a: &Incident, b: &Incident) -> Ordering {
    priority_value(a)
        .cmp(&priority_value(b))
        .then_with(|| {
            status_urgency(a.status_category()).cmp(&status_urgency(b.status_category()))
        })
        .then_with(|| match (a.created_instant(), b.created_instant()) {
            (Some(a_created), Some(b_created)) => b_created.cmp(&a_created),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// All incidents in display order.
pub fn sorted(incidents: &[Incident]) -> Vec<Incident> {
    let mut ordered = incidents.to_vec();
    ordered.sort_by(compare);
    ordered
}

/// Active incidents in display order.
pub fn active_sorted(incidents: &[Incident]) -> Vec<Incident> {
    sorted(incidents).into_iter().filter(is_active).collect()
}

/// Count incidents resolved since the start of `now`'s calendar day.
///
/// An incident counts when its category is closed or resolved and its
/// `updated_at` parses to an instant at or after local midnight.
pub fn resolved_today<Tz: TimeZone>(incidents: &[Incident], now: &DateTime<Tz>) -> usize {
    let day_start = start_of_day(now);
    incidents
        .iter()
        .filter(|incident| {
            let category = incident.status_category().to_lowercase();
            RESOLVED_CATEGORIES.contains(&category.as_str())
        })
        .filter(|incident| {
            incident
                .updated_instant()
                .is_some_and(|updated| updated >= day_start)
        })
        .count()
}
