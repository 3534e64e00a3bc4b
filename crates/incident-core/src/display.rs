//! Presentation helpers that do not depend on any theme.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Uppercase the first character and lowercase the rest.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// The first six characters of an incident id.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(6) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Visual weight of a status category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Triage and live incidents.
    Critical,
    /// Incidents in the learning phase.
    Warning,
    /// Closed incidents.
    Resolved,
    /// Anything unrecognized.
    Neutral,
}

impl StatusTone {
    pub fn for_category(category: &str) -> Self {
        match category.to_lowercase().as_str() {
            "triage" | "live" => StatusTone::Critical,
            "learning" => StatusTone::Warning,
            "closed" => StatusTone::Resolved,
            _ => StatusTone::Neutral,
        }
    }
}

/// Human-readable age of `then` relative to `now`, e.g. "5 minutes ago".
///
/// Instants less than a minute old, or in the future, are "just now".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let (count, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_string();
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
