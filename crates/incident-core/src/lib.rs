//! Core types and pure logic for the War Room incident dashboard.
//!
//! This crate provides the shared pieces every other War Room crate builds on:
//!
//! - [`Incident`] and friends - the snapshot model decoded from the incident feed
//! - [`IncidentFeed`] - the trait implemented by live and mock incident sources
//! - [`FetchError`] - the recoverable failure taxonomy of a feed call
//! - [`ranking`] - display ordering and the "active" subset
//! - [`metrics`] - header counts, status breakdown and the hourly trend
//! - [`display`] - sentence casing, status tones and relative ages
//!
//! # Example
//!
//! ```rust
//! use incident_core::{ranking, Incident, IncidentsResponse};
//!
//! let body = r#"{"incidents": [
//!     {"id": "01H", "name": "API latency", "created_at": "2025-07-31T14:30:00Z",
//!      "incident_status": {"category": "live", "name": "Live"},
//!      "severity": {"name": "Critical", "rank": 3}}
//! ]}"#;
//!
//! let response: IncidentsResponse = serde_json::from_str(body).unwrap();
//! let active = ranking::active_sorted(&response.incidents);
//! assert_eq!(active[0].id, "01H");
//! ```

mod error;
mod feed;
mod model;

pub mod display;
pub mod metrics;
pub mod ranking;
pub mod timestamps;

pub use error::FetchError;
pub use feed::IncidentFeed;
pub use model::{
    Assignee, Incident, IncidentStatus, IncidentsResponse, Role, RoleAssignment, Severity,
};

// Re-export async_trait for feed implementors
pub use async_trait::async_trait;
