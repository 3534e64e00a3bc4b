//! HTTP client for the incident.io incidents feed.
//!
//! This crate provides [`IncidentClient`], the live [`IncidentFeed`]
//! implementation. It issues a single authenticated `GET /v2/incidents` per
//! call and maps every failure onto [`FetchError`]:
//!
//! - non-2xx response: [`FetchError::HttpStatus`]
//! - DNS, TLS, connect, reset or timeout: [`FetchError::Transport`]
//! - 2xx with a body that is not an incident list: [`FetchError::Decode`]
//!
//! The client never retries and never truncates; both are the caller's job.
//!
//! # Example
//!
//! ```no_run
//! use incident_client::{ClientConfig, IncidentClient, IncidentFeed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IncidentClient::new(ClientConfig::default())?;
//! let incidents = client.fetch_incidents("inc_live_abc123").await?;
//! println!("{} incidents", incidents.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::IncidentClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ClientError;

// Re-export the feed contract for convenience
pub use incident_core::{FetchError, Incident, IncidentFeed};
