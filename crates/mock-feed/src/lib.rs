//! Synthetic incident data and mock feeds for the War Room dashboard.
//!
//! This crate provides:
//! - [`mock_incidents`] - the fixed placeholder board shown without live data
//! - [`MockFeed`] - returns that board after a simulated latency
//! - [`StaticFeed`] - returns a given list, optionally after a delay, and
//!   records the credentials it saw
//! - [`FailingFeed`] - always fails with a given [`FetchError`]
//!
//! # Example
//!
//! ```rust
//! use mock_feed::MockFeed;
//!
//! #[tokio::main]
//! async fn main() {
//!     let feed = MockFeed::instant();
//!     let incidents = feed.generate().await;
//!     assert_eq!(incidents.len(), 4);
//! }
//! ```

mod data;
mod failing;
mod fixed;

pub use data::{mock_incidents, MockFeed, DEFAULT_MOCK_LATENCY};
pub use failing::FailingFeed;
pub use fixed::StaticFeed;

// Re-export incident-core types for convenience
pub use incident_core::{async_trait, FetchError, Incident, IncidentFeed};
