//! Refresh orchestration for the War Room incident dashboard.
//!
//! This crate provides the [`RefreshOrchestrator`] which keeps a dashboard
//! snapshot current by polling an incident feed, and the [`DashboardView`]
//! model a renderer draws from.
//!
//! # Features
//!
//! - Live data from incident.io when a credential is stored
//! - Mock data when the credential is missing or the feed call fails
//! - Whole-snapshot publishing over a watch channel
//! - At most one refresh in flight
//! - Interval polling that pauses while no credential is configured
//! - Credential save, clear and connection test for a settings surface
//!
//! # Architecture
//!
//! ```text
//!   initial load / interval tick / settings change
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   REFRESH ORCHESTRATOR                      │
//! │                                                             │
//! │  1. Acquire in-flight guard (skip if busy)                  │
//! │         ↓                                                   │
//! │  2. Read credential from the secret store                   │
//! │         ↓                                                   │
//! │  3. Publish is_loading = true                               │
//! │         ↓                                                   │
//! │  4. Credential?                                             │
//! │     • no  → mock board after simulated latency              │
//! │     • yes → feed call (bounded by timeout)                  │
//! │               ok  → first N incidents, feed order           │
//! │               err → log, mock board                         │
//! │         ↓                                                   │
//! │  5. Publish the complete snapshot                           │
//! └─────────────────────────────────────────────────────────────┘
//!          ↓
//!   watch::Receiver<DashboardState> → DashboardView::build
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use incident_client::IncidentClient;
//! use secret_store::FileSecretStore;
//! use war_room::{DashboardView, RefreshOrchestrator, WarRoomConfig};
//!
//! let config = WarRoomConfig::from_env()?;
//! let secrets = FileSecretStore::new(&config.secret_dir);
//! let orchestrator = RefreshOrchestrator::new(IncidentClient::from_env()?, secrets, config);
//!
//! orchestrator.refresh().await;
//! let view = DashboardView::build(&orchestrator.snapshot(), &chrono::Local::now());
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod settings;
pub mod state;
pub mod view;

pub use config::WarRoomConfig;
pub use error::WarRoomError;
pub use orchestrator::RefreshOrchestrator;
pub use settings::ConnectionCheck;
pub use state::{DashboardState, MockReason, RefreshOutcome};
pub use view::{DashboardSummary, DashboardView, DataSourceBanner, IncidentCard};
