//! Refresh orchestrator: decides between live and mock data and publishes
//! dashboard snapshots.

use std::future::Future;

use chrono::Utc;
use incident_core::{FetchError, Incident, IncidentFeed};
use mock_feed::MockFeed;
use secret_store::{ExposeSecret, SecretStore, SecretString};
use tokio::sync::{watch, Mutex, MutexGuard};
use tokio::time::{timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::WarRoomConfig;
use crate::state::{DashboardState, MockReason, RefreshOutcome};

/// Owns the refresh lifecycle of the dashboard.
///
/// The orchestrator:
/// - Reads the credential from the secret store on every refresh
/// - Calls the live feed when a credential exists, bounded by a timeout
/// - Falls back to the mock board on a missing credential or any feed error
/// - Keeps at most `max_incidents` live incidents, in feed order
/// - Publishes whole [`DashboardState`] snapshots through a watch channel
/// - Runs at most one refresh at a time
pub struct RefreshOrchestrator<F: IncidentFeed, S: SecretStore> {
    feed: F,
    secrets: S,
    mock: MockFeed,
    config: WarRoomConfig,
    state: watch::Sender<DashboardState>,
    in_flight: Mutex<()>,
}

impl<F: IncidentFeed, S: SecretStore> RefreshOrchestrator<F, S> {
    /// Create an orchestrator over the given feed and secret store.
    pub fn new(feed: F, secrets: S, config: WarRoomConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            feed,
            secrets,
            mock: MockFeed::new(config.mock_latency),
            config,
            state,
            in_flight: Mutex::new(()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &WarRoomConfig {
        &self.config
    }

    /// Get a reference to the feed.
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Get a reference to the secret store.
    pub fn secrets(&self) -> &S {
        &self.secrets
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Refresh the dashboard unless a refresh is already running.
    ///
    /// Returns [`RefreshOutcome::Skipped`] without touching state when
    /// another refresh holds the in-flight guard.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.in_flight.try_lock() {
            Ok(guard) => self.refresh_locked(guard).await,
            Err(_) => {
                debug!("Refresh already in flight, skipping");
                RefreshOutcome::Skipped
            }
        }
    }

    /// Refresh the dashboard, waiting for any running refresh to finish first.
    ///
    /// Used after settings changes so the new credential is always applied.
    pub async fn refresh_queued(&self) -> RefreshOutcome {
        let guard = self.in_flight.lock().await;
        self.refresh_locked(guard).await
    }

    async fn refresh_locked(&self, _guard: MutexGuard<'_, ()>) -> RefreshOutcome {
        let has_credential = self.secrets.has();
        let credential = if has_credential {
            self.read_credential()
        } else {
            None
        };

        self.state.send_modify(|state| state.is_loading = true);

        let Some(credential) = credential else {
            debug!("No credential configured, showing mock data");
            return self
                .publish_mock(has_credential, MockReason::NoCredential)
                .await;
        };

        match self.fetch_with_timeout(credential.expose_secret()).await {
            Ok(incidents) => self.publish_live(incidents),
            Err(error) if !error.is_feed_failure() => {
                self.publish_mock(has_credential, MockReason::NoCredential)
                    .await
            }
            Err(error) => {
                warn!(
                    "Incident feed '{}' failed, showing mock data: {}",
                    self.feed.name(),
                    error
                );
                self.publish_mock(has_credential, MockReason::Fallback(error))
                    .await
            }
        }
    }

    /// The stored credential, trimmed; `None` when absent or blank.
    pub(crate) fn read_credential(&self) -> Option<SecretString> {
        let stored = self.secrets.get()?;
        let trimmed = stored.expose_secret().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SecretString::from(trimmed.to_string()))
        }
    }

    /// Call the feed once, bounded by `fetch_timeout`.
    pub(crate) async fn fetch_with_timeout(
        &self,
        credential: &str,
    ) -> Result<Vec<Incident>, FetchError> {
        match timeout(self.config.fetch_timeout, self.feed.fetch_incidents(credential)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(FetchError::Transport(format!(
                "feed call timed out after {:?}",
                self.config.fetch_timeout
            ))),
        }
    }

    fn publish_live(&self, incidents: Vec<Incident>) -> RefreshOutcome {
        let fetched = incidents.len();
        let shown: Vec<Incident> = incidents
            .into_iter()
            .take(self.config.max_incidents)
            .collect();
        let count = shown.len();

        self.state.send_replace(DashboardState {
            incidents: shown,
            is_loading: false,
            last_updated: Some(Utc::now()),
            using_mock_data: false,
            has_credential: true,
        });

        info!("Refreshed from '{}': showing {} of {} incidents", self.feed.name(), count, fetched);
        RefreshOutcome::Live {
            fetched,
            shown: count,
        }
    }

    async fn publish_mock(&self, has_credential: bool, reason: MockReason) -> RefreshOutcome {
        let incidents = self.mock.generate().await;

        self.state.send_replace(DashboardState {
            incidents,
            is_loading: false,
            last_updated: Some(Utc::now()),
            using_mock_data: true,
            has_credential,
        });

        info!("Showing mock data ({:?})", reason);
        RefreshOutcome::Mock(reason)
    }

    /// Run the refresh loop until `shutdown_signal` completes.
    ///
    /// Refreshes once immediately, then every `refresh_interval` while the
    /// secret store holds a credential. Ticks without a credential are
    /// skipped; the mock board from the last refresh stays in place.
    pub async fn run_with_shutdown<Sig>(&self, shutdown_signal: Sig)
    where
        Sig: Future<Output = ()> + Send,
    {
        let interval = self.config.poll_interval();
        info!(
            "Starting refresh loop (feed: {}, interval: {:?})",
            self.feed.name(),
            interval
        );

        tokio::pin!(shutdown_signal);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; it stands for the initial load.
        ticker.tick().await;

        let mut scheduled = true;
        loop {
            if scheduled {
                tokio::select! {
                    biased;

                    () = &mut shutdown_signal => {
                        info!("Shutdown signal received during refresh, stopping refresh loop");
                        return;
                    }

                    _ = self.refresh() => {}
                }
            }

            tokio::select! {
                biased;

                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping refresh loop");
                    return;
                }

                _ = ticker.tick() => {
                    scheduled = self.secrets.has();
                    if !scheduled {
                        debug!("No credential configured, skipping interval refresh");
                    }
                }
            }
        }
    }
}

impl<F: IncidentFeed, S: SecretStore> std::fmt::Debug for RefreshOrchestrator<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshOrchestrator")
            .field("feed", &self.feed.name())
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use incident_core::{IncidentStatus, Severity};
    use mock_feed::{mock_incidents, FailingFeed, StaticFeed, DEFAULT_MOCK_LATENCY};
    use secret_store::MemorySecretStore;
    use tokio::sync::oneshot;
    use tokio::time::Instant;

    fn live_incidents(count: usize) -> Vec<Incident> {
        (0..count)
            .map(|i| Incident {
                id: format!("live-{:02}", i),
                name: format!("Live incident {}", i),
                status: Some(IncidentStatus::new("live", "Live")),
                // Oldest first, so any client-side re-sort would be visible.
                created_at: format!("2025-07-31T{:02}:00:00Z", i),
                updated_at: None,
                summary: None,
                severity: Some(Severity::new("Minor", 1 + (i % 3) as i32)),
                role_assignments: None,
            })
            .collect()
    }

    fn slow_feed(secs: u64) -> StaticFeed {
        StaticFeed::new(live_incidents(2)).with_response_delay(Duration::from_secs(secs))
    }

    fn orchestrator<F: IncidentFeed>(
        feed: F,
        secrets: MemorySecretStore,
    ) -> RefreshOrchestrator<F, MemorySecretStore> {
        RefreshOrchestrator::new(feed, secrets, WarRoomConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_credential_shows_mock_within_latency() {
        let feed = Arc::new(StaticFeed::new(live_incidents(3)));
        let orch = orchestrator(feed.clone(), MemorySecretStore::new());

        let start = Instant::now();
        let outcome = orch.refresh().await;
        let elapsed = start.elapsed();

        assert_eq!(outcome, RefreshOutcome::Mock(MockReason::NoCredential));
        assert!(elapsed >= DEFAULT_MOCK_LATENCY);
        assert!(elapsed < DEFAULT_MOCK_LATENCY + Duration::from_millis(10));

        let state = orch.snapshot();
        assert!(state.using_mock_data);
        assert!(!state.has_credential);
        assert!(!state.is_loading);
        assert!(state.last_updated.is_some());
        assert_eq!(state.incidents, mock_incidents());
        assert_eq!(feed.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_credential_is_never_sent() {
        let feed = Arc::new(StaticFeed::new(live_incidents(3)));
        let orch = orchestrator(feed.clone(), MemorySecretStore::with_secret("   \n"));

        let outcome = orch.refresh().await;

        assert_eq!(outcome, RefreshOutcome::Mock(MockReason::NoCredential));
        assert!(orch.snapshot().using_mock_data);
        assert!(orch.snapshot().has_credential);
        assert_eq!(feed.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unauthorized_falls_back_to_mock() {
        let orch = orchestrator(FailingFeed::unauthorized(), MemorySecretStore::with_secret("bad"));

        let outcome = orch.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Mock(MockReason::Fallback(FetchError::HttpStatus(401)))
        );
        let state = orch.snapshot();
        assert!(state.using_mock_data);
        assert!(state.has_credential);
        assert_eq!(state.incidents, mock_incidents());
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_rejecting_credential_as_missing_is_not_a_fallback() {
        let orch = orchestrator(
            FailingFeed::new(FetchError::NoCredential),
            MemorySecretStore::with_secret("key"),
        );

        assert_eq!(
            orch.refresh().await,
            RefreshOutcome::Mock(MockReason::NoCredential)
        );
        assert!(orch.snapshot().using_mock_data);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_and_decode_errors_fall_back() {
        for error in [
            FetchError::Transport("connection reset".to_string()),
            FetchError::Decode("missing field `incidents`".to_string()),
        ] {
            let orch = orchestrator(
                FailingFeed::new(error.clone()),
                MemorySecretStore::with_secret("key"),
            );
            assert_eq!(
                orch.refresh().await,
                RefreshOutcome::Mock(MockReason::Fallback(error))
            );
            assert!(orch.snapshot().using_mock_data);
        }
    }

    #[tokio::test]
    async fn test_live_fetch_truncates_in_feed_order() {
        let feed = Arc::new(StaticFeed::new(live_incidents(20)));
        let orch = orchestrator(feed.clone(), MemorySecretStore::with_secret("  inc_key \n"));

        let outcome = orch.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Live {
                fetched: 20,
                shown: 12
            }
        );
        let state = orch.snapshot();
        assert!(!state.using_mock_data);
        assert!(state.has_credential);
        assert!(!state.is_loading);
        assert_eq!(state.incidents, live_incidents(20)[..12].to_vec());
        assert_eq!(feed.credentials(), vec!["inc_key"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_feed_times_out_to_mock() {
        let feed = slow_feed(120);
        let orch = orchestrator(feed, MemorySecretStore::with_secret("key"));

        let outcome = orch.refresh().await;

        match outcome {
            RefreshOutcome::Mock(MockReason::Fallback(FetchError::Transport(cause))) => {
                assert!(cause.contains("timed out"), "{}", cause)
            }
            other => panic!("expected timeout fallback, got {:?}", other),
        }
        assert!(orch.snapshot().using_mock_data);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refresh_is_skipped() {
        let feed = slow_feed(5);
        let orch = orchestrator(feed, MemorySecretStore::with_secret("key"));

        let (first, second) = tokio::join!(orch.refresh(), orch.refresh());

        assert_eq!(first, RefreshOutcome::Live { fetched: 2, shown: 2 });
        assert_eq!(second, RefreshOutcome::Skipped);
        assert_eq!(orch.feed().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_refresh_waits_for_running_one() {
        let feed = slow_feed(5);
        let orch = orchestrator(feed, MemorySecretStore::with_secret("key"));

        let (first, second) = tokio::join!(orch.refresh(), orch.refresh_queued());

        assert!(first.is_live());
        assert!(second.is_live());
        assert_eq!(orch.feed().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_then_single_final_snapshot() {
        let feed = slow_feed(5);
        let orch = Arc::new(orchestrator(feed, MemorySecretStore::with_secret("key")));
        let mut updates = orch.subscribe();

        let task = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.refresh().await })
        };

        updates.changed().await.unwrap();
        let loading = updates.borrow_and_update().clone();
        assert!(loading.is_loading);
        assert!(loading.incidents.is_empty());

        updates.changed().await.unwrap();
        let loaded = updates.borrow_and_update().clone();
        assert!(!loaded.is_loading);
        assert_eq!(loaded.incidents.len(), 2);
        assert!(!loaded.using_mock_data);

        assert!(task.await.unwrap().is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_refresh_replaces_previous_list() {
        let secrets = Arc::new(MemorySecretStore::with_secret("key"));
        let orch = RefreshOrchestrator::new(
            StaticFeed::new(live_incidents(5)),
            secrets.clone(),
            WarRoomConfig::default(),
        );

        assert!(orch.refresh().await.is_live());
        assert_eq!(orch.snapshot().incidents.len(), 5);

        secrets.delete().unwrap();
        assert!(orch.refresh().await.is_mock());
        assert_eq!(orch.snapshot().incidents, mock_incidents());
        assert!(!orch.snapshot().has_credential);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_polls_while_credential_present() {
        let feed = Arc::new(StaticFeed::new(live_incidents(2)));
        let orch = Arc::new(orchestrator(feed.clone(), MemorySecretStore::with_secret("key")));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let runner = {
            let orch = orch.clone();
            tokio::spawn(async move {
                orch.run_with_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
            })
        };

        // Initial load plus ticks at 30s, 60s and 90s.
        tokio::time::sleep(Duration::from_secs(95)).await;
        stop_tx.send(()).unwrap();
        runner.await.unwrap();

        assert_eq!(feed.calls(), 4);
        assert!(!orch.snapshot().using_mock_data);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_running_refresh() {
        let orch = Arc::new(orchestrator(slow_feed(120), MemorySecretStore::with_secret("key")));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let runner = {
            let orch = orch.clone();
            tokio::spawn(async move {
                orch.run_with_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
            })
        };

        // Initial load times out and shows mock data by 16s; the 30s tick
        // starts a second call that is still waiting on the feed at 31s.
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(orch.feed().calls(), 2);
        stop_tx.send(()).unwrap();

        let stopped = tokio::time::timeout(Duration::from_secs(1), runner).await;
        assert!(stopped.is_ok(), "loop kept waiting on the feed after shutdown");
        // The interrupted refresh released the in-flight guard.
        assert!(orch.refresh().await.is_mock());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_with_zero_interval_does_not_panic() {
        let feed = Arc::new(StaticFeed::new(live_incidents(1)));
        let config = WarRoomConfig {
            refresh_interval: Duration::ZERO,
            ..WarRoomConfig::default()
        };
        let orch = RefreshOrchestrator::new(feed.clone(), MemorySecretStore::with_secret("key"), config);

        orch.run_with_shutdown(tokio::time::sleep(Duration::from_millis(2500)))
            .await;

        // Initial load plus ticks at 1s and 2s.
        assert_eq!(feed.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_skips_ticks_without_credential() {
        let feed = Arc::new(StaticFeed::new(live_incidents(2)));
        let orch = Arc::new(orchestrator(feed.clone(), MemorySecretStore::new()));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut updates = orch.subscribe();

        let runner = {
            let orch = orch.clone();
            tokio::spawn(async move {
                orch.run_with_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
            })
        };

        tokio::time::sleep(Duration::from_secs(95)).await;
        stop_tx.send(()).unwrap();
        runner.await.unwrap();

        assert_eq!(feed.calls(), 0);
        let state = updates.borrow_and_update().clone();
        assert!(state.using_mock_data);
        assert_eq!(state.incidents, mock_incidents());
    }
}
