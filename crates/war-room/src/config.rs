//! Configuration for the refresh orchestrator.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::WarRoomError;

/// Default interval between polls while a credential is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest refresh interval the loop will run with.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of live incidents kept from each fetch.
pub const DEFAULT_MAX_INCIDENTS: usize = 12;

/// Default upper bound on a single feed call.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Default directory of the file-backed secret store.
pub const DEFAULT_SECRET_DIR: &str = "./data/secrets";

/// Configuration for the War Room refresh loop.
#[derive(Debug, Clone)]
pub struct WarRoomConfig {
    /// Time between interval refreshes.
    pub refresh_interval: Duration,

    /// Live fetches are truncated to this many incidents, in feed order.
    pub max_incidents: usize,

    /// Latency simulated before mock data is shown.
    pub mock_latency: Duration,

    /// Upper bound on a feed call. An elapsed timeout counts as a
    /// transport failure.
    pub fetch_timeout: Duration,

    /// Root directory of the file-backed secret store.
    pub secret_dir: PathBuf,
}

impl Default for WarRoomConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            max_incidents: DEFAULT_MAX_INCIDENTS,
            mock_latency: mock_feed::DEFAULT_MOCK_LATENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            secret_dir: PathBuf::from(DEFAULT_SECRET_DIR),
        }
    }
}

impl WarRoomConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `WAR_ROOM_REFRESH_SECS` - Poll interval in seconds (default: 30)
    /// - `WAR_ROOM_MAX_INCIDENTS` - Incidents kept per fetch (default: 12)
    /// - `WAR_ROOM_MOCK_LATENCY_MS` - Simulated mock latency (default: 1000)
    /// - `WAR_ROOM_FETCH_TIMEOUT_SECS` - Feed call bound (default: 15)
    /// - `WAR_ROOM_SECRET_DIR` - Secret store directory (default: ./data/secrets)
    pub fn from_env() -> Result<Self, WarRoomError> {
        let defaults = Self::default();

        let refresh_interval = parse_var::<u64>("WAR_ROOM_REFRESH_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);
        if refresh_interval.is_zero() {
            return Err(WarRoomError::Config(
                "WAR_ROOM_REFRESH_SECS must be greater than zero".to_string(),
            ));
        }

        let max_incidents =
            parse_var::<usize>("WAR_ROOM_MAX_INCIDENTS")?.unwrap_or(defaults.max_incidents);

        let mock_latency = parse_var::<u64>("WAR_ROOM_MOCK_LATENCY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.mock_latency);

        let fetch_timeout = parse_var::<u64>("WAR_ROOM_FETCH_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        let secret_dir = env::var("WAR_ROOM_SECRET_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.secret_dir);

        Ok(Self {
            refresh_interval,
            max_incidents,
            mock_latency,
            fetch_timeout,
            secret_dir,
        })
    }

    /// Builder method to set the refresh interval, raised to at least
    /// [`MIN_REFRESH_INTERVAL`].
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(MIN_REFRESH_INTERVAL);
        self
    }

    /// The interval the refresh loop ticks at.
    ///
    /// `refresh_interval` is a public field, so a zero set directly is
    /// clamped here as well.
    pub fn poll_interval(&self) -> Duration {
        self.refresh_interval.max(MIN_REFRESH_INTERVAL)
    }

    /// Builder method to set the truncation cap.
    pub fn with_max_incidents(mut self, max_incidents: usize) -> Self {
        self.max_incidents = max_incidents;
        self
    }

    /// Builder method to set the simulated mock latency.
    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }

    /// Builder method to set the feed call bound.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Builder method to set the secret store directory.
    pub fn with_secret_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secret_dir = dir.into();
        self
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, WarRoomError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| WarRoomError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WarRoomConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.max_incidents, 12);
        assert_eq!(config.mock_latency, Duration::from_secs(1));
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.secret_dir, PathBuf::from("./data/secrets"));
    }

    #[test]
    fn test_builder_methods() {
        let config = WarRoomConfig::default()
            .with_refresh_interval(Duration::from_secs(5))
            .with_max_incidents(3)
            .with_mock_latency(Duration::ZERO)
            .with_fetch_timeout(Duration::from_secs(2))
            .with_secret_dir("/tmp/secrets");
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.max_incidents, 3);
        assert!(config.mock_latency.is_zero());
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.secret_dir, PathBuf::from("/tmp/secrets"));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = WarRoomConfig::default().with_refresh_interval(Duration::ZERO);
        assert_eq!(config.refresh_interval, MIN_REFRESH_INTERVAL);

        let config = WarRoomConfig {
            refresh_interval: Duration::ZERO,
            ..WarRoomConfig::default()
        };
        assert_eq!(config.poll_interval(), MIN_REFRESH_INTERVAL);
        assert_eq!(WarRoomConfig::default().poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_var_missing_is_none() {
        let value = parse_var::<u64>("WAR_ROOM_TEST_SURELY_UNSET_VARIABLE").unwrap();
        assert!(value.is_none());
    }
}
