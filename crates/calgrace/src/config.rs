use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default grace window in seconds (default: 10)
    pub grace_timeout_seconds: u64,
    /// How long the backend keeps a removed item restorable (default: 60)
    pub task_ttl_seconds: u64,
    /// Capacity of each signal channel (default: 100)
    pub signal_channel_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRACE_TIMEOUT_SECONDS` - Default grace window in seconds (default: 10)
    /// - `TASK_TTL_SECONDS` - Restorable window of a removed item (default: 60)
    /// - `SIGNAL_CHANNEL_CAPACITY` - Signal channel capacity (default: 100)
    pub fn from_env() -> Self {
        Self {
            grace_timeout_seconds: env::var("GRACE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            task_ttl_seconds: env::var("TASK_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            signal_channel_capacity: env::var("SIGNAL_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(100),
        }
    }

    /// Get the default grace window as a Duration.
    pub fn grace_timeout(&self) -> Duration {
        Duration::from_secs(self.grace_timeout_seconds)
    }

    /// Get the task TTL as a Duration.
    pub fn task_ttl(&self) -> Duration {
        Duration::from_secs(self.task_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
