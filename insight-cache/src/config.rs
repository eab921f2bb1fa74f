//! Cache timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use insight_core::constants::{DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_RETENTION_SECS};
use insight_core::error::{InsightError, Result};

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds between refresh/evict sweeps
    pub refresh_interval_seconds: u64,
    /// Seconds an entry may stay idle (no lookup) before eviction
    pub retention_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: DEFAULT_REFRESH_INTERVAL_SECS,
            retention_seconds: DEFAULT_RETENTION_SECS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with explicit timings.
    pub fn new(refresh_interval_seconds: u64, retention_seconds: u64) -> Self {
        Self {
            refresh_interval_seconds,
            retention_seconds,
        }
    }

    /// Rejects zero timings; a zero interval would spin the scheduler.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_seconds == 0 {
            return Err(InsightError::ConfigError(
                "refresh interval must be at least 1 second".into(),
            ));
        }
        if self.retention_seconds == 0 {
            return Err(InsightError::ConfigError(
                "retention must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    /// Interval between sweeps.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    /// Idle window before eviction.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_seconds)
    }
}
