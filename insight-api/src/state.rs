//! App state and configuration loading.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use insight_cache::CacheConfig;
use insight_core::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_ETH_RPC_URL, DEFAULT_NEO_RPC_URL, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_RETENTION_SECS, DEFAULT_RPC_TIMEOUT_SECS,
};
use insight_core::error::{InsightError, Result};
use insight_core::traits::{AccountStateSource, EthBalanceSource};
use insight_rpc::{EthRpcClient, NeoRpcClient, RpcConfig};

use crate::service::BalanceService;

/// Service configuration.
///
/// Read from a JSON file whose keys match the field names, then overridden by
/// `ETH_RPC_URL`, `NEO_RPC_URL`, `REFRESH_INTERVAL`, `RETENTION`, `BIND_ADDR`
/// and `RPC_TIMEOUT`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Ethereum JSON-RPC endpoint
    pub eth: String,
    /// NEO JSON-RPC endpoint
    pub neo: String,
    /// Seconds between cache refresh sweeps
    pub interval: u64,
    /// Seconds an unrequested balance stays cached
    pub retention: u64,
    /// HTTP bind address
    pub bind: String,
    /// Upstream RPC timeout in seconds
    pub rpc_timeout: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            eth: DEFAULT_ETH_RPC_URL.into(),
            neo: DEFAULT_NEO_RPC_URL.into(),
            interval: DEFAULT_REFRESH_INTERVAL_SECS,
            retention: DEFAULT_RETENTION_SECS,
            bind: DEFAULT_BIND_ADDR.into(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }
}

impl InsightConfig {
    /// Loads `path` (defaults if it does not exist), applies environment
    /// overrides (including a `.env` file), and validates the result.
    pub fn load(path: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::from_file(path)?.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, without a config file.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::default().apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = serde_json::from_str(&content).map_err(|e| {
                    InsightError::ConfigError(format!("{}: {}", path.display(), e))
                })?;
                info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applies overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ETH_RPC_URL") {
            self.eth = url;
        }
        if let Some(url) = lookup("NEO_RPC_URL") {
            self.neo = url;
        }
        if let Some(bind) = lookup("BIND_ADDR") {
            self.bind = bind;
        }
        if let Some(v) = lookup("REFRESH_INTERVAL") {
            self.interval = parse_seconds("REFRESH_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("RETENTION") {
            self.retention = parse_seconds("RETENTION", &v)?;
        }
        if let Some(v) = lookup("RPC_TIMEOUT") {
            self.rpc_timeout = parse_seconds("RPC_TIMEOUT", &v)?;
        }
        Ok(self)
    }

    /// Checks URLs, bind address and cache timings.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("eth", &self.eth), ("neo", &self.neo)] {
            Url::parse(url).map_err(|e| {
                InsightError::ConfigError(format!("invalid {} RPC URL '{}': {}", name, url, e))
            })?;
        }
        if self.rpc_timeout == 0 {
            return Err(InsightError::ConfigError("RPC timeout must be at least 1 second".into()));
        }
        self.bind_addr()?;
        self.cache_config().validate()
    }

    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| InsightError::ConfigError(format!("invalid bind address '{}': {}", self.bind, e)))
    }

    /// Cache timings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.interval, self.retention)
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| InsightError::ConfigError(format!("{} must be a whole number of seconds, got '{}'", key, value)))
}

/// Shared state of the HTTP handlers.
pub struct AppState {
    /// Effective configuration
    pub config: InsightConfig,
    /// Both balance caches and their schedulers
    pub service: BalanceService,
    /// Process start, for health reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Validates `config`, builds live RPC clients from it and wires them into
    /// the caches.
    pub fn new(config: InsightConfig) -> Result<Self> {
        config.validate()?;
        let eth = EthRpcClient::with_config(RpcConfig::new(&config.eth).with_timeout(config.rpc_timeout))?;
        let neo = NeoRpcClient::with_config(RpcConfig::new(&config.neo).with_timeout(config.rpc_timeout))?;
        info!(eth = eth.endpoint(), neo = neo.endpoint(), "RPC clients ready");

        Ok(Self::with_sources(config, Arc::new(eth), Arc::new(neo)))
    }

    /// Wires arbitrary balance sources into the caches.
    pub fn with_sources(
        config: InsightConfig,
        eth: Arc<dyn EthBalanceSource>,
        neo: Arc<dyn AccountStateSource>,
    ) -> Self {
        let service = BalanceService::new(eth, neo, config.cache_config());
        Self {
            config,
            service,
            started_at: Utc::now(),
        }
    }
}
