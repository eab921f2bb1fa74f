//! Balance service: both chain caches plus their refresh schedulers.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use insight_cache::{
    AccountStateStrategy, CacheConfig, NativeStateCache, PerAssetCache, PerAssetStrategy,
    RefreshScheduler,
};
use insight_core::error::Result;
use insight_core::traits::{AccountStateSource, EthBalanceSource};
use insight_core::types::ChainFamily;

/// Owns the ETH and NEO caches and the background tasks that keep them fresh.
pub struct BalanceService {
    eth: Arc<PerAssetCache>,
    neo: Arc<NativeStateCache>,
    config: CacheConfig,
    schedulers: Mutex<Vec<RefreshScheduler>>,
}

impl BalanceService {
    /// Creates both caches. Schedulers are not running until [`start`](Self::start).
    pub fn new(
        eth: Arc<dyn EthBalanceSource>,
        neo: Arc<dyn AccountStateSource>,
        config: CacheConfig,
    ) -> Self {
        Self {
            eth: Arc::new(PerAssetCache::with_config(PerAssetStrategy::new(eth), &config)),
            neo: Arc::new(NativeStateCache::with_config(AccountStateStrategy::new(neo), &config)),
            config,
            schedulers: Mutex::new(Vec::new()),
        }
    }

    /// Spawns one refresh scheduler per cache. Calling it again is a no-op.
    ///
    /// Must be called from within a tokio runtime. Fails without spawning
    /// anything if the cache configuration is invalid.
    pub fn start(&self) -> Result<()> {
        let mut schedulers = self.schedulers.lock();
        if !schedulers.is_empty() {
            return Ok(());
        }

        self.config.validate()?;
        let interval = self.config.refresh_interval();
        schedulers.push(RefreshScheduler::spawn(self.eth.clone(), interval)?);
        schedulers.push(RefreshScheduler::spawn(self.neo.clone(), interval)?);
        info!(interval_secs = interval.as_secs(), "Balance refresh started");
        Ok(())
    }

    /// Stops every running scheduler and waits for them to exit.
    pub async fn shutdown(&self) {
        let running: Vec<RefreshScheduler> = std::mem::take(&mut *self.schedulers.lock());
        if running.is_empty() {
            return;
        }

        for scheduler in running {
            scheduler.stop().await;
        }
        info!("Balance refresh stopped");
    }

    /// Whether the schedulers are running.
    pub fn is_running(&self) -> bool {
        !self.schedulers.lock().is_empty()
    }

    /// Looks up one balance on the cache of `chain`.
    pub async fn lookup(&self, chain: ChainFamily, address: &str, asset: &str) -> String {
        match chain {
            ChainFamily::Eth => self.eth.lookup(address, asset).await,
            ChainFamily::Neo => self.neo.lookup(address, asset).await,
        }
    }

    /// ETH cache.
    pub fn eth_cache(&self) -> &Arc<PerAssetCache> {
        &self.eth
    }

    /// NEO cache.
    pub fn neo_cache(&self) -> &Arc<NativeStateCache> {
        &self.neo
    }
}
