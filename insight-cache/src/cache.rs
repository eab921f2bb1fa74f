//! In-memory balance cache with access-based TTL and background refresh.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use insight_core::types::{AssetBalance, ChainFamily};

use crate::config::CacheConfig;
use crate::strategy::FetchStrategy;

/// Cached balances of one slot plus its access clock.
struct Slot {
    values: HashMap<String, String>,
    last_access: Instant,
}

impl Slot {
    fn new(now: Instant) -> Self {
        Self {
            values: HashMap::new(),
            last_access: now,
        }
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_access)
    }

    fn apply(&mut self, balances: Vec<AssetBalance>) {
        for balance in balances {
            self.values.insert(balance.asset, balance.value);
        }
    }
}

/// Balance cache for one chain family.
///
/// Thread-safe. A single exclusive lock guards the whole map and is held for
/// the full duration of a lookup (including the upstream fetch on a miss) and
/// of a sweep, so every operation on one cache is totally ordered and a miss
/// triggers at most one fetch. A slow upstream therefore delays other lookups
/// on the same cache; the other family's cache is unaffected.
///
/// `last_access` moves only on lookups, so the TTL counts time since the last
/// client request, not since the last refresh.
pub struct BalanceCache<S: FetchStrategy> {
    strategy: S,
    slots: Mutex<HashMap<S::Key, Slot>>,
    retention: Duration,
}

impl<S: FetchStrategy> BalanceCache<S> {
    /// Creates a cache with default configuration.
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, &CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(strategy: S, config: &CacheConfig) -> Self {
        Self {
            strategy,
            slots: Mutex::new(HashMap::new()),
            retention: config.retention(),
        }
    }

    /// Chain family served by this cache.
    pub fn family(&self) -> ChainFamily {
        self.strategy.family()
    }

    /// Idle window after which a slot is evicted.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Returns the balance of `asset` held by `address`.
    ///
    /// Never fails. On a miss the zero sentinel is stored before the fetch, the
    /// fetch result (every asset it reports) is written back, and the requested
    /// value is returned. If the fetch fails the sentinel stays and is returned;
    /// the next refresh sweep retries it.
    pub async fn lookup(&self, address: &str, asset: &str) -> String {
        let family = self.strategy.family();
        let address = family.normalize_address(address);
        let asset = family.normalize_asset(asset);
        let key = self.strategy.slot_key(&address, &asset);
        let sentinel = family.zero_balance();

        let mut slots = self.slots.lock().await;
        let now = Instant::now();
        let slot = slots.entry(key.clone()).or_insert_with(|| Slot::new(now));
        slot.last_access = now;

        if let Some(value) = slot.values.get(&asset) {
            return value.clone();
        }

        slot.values.insert(asset.clone(), sentinel.to_string());
        debug!(chain = %family, %address, %asset, "Cache miss, fetching");

        match self.strategy.fetch(&key).await {
            Ok(balances) => {
                slot.apply(balances);
                slot.values
                    .get(&asset)
                    .cloned()
                    .unwrap_or_else(|| sentinel.to_string())
            }
            Err(e) => {
                warn!(chain = %family, %address, %asset, error = %e, "Balance fetch failed, serving zero");
                sentinel.to_string()
            }
        }
    }

    /// Re-fetches every live slot and evicts idle ones in a single pass.
    ///
    /// This is what the scheduler runs on each tick. Expired slots are not
    /// fetched; they are removed after the scan.
    pub async fn sweep(&self) -> SweepReport {
        self.run_sweep(true, true).await
    }

    /// Re-fetches every live slot without evicting anything.
    pub async fn refresh_sweep(&self) -> SweepReport {
        self.run_sweep(true, false).await
    }

    /// Drops every slot idle for longer than the retention window.
    pub async fn evict_sweep(&self) -> SweepReport {
        self.run_sweep(false, true).await
    }

    async fn run_sweep(&self, refresh: bool, evict: bool) -> SweepReport {
        let family = self.strategy.family();
        let mut report = SweepReport::default();

        let mut slots = self.slots.lock().await;
        let now = Instant::now();
        let keys: Vec<S::Key> = slots.keys().cloned().collect();
        let mut expired = Vec::new();

        for key in keys {
            let Some(slot) = slots.get_mut(&key) else {
                continue;
            };

            if slot.idle_for(now) > self.retention {
                if evict {
                    expired.push(key);
                }
                continue;
            }

            if !refresh {
                continue;
            }

            match self.strategy.fetch(&key).await {
                Ok(balances) => {
                    slot.apply(balances);
                    report.refreshed += 1;
                }
                Err(e) => {
                    warn!(chain = %family, key = ?key, error = %e, "Refresh failed, keeping previous value");
                    report.failed += 1;
                }
            }
        }

        for key in &expired {
            slots.remove(key);
        }
        report.evicted = expired.len();

        debug!(
            chain = %family,
            refreshed = report.refreshed,
            failed = report.failed,
            evicted = report.evicted,
            remaining = slots.len(),
            "Sweep complete"
        );

        report
    }

    /// Returns the cached value without touching the access clock or fetching.
    pub async fn peek(&self, address: &str, asset: &str) -> Option<String> {
        let family = self.strategy.family();
        let address = family.normalize_address(address);
        let asset = family.normalize_asset(asset);
        let key = self.strategy.slot_key(&address, &asset);

        let slots = self.slots.lock().await;
        slots.get(&key).and_then(|slot| slot.values.get(&asset).cloned())
    }

    /// Returns the number of slots.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Returns true if the cache holds no slots.
    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    /// Returns cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let slots = self.slots.lock().await;
        let now = Instant::now();
        let expired = slots
            .values()
            .filter(|slot| slot.idle_for(now) > self.retention)
            .count();

        CacheStats {
            total_slots: slots.len(),
            total_values: slots.values().map(|slot| slot.values.len()).sum(),
            expired_slots: expired,
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Slots held (addresses or address/asset pairs)
    pub total_slots: usize,
    /// Asset values held across all slots
    pub total_values: usize,
    /// Slots past the retention window awaiting the next sweep
    pub expired_slots: usize,
}

/// Outcome of one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Slots fetched successfully
    pub refreshed: usize,
    /// Slots whose fetch failed (previous values kept)
    pub failed: usize,
    /// Slots removed for being idle past retention
    pub evicted: usize,
}
