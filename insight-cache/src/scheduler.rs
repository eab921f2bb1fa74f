//! Periodic refresh/evict task for a balance cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, Instrument};

use insight_core::error::{InsightError, Result};

use crate::cache::BalanceCache;
use crate::strategy::FetchStrategy;

/// Background task sweeping one cache at a fixed interval until stopped.
///
/// The first sweep runs one interval after spawning. Dropping the handle
/// without calling [`RefreshScheduler::stop`] aborts the task.
pub struct RefreshScheduler {
    shutdown: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// Fails with a configuration error if `interval` is zero.
    pub fn spawn<S: FetchStrategy>(cache: Arc<BalanceCache<S>>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(InsightError::ConfigError(
                "refresh interval must be at least 1 second".into(),
            ));
        }

        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();
        let family = cache.family();

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(
            async move {
                info!(
                    interval_secs = interval.as_secs(),
                    retention_secs = cache.retention().as_secs(),
                    "Refresh scheduler started"
                );

                loop {
                    tokio::select! {
                        _ = signal.notified() => {
                            break;
                        }
                        _ = ticker.tick() => {
                            let report = cache.sweep().await;
                            debug!(
                                refreshed = report.refreshed,
                                failed = report.failed,
                                evicted = report.evicted,
                                "Scheduled sweep"
                            );
                        }
                    }
                }

                info!("Refresh scheduler stopped");
            }
            .instrument(info_span!("refresh_scheduler", chain = %family)),
        );

        Ok(Self {
            shutdown,
            handle: Some(handle),
        })
    }

    /// Signals the loop to stop and waits for it to exit.
    ///
    /// A sweep already in progress runs to completion first.
    pub async fn stop(mut self) {
        self.shutdown.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
