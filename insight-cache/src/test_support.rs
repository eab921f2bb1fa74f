//! Test doubles for the RPC collaborator traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use alloy::primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;

use insight_core::error::{InsightError, Result};
use insight_core::traits::{AccountStateSource, EthBalanceSource};
use insight_core::types::AssetBalance;

/// Ethereum-family source backed by a map of (address, asset) → balance.
/// Unknown pairs report zero, like a node would.
pub(crate) struct MockEthSource {
    balances: Mutex<HashMap<(String, String), U256>>,
    native_calls: AtomicUsize,
    token_calls: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl MockEthSource {
    pub(crate) fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            native_calls: AtomicUsize::new(0),
            token_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: None,
        }
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(crate) fn set(&self, address: &str, asset: &str, value: U256) {
        self.balances
            .lock()
            .insert((address.to_string(), asset.to_string()), value);
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn native_calls(&self) -> usize {
        self.native_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.native_calls() + self.token_calls()
    }

    async fn answer(&self, address: &str, asset: &str) -> Result<U256> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(InsightError::ConnectionTimeout("mock node unreachable".into()));
        }
        Ok(self
            .balances
            .lock()
            .get(&(address.to_string(), asset.to_string()))
            .copied()
            .unwrap_or(U256::ZERO))
    }
}

#[async_trait]
impl EthBalanceSource for MockEthSource {
    async fn native_balance(&self, address: &str) -> Result<U256> {
        self.native_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(address, "eth").await
    }

    async fn token_balance(&self, token: &str, address: &str) -> Result<U256> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(address, token).await
    }
}

/// NEO-family source backed by a map of address → account state.
pub(crate) struct MockNeoSource {
    states: Mutex<HashMap<String, Vec<AssetBalance>>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl MockNeoSource {
    pub(crate) fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: None,
        }
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(crate) fn set(&self, address: &str, balances: &[(&str, &str)]) {
        self.states.lock().insert(
            address.to_string(),
            balances
                .iter()
                .map(|(asset, value)| AssetBalance::new(*asset, *value))
                .collect(),
        );
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStateSource for MockNeoSource {
    async fn account_state(&self, address: &str) -> Result<Vec<AssetBalance>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(InsightError::rpc("getaccountstate", "mock node unreachable"));
        }
        Ok(self.states.lock().get(address).cloned().unwrap_or_default())
    }
}
