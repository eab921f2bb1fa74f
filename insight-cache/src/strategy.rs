//! Fetch strategies: how a cache slot is keyed and how it is (re)populated.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;

use insight_core::error::Result;
use insight_core::traits::{AccountStateSource, EthBalanceSource};
use insight_core::types::{encode_quantity, AssetBalance, ChainFamily, EthAsset};

/// Pluggable fetch behavior of a [`crate::BalanceCache`].
///
/// A strategy decides which slot an (address, asset) pair lives in and how to
/// fetch the balances of a slot. A fetch may return more assets than were
/// asked for; the cache stores all of them.
#[async_trait]
pub trait FetchStrategy: Send + Sync + 'static {
    /// Slot key in the cache map.
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    /// Chain family served, which also fixes normalization and the sentinel.
    fn family(&self) -> ChainFamily;

    /// Maps an already-normalized (address, asset) pair to its slot.
    fn slot_key(&self, address: &str, asset: &str) -> Self::Key;

    /// Fetches the current balances for a slot.
    async fn fetch(&self, key: &Self::Key) -> Result<Vec<AssetBalance>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-ASSET
// ═══════════════════════════════════════════════════════════════════════════════

/// Slot key of the per-asset cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetKey {
    /// Normalized holder address
    pub address: String,
    /// Normalized asset identifier (`eth` or a token contract)
    pub asset: String,
}

/// One upstream call per (address, asset): `eth_getBalance` for the native
/// coin, ERC-20 `balanceOf` for anything else.
pub struct PerAssetStrategy {
    source: Arc<dyn EthBalanceSource>,
}

impl PerAssetStrategy {
    /// Creates a strategy backed by the given balance source.
    pub fn new(source: Arc<dyn EthBalanceSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl FetchStrategy for PerAssetStrategy {
    type Key = AssetKey;

    fn family(&self) -> ChainFamily {
        ChainFamily::Eth
    }

    fn slot_key(&self, address: &str, asset: &str) -> AssetKey {
        AssetKey {
            address: address.to_string(),
            asset: asset.to_string(),
        }
    }

    async fn fetch(&self, key: &AssetKey) -> Result<Vec<AssetBalance>> {
        let value = match EthAsset::classify(&key.asset) {
            EthAsset::Native => self.source.native_balance(&key.address).await?,
            EthAsset::Token(token) => self.source.token_balance(&token, &key.address).await?,
        };
        Ok(vec![AssetBalance::new(key.asset.clone(), encode_quantity(value))])
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNT STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// One upstream call per address returning every asset it holds.
pub struct AccountStateStrategy {
    source: Arc<dyn AccountStateSource>,
}

impl AccountStateStrategy {
    /// Creates a strategy backed by the given account-state source.
    pub fn new(source: Arc<dyn AccountStateSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl FetchStrategy for AccountStateStrategy {
    type Key = String;

    fn family(&self) -> ChainFamily {
        ChainFamily::Neo
    }

    fn slot_key(&self, address: &str, _asset: &str) -> String {
        address.to_string()
    }

    async fn fetch(&self, key: &String) -> Result<Vec<AssetBalance>> {
        self.source.account_state(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockEthSource, MockNeoSource};
    use alloy::primitives::U256;

    #[tokio::test]
    async fn test_per_asset_dispatch() {
        let source = Arc::new(MockEthSource::new());
        source.set("0xholder", "eth", U256::from(5u64));
        source.set("0xholder", "0xtoken", U256::from(255u64));
        let strategy = PerAssetStrategy::new(source.clone());

        let native = strategy.fetch(&strategy.slot_key("0xholder", "eth")).await.unwrap();
        assert_eq!(native, vec![AssetBalance::new("eth", "0x5")]);

        let token = strategy.fetch(&strategy.slot_key("0xholder", "0xtoken")).await.unwrap();
        assert_eq!(token, vec![AssetBalance::new("0xtoken", "0xff")]);

        assert_eq!(source.native_calls(), 1);
        assert_eq!(source.token_calls(), 1);
    }

    #[tokio::test]
    async fn test_account_state_ignores_asset_in_key() {
        let source = Arc::new(MockNeoSource::new());
        let strategy = AccountStateStrategy::new(source);
        assert_eq!(strategy.slot_key("Aaddr", "X"), strategy.slot_key("Aaddr", "Y"));
    }
}
