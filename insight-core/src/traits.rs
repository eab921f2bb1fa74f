//! RPC collaborator traits.
//!
//! The balance cache never talks to a chain node directly; it consumes these
//! interfaces so that real JSON-RPC clients and test doubles are interchangeable.
//! Implementations must be safe to call concurrently from both cache subsystems.

use alloy::primitives::U256;
use async_trait::async_trait;

use crate::error::Result;
use crate::types::AssetBalance;

// ═══════════════════════════════════════════════════════════════════════════════
// PER-ASSET FAMILY
// ═══════════════════════════════════════════════════════════════════════════════

/// Balance source for chains where each (address, asset) is queried on its own.
#[async_trait]
pub trait EthBalanceSource: Send + Sync {
    /// Fetches the native coin balance of `address`.
    async fn native_balance(&self, address: &str) -> Result<U256>;

    /// Fetches the balance of token contract `token` held by `address`.
    async fn token_balance(&self, token: &str, address: &str) -> Result<U256>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// NATIVE-STATE FAMILY
// ═══════════════════════════════════════════════════════════════════════════════

/// Balance source for chains where one query reports every asset of an address.
#[async_trait]
pub trait AccountStateSource: Send + Sync {
    /// Fetches the complete known balance set of `address`.
    async fn account_state(&self, address: &str) -> Result<Vec<AssetBalance>>;
}
