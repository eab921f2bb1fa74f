//! NEO account-state client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use insight_core::error::{InsightError, Result};
use insight_core::traits::AccountStateSource;
use insight_core::types::AssetBalance;

use crate::jsonrpc::{JsonRpcClient, RpcConfig};

/// Subset of the `getaccountstate` result the cache needs.
#[derive(Deserialize)]
struct AccountState {
    #[serde(default)]
    balances: Vec<AssetBalance>,
}

/// NEO JSON-RPC client.
pub struct NeoRpcClient {
    rpc: JsonRpcClient,
}

impl NeoRpcClient {
    /// Creates a client for the given endpoint with the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self> {
        Self::with_config(RpcConfig::new(rpc_url))
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self> {
        Ok(Self {
            rpc: JsonRpcClient::new(&config)?,
        })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        self.rpc.url().as_str()
    }

    /// Gets every asset balance of `address`.
    #[instrument(skip(self))]
    pub async fn get_account_state(&self, address: &str) -> Result<Vec<AssetBalance>> {
        if address.trim().is_empty() {
            return Err(InsightError::InvalidAddress("NEO address cannot be empty".into()));
        }

        let state: AccountState = self.rpc.call("getaccountstate", json!([address])).await?;
        debug!(address, assets = state.balances.len(), "Account state fetched");
        Ok(state.balances)
    }
}

#[async_trait]
impl AccountStateSource for NeoRpcClient {
    async fn account_state(&self, address: &str) -> Result<Vec<AssetBalance>> {
        self.get_account_state(address).await
    }
}
