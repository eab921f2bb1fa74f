//! Ethereum balance client.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::json;
use tracing::instrument;

use insight_core::constants::{ABI_WORD_SIZE, ERC20_BALANCE_OF_SELECTOR, ETH_ADDRESS_SIZE};
use insight_core::error::{InsightError, Result};
use insight_core::traits::EthBalanceSource;
use insight_core::types::{decode_quantity, parse_eth_address};

use crate::jsonrpc::{JsonRpcClient, RpcConfig};

/// Ethereum JSON-RPC client for native and ERC-20 balances.
pub struct EthRpcClient {
    rpc: JsonRpcClient,
}

impl EthRpcClient {
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

    /// Gets the native coin balance (wei) of `address` at the latest block.
    #[instrument(skip(self))]
    pub async fn get_balance(&self, address: &str) -> Result<U256> {
        let holder = parse_eth_address(address)?;

        let quantity: String = self
            .rpc
            .call("eth_getBalance", json!([hex_address(&holder), "latest"]))
            .await?;

        decode_quantity(&quantity).map_err(|e| InsightError::malformed("eth_getBalance", e.to_string()))
    }

    /// Gets the ERC-20 balance of `address` in token contract `token`.
    #[instrument(skip(self))]
    pub async fn get_token_balance(&self, token: &str, address: &str) -> Result<U256> {
        let contract = parse_eth_address(token)
            .map_err(|_| InsightError::InvalidAsset(format!("'{}' is not a token contract address", token)))?;
        let holder = parse_eth_address(address)?;

        let word: String = self
            .rpc
            .call(
                "eth_call",
                json!([
                    { "to": hex_address(&contract), "data": encode_balance_of(&holder) },
                    "latest"
                ]),
            )
            .await?;

        decode_quantity(&word).map_err(|e| InsightError::malformed("eth_call", e.to_string()))
    }
}

#[async_trait]
impl EthBalanceSource for EthRpcClient {
    async fn native_balance(&self, address: &str) -> Result<U256> {
        self.get_balance(address).await
    }

    async fn token_balance(&self, token: &str, address: &str) -> Result<U256> {
        self.get_token_balance(token, address).await
    }
}

fn hex_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// ABI-encodes `balanceOf(holder)`: selector followed by the left-padded address word.
fn encode_balance_of(holder: &Address) -> String {
    let mut data = Vec::with_capacity(ERC20_BALANCE_OF_SELECTOR.len() + ABI_WORD_SIZE);
    data.extend_from_slice(&ERC20_BALANCE_OF_SELECTOR);
    data.extend_from_slice(&[0u8; ABI_WORD_SIZE - ETH_ADDRESS_SIZE]);
    data.extend_from_slice(holder.as_slice());
    format!("0x{}", hex::encode(data))
}
