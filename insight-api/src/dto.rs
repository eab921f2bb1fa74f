//! DTOs for API requests and responses.
//!
//! Field names follow the wire format existing clients already send
//! (`Address`, `Asset`, `Value`).

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Batch balance request: `Address[i]` is paired with `Asset[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceRequest {
    /// Holder addresses
    #[serde(default)]
    pub address: Vec<String>,
    /// Asset identifiers, same length as `address`
    #[serde(default)]
    pub asset: Vec<String>,
}

impl BalanceRequest {
    /// Rejects requests whose lists cannot be paired.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.address.len() != self.asset.len() {
            return Err(ApiError::bad_request(format!(
                "Address and Asset must have the same length ({} != {})",
                self.address.len(),
                self.asset.len()
            )));
        }
        Ok(())
    }

    /// Iterates the (address, asset) pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.address
            .iter()
            .zip(self.asset.iter())
            .map(|(address, asset)| (address.as_str(), asset.as_str()))
    }
}

/// One balance in a batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressBalance {
    /// Address as sent by the client
    pub address: String,
    /// Asset as sent by the client
    pub asset: String,
    /// Cached balance in the chain's encoding
    pub value: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Start time (RFC 3339)
    pub started_at: String,
    /// Seconds since start
    pub uptime_seconds: i64,
    /// Whether the refresh schedulers are running
    pub refreshing: bool,
    /// Slots in the ETH cache
    pub eth_cache_entries: usize,
    /// Slots in the NEO cache
    pub neo_cache_entries: usize,
}
