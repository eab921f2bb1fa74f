//! Balance values and their wire encoding.
//!
//! Ethereum-family values are served as `0x`-prefixed lowercase hex without
//! leading zeros (`"0x0"` for zero). NEO-family values are the decimal strings
//! reported by the node, passed through untouched.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::ETH_ADDRESS_SIZE;
use crate::error::{InsightError, Result};

/// One asset balance as reported by an account-state query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBalance {
    /// Asset identifier as reported by the node
    pub asset: String,
    /// Balance, already in the family's string encoding
    pub value: String,
}

impl AssetBalance {
    /// Creates a new asset balance pair.
    pub fn new(asset: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            value: value.into(),
        }
    }
}

/// Encodes a balance as `0x`-prefixed minimal lowercase hex.
pub fn encode_quantity(value: U256) -> String {
    if value.is_zero() {
        "0x0".to_string()
    } else {
        format!("0x{:x}", value)
    }
}

/// Decodes a JSON-RPC quantity or ABI word (`0x`-prefixed hex) into a `U256`.
///
/// An empty payload (`"0x"`) decodes to zero, which is what nodes return for
/// `eth_call` against an address without code.
pub fn decode_quantity(s: &str) -> Result<U256> {
    let digits = s
        .trim()
        .strip_prefix("0x")
        .or_else(|| s.trim().strip_prefix("0X"))
        .ok_or_else(|| InsightError::ValidationError(format!("quantity '{}' lacks 0x prefix", s)))?;

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 16)
        .map_err(|e| InsightError::ValidationError(format!("invalid quantity '{}': {}", s, e)))
}

/// Parses a 20-byte hex Ethereum address (checksum not enforced).
pub fn parse_eth_address(s: &str) -> Result<Address> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    if digits.len() != ETH_ADDRESS_SIZE * 2 {
        return Err(InsightError::InvalidAddress(format!(
            "'{}': expected {} hex characters, got {}",
            s,
            ETH_ADDRESS_SIZE * 2,
            digits.len()
        )));
    }

    let bytes = hex::decode(digits)
        .map_err(|e| InsightError::InvalidAddress(format!("'{}': {}", s, e)))?;
    Ok(Address::from_slice(&bytes))
}
