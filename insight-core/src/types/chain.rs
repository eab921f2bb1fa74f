//! Chain families and key normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ETH_ZERO_BALANCE, NATIVE_ETH_ASSET, NEO_ZERO_BALANCE};
use crate::error::InsightError;

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN FAMILY
// ═══════════════════════════════════════════════════════════════════════════════

/// The two chain families served by the balance cache.
///
/// - `Eth`: every (address, asset) balance is fetched on its own.
/// - `Neo`: one account-state query returns every asset of an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// Ethereum-style, per-asset queries.
    Eth,
    /// NEO-style, whole account state queries.
    Neo,
}

impl ChainFamily {
    /// Short lowercase name, also used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainFamily::Eth => "eth",
            ChainFamily::Neo => "neo",
        }
    }

    /// The value served for a key whose balance has not been fetched successfully.
    pub fn zero_balance(&self) -> &'static str {
        match self {
            ChainFamily::Eth => ETH_ZERO_BALANCE,
            ChainFamily::Neo => NEO_ZERO_BALANCE,
        }
    }

    /// Normalizes an address so that read and write paths agree on the slot.
    ///
    /// Ethereum identifiers are case-insensitive hex; NEO identifiers are
    /// base58 and used verbatim.
    pub fn normalize_address(&self, address: &str) -> String {
        match self {
            ChainFamily::Eth => address.trim().to_lowercase(),
            ChainFamily::Neo => address.to_string(),
        }
    }

    /// Normalizes an asset identifier. Same rules as [`Self::normalize_address`].
    pub fn normalize_asset(&self, asset: &str) -> String {
        match self {
            ChainFamily::Eth => asset.trim().to_lowercase(),
            ChainFamily::Neo => asset.to_string(),
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainFamily {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eth" | "ethereum" => Ok(ChainFamily::Eth),
            "neo" => Ok(ChainFamily::Neo),
            other => Err(InsightError::ValidationError(format!(
                "unknown chain family '{}'",
                other
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ETH ASSET
// ═══════════════════════════════════════════════════════════════════════════════

/// Which upstream call answers an Ethereum-family balance query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EthAsset {
    /// The chain's native coin (`eth_getBalance`).
    Native,
    /// An ERC-20 token contract (`balanceOf` via `eth_call`).
    Token(String),
}

impl EthAsset {
    /// Classifies an already-normalized asset identifier.
    pub fn classify(asset: &str) -> Self {
        if asset == NATIVE_ETH_ASSET {
            EthAsset::Native
        } else {
            EthAsset::Token(asset.to_string())
        }
    }
}
