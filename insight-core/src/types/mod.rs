//! Domain types for wallet-insight.
//!
//! - [`ChainFamily`]: which cache subsystem a query belongs to
//! - [`EthAsset`]: native coin vs. ERC-20 token dispatch
//! - [`AssetBalance`]: one (asset, value) pair reported by a node

mod balance;
mod chain;

pub use balance::*;
pub use chain::*;
