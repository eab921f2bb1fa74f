//! # Wallet Insight RPC
//!
//! JSON-RPC clients that implement the balance source traits consumed by the
//! cache:
//!
//! - [`EthRpcClient`]: `eth_getBalance` and ERC-20 `balanceOf` via `eth_call`
//! - [`NeoRpcClient`]: `getaccountstate`, every asset of an address at once

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod eth;
mod jsonrpc;
mod neo;

pub use eth::EthRpcClient;
pub use jsonrpc::RpcConfig;
pub use neo::NeoRpcClient;
