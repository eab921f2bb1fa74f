//! Balance cache and refresh engine for wallet-insight.
//!
//! One generic engine, [`BalanceCache`], parameterized by a [`FetchStrategy`]
//! and instantiated once per chain family:
//!
//! - [`PerAssetCache`]: one slot per (address, asset), Ethereum-style chains
//! - [`NativeStateCache`]: one slot per address holding every asset, NEO-style chains
//!
//! A [`RefreshScheduler`] drives the periodic refresh/evict sweep of a cache.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod config;
mod scheduler;
mod strategy;

#[cfg(test)]
mod test_support;

pub use cache::{BalanceCache, CacheStats, SweepReport};
pub use config::CacheConfig;
pub use scheduler::RefreshScheduler;
pub use strategy::{AccountStateStrategy, AssetKey, FetchStrategy, PerAssetStrategy};

/// Cache for chains where each (address, asset) balance is fetched on its own.
pub type PerAssetCache = BalanceCache<PerAssetStrategy>;

/// Cache for chains where one account-state query returns every asset.
pub type NativeStateCache = BalanceCache<AccountStateStrategy>;
