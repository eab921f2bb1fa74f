//! # Wallet Insight Core
//!
//! Core types, errors, and traits shared by every wallet-insight crate.
//!
//! - **Types**: chain families, cache keys, balance values and their encoding
//! - **Errors**: a single error hierarchy with recoverability classification
//! - **Constants**: sentinels, defaults, and wire-level selectors
//! - **Traits**: the RPC collaborator contracts the cache consumes
//!
//! ## Example
//!
//! ```rust
//! use insight_core::{ChainFamily, encode_quantity};
//! use alloy::primitives::U256;
//!
//! assert_eq!(ChainFamily::Eth.zero_balance(), "0x0");
//! assert_eq!(encode_quantity(U256::from(5u64)), "0x5");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{InsightError, Result};
pub use traits::*;
pub use types::*;
