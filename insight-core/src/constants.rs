//! Protocol constants and service defaults for wallet-insight.

// ═══════════════════════════════════════════════════════════════════════════════
// ZERO-BALANCE SENTINELS
// ═══════════════════════════════════════════════════════════════════════════════

/// Placeholder stored for an Ethereum-family key before its first successful fetch.
/// Identical to the encoding of a real zero balance.
pub const ETH_ZERO_BALANCE: &str = "0x0";

/// Placeholder stored for a NEO-family asset before its first successful fetch.
pub const NEO_ZERO_BALANCE: &str = "0";

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Asset identifier that selects the native coin balance instead of a token contract.
pub const NATIVE_ETH_ASSET: &str = "eth";

/// Size of an Ethereum address in bytes.
pub const ETH_ADDRESS_SIZE: usize = 20;

/// ERC-20 `balanceOf(address)` function selector.
pub const ERC20_BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Size of one ABI word in bytes.
pub const ABI_WORD_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default interval between refresh/evict sweeps.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

/// Default idle window after which an entry is evicted.
pub const DEFAULT_RETENTION_SECS: u64 = 600;

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORK DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default Ethereum JSON-RPC endpoint.
pub const DEFAULT_ETH_RPC_URL: &str = "https://ethereum.publicnode.com";

/// Default NEO JSON-RPC endpoint.
pub const DEFAULT_NEO_RPC_URL: &str = "http://seed1.ngd.network:10332";

/// Default timeout for a single upstream RPC call.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

/// Default HTTP bind address for the balance API.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_of_selector() {
        // keccak256("balanceOf(address)")[..4]
        assert_eq!(hex::encode(ERC20_BALANCE_OF_SELECTOR), "70a08231");
    }

    #[test]
    fn test_sentinels_differ_per_family() {
        assert_ne!(ETH_ZERO_BALANCE, NEO_ZERO_BALANCE);
    }

    #[test]
    fn test_retention_outlives_refresh() {
        assert!(DEFAULT_RETENTION_SECS > DEFAULT_REFRESH_INTERVAL_SECS);
    }
}
