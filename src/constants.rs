//! Constants shared by the loaders, builders and the broadcaster

use std::time::Duration;

/// Local development chain (Ganache default port)
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:7545";

/// Public Sepolia endpoint
pub const SEPOLIA_RPC_URL: &str = "https://rpc.sepolia.ethpandaops.io";

/// Sepolia chain ID
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Gas limit attached to every call type
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Receipt poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Give up waiting for a receipt after this long (60 polls at the default interval)
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(120);

/// Default directory holding `Registry.abi`, `Market.abi` and `Credit.abi`
pub const DEFAULT_ABI_DIR: &str = "abi";

/// Default directory holding `<environment>.json` contract address files
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// Registry ABI file name
pub const REGISTRY_ABI_FILE: &str = "Registry.abi";

/// Market ABI file name
pub const MARKET_ABI_FILE: &str = "Market.abi";

/// Credit ABI file name
pub const CREDIT_ABI_FILE: &str = "Credit.abi";

/// Allowance granted to the market by the sample approve call
pub const SAMPLE_APPROVE_AMOUNT: u64 = 262_695_400;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_covers_sixty_polls() {
        assert_eq!(DEFAULT_CONFIRM_TIMEOUT, DEFAULT_POLL_INTERVAL * 60);
    }
}
