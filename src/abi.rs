//! Contract interface loading
//!
//! The registry, market and credit ABIs are read from disk once at start-up.
//! Builders look methods up by name in these tables.

use crate::constants::{CREDIT_ABI_FILE, MARKET_ABI_FILE, REGISTRY_ABI_FILE};
use alloy::json_abi::{Function, JsonAbi};
use eyre::{eyre, Context, Result};
use std::path::Path;
use tracing::debug;

/// Parsed interfaces of the three contracts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAbis {
    /// Registry interface
    pub registry: JsonAbi,
    /// Market interface
    pub market: JsonAbi,
    /// Credit token interface
    pub credit: JsonAbi,
}

impl ContractAbis {
    /// Load `Registry.abi`, `Market.abi` and `Credit.abi` from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        Ok(Self {
            registry: load_abi(&dir.join(REGISTRY_ABI_FILE))?,
            market: load_abi(&dir.join(MARKET_ABI_FILE))?,
            credit: load_abi(&dir.join(CREDIT_ABI_FILE))?,
        })
    }
}

/// Read and parse a single ABI file (a JSON array of interface items)
pub fn load_abi(path: &Path) -> Result<JsonAbi> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ABI file {}", path.display()))?;
    let abi = parse_abi(&json).with_context(|| format!("Invalid ABI file {}", path.display()))?;

    debug!(path = %path.display(), functions = abi.functions.len(), "loaded ABI");
    Ok(abi)
}

/// Parse ABI JSON
pub fn parse_abi(json: &str) -> Result<JsonAbi> {
    serde_json::from_str(json).context("Malformed ABI JSON")
}

/// Find a method by name. Overloads resolve to the first declaration.
pub fn method<'a>(abi: &'a JsonAbi, name: &str) -> Result<&'a Function> {
    abi.function(name)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| eyre!("Method '{}' not found in contract interface", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abi_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("abi")
    }

    #[test]
    fn test_load_shipped_abis() {
        let abis = ContractAbis::load(abi_dir()).unwrap();

        for name in ["register", "revise", "add_node"] {
            assert!(method(&abis.registry, name).is_ok(), "registry.{name}");
        }
        for name in ["createOrder", "userConfirm", "userCancel"] {
            assert!(method(&abis.market, name).is_ok(), "market.{name}");
        }
        let approve = method(&abis.credit, "approve").unwrap();
        assert_eq!(approve.signature(), "approve(address,uint256)");
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let err = ContractAbis::load("/nonexistent/abi").unwrap_err();
        assert!(err.to_string().contains("Failed to read ABI file"));
    }

    #[test]
    fn test_malformed_abi_rejected() {
        assert!(parse_abi("{not an abi").is_err());
        assert!(parse_abi(r#"[{"type": "function", "name": 7}]"#).is_err());
    }

    #[test]
    fn test_unknown_method() {
        let abi = parse_abi("[]").unwrap();
        let err = method(&abi, "register").unwrap_err();
        assert!(err.to_string().contains("'register' not found"));
    }
}
