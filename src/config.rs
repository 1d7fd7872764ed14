//! Network configuration for grid-sendtx
//!
//! An environment name selects the chain endpoint, the chain ID and the JSON
//! file holding the deployed registry/market/credit addresses. Everything is
//! resolved once at start-up into an immutable [`NetworkConfig`].

use crate::constants::{DEFAULT_DEPLOYMENTS_DIR, LOCAL_RPC_URL, SEPOLIA_CHAIN_ID, SEPOLIA_RPC_URL};
use alloy::primitives::Address;
use alloy::transports::http::reqwest::Url;
use eyre::{bail, eyre, Context, Report, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Deployment environment the transactions target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development chain
    Local,
    /// Sepolia test network
    Sepolia,
    /// Shared development chain
    Dev,
    /// Shared test chain
    Test,
}

impl Environment {
    /// Short name, also used as the address file stem (`deployments/<name>.json`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Sepolia => "sepo",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }

    /// Built-in RPC endpoint, if the environment has one
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Self::Local => Some(LOCAL_RPC_URL),
            Self::Sepolia => Some(SEPOLIA_RPC_URL),
            Self::Dev | Self::Test => None,
        }
    }

    /// Built-in chain ID, if the environment has one
    ///
    /// Environments without one ask the node once before signing.
    pub fn default_chain_id(&self) -> Option<u64> {
        match self {
            Self::Sepolia => Some(SEPOLIA_CHAIN_ID),
            Self::Local | Self::Dev | Self::Test => None,
        }
    }

    /// Default location of the contract address file
    pub fn default_contracts_file(&self) -> PathBuf {
        Path::new(DEFAULT_DEPLOYMENTS_DIR).join(format!("{}.json", self.name()))
    }
}

impl FromStr for Environment {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "sepo" | "sepolia" => Ok(Self::Sepolia),
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            other => bail!(
                "Unknown environment '{}' (expected one of: local, sepolia, dev, test)",
                other
            ),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Addresses of the three contracts this tool talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// Registry contract (providers and nodes)
    #[serde(alias = "Registry")]
    pub registry: Address,
    /// Market contract (orders)
    #[serde(alias = "Market")]
    pub market: Address,
    /// Credit token contract
    #[serde(alias = "Credit")]
    pub credit: Address,
}

impl ContractAddresses {
    /// Parse an address file's contents. Unknown keys are ignored.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Malformed contract address file")
    }

    /// Read and parse an address file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read contract addresses from {}", path.display())
        })?;
        Self::from_json_str(&json).with_context(|| format!("Invalid file {}", path.display()))
    }
}

/// Network configuration containing the endpoint, chain ID and contract addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Selected environment
    pub environment: Environment,
    /// RPC endpoint URL (`None` until one is configured for dev/test)
    pub rpc_url: Option<String>,
    /// Chain ID used for EIP-155 signing (`None` = ask the node)
    pub chain_id: Option<u64>,
    /// Deployed contract addresses
    pub contracts: ContractAddresses,
}

impl NetworkConfig {
    /// Create configuration for an environment with already known addresses
    pub fn new(environment: Environment, contracts: ContractAddresses) -> Self {
        Self {
            environment,
            rpc_url: environment.default_rpc_url().map(str::to_owned),
            chain_id: environment.default_chain_id(),
            contracts,
        }
    }

    /// Load configuration for an environment from its contract address file
    ///
    /// # Arguments
    ///
    /// * `environment` - Target environment
    /// * `contracts_file` - Address file, `deployments/<env>.json` when `None`
    pub fn load(environment: Environment, contracts_file: Option<&Path>) -> Result<Self> {
        let path = contracts_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| environment.default_contracts_file());
        let contracts = ContractAddresses::load(&path)?;

        Ok(Self::new(environment, contracts))
    }

    /// Override the RPC endpoint URL
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Override the chain ID
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Parsed RPC endpoint; fails when none is configured or it is not a URL
    pub fn endpoint(&self) -> Result<Url> {
        let url = self.rpc_url.as_deref().ok_or_else(|| {
            eyre!(
                "No RPC endpoint configured for environment '{}' (set --rpc-url or RPC_URL)",
                self.environment
            )
        })?;
        url.parse().with_context(|| format!("Invalid RPC URL '{}'", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESSES: &str = r#"{
        "Credit": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "Registry": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        "Market": "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
        "Access": "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"
    }"#;

    fn local_file() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("deployments/local.json")
    }

    #[test]
    fn test_environment_names() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!("sepo".parse::<Environment>().unwrap(), Environment::Sepolia);
        assert_eq!("Sepolia".parse::<Environment>().unwrap(), Environment::Sepolia);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let err = "mainnet".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("Unknown environment 'mainnet'"));
    }

    #[test]
    fn test_addresses_accept_both_key_styles() {
        let upper = ContractAddresses::from_json_str(ADDRESSES).unwrap();
        let lower = ContractAddresses::from_json_str(
            r#"{
                "credit": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
                "registry": "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512",
                "market": "0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0"
            }"#,
        )
        .unwrap();
        assert_eq!(upper, lower);
        assert_eq!(
            upper.market,
            "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        assert!(ContractAddresses::from_json_str("not json").is_err());
        assert!(ContractAddresses::from_json_str(r#"{"registry": "0x01"}"#).is_err());
        assert!(ContractAddresses::from_json_str(
            r#"{"registry": "0xzz", "market": "0x00", "credit": "0x00"}"#
        )
        .is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = NetworkConfig::load(Environment::Local, Some(Path::new("/nonexistent/x.json")))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read contract addresses"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let path = local_file();
        let first = NetworkConfig::load(Environment::Local, Some(&path)).unwrap();
        let second = NetworkConfig::load(Environment::Local, Some(&path)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.rpc_url.as_deref(), Some(LOCAL_RPC_URL));
    }

    #[test]
    fn test_endpoint_required_for_dev() {
        let contracts = ContractAddresses::from_json_str(ADDRESSES).unwrap();
        let config = NetworkConfig::new(Environment::Dev, contracts);
        assert!(config.endpoint().is_err());

        let config = config.with_rpc_url("http://10.0.0.5:8545").with_chain_id(31337);
        assert_eq!(config.endpoint().unwrap().as_str(), "http://10.0.0.5:8545/");
        assert_eq!(config.chain_id, Some(31337));
    }

    #[test]
    fn test_sepolia_defaults() {
        let contracts = ContractAddresses::from_json_str(ADDRESSES).unwrap();
        let config = NetworkConfig::new(Environment::Sepolia, contracts);
        assert_eq!(config.chain_id, Some(SEPOLIA_CHAIN_ID));
        assert_eq!(config.rpc_url.as_deref(), Some(SEPOLIA_RPC_URL));
        assert_eq!(
            Environment::Sepolia.default_contracts_file(),
            Path::new("deployments/sepo.json")
        );
    }
}
