//! grid-sendtx
//!
//! Build, sign and optionally send the transactions of the compute grid's
//! registry, market and credit contracts.
//!
//! # Features
//!
//! - Register, revise and add nodes as a provider
//! - Approve credit and create, confirm or cancel orders as a user
//! - Deterministic EIP-155 legacy signing with role keys
//! - Broadcast with receipt polling and an explicit timeout
//!
//! # Example
//!
//! ```rust,ignore
//! use grid_sendtx::{
//!     ContractAbis, Environment, NetworkConfig, Operation, RoleKeys, RpcClient, TxClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = NetworkConfig::load(Environment::Local, None)?;
//!     let abis = ContractAbis::load("abi")?;
//!     let keys = RoleKeys::from_hex(None, None, Some("0x..."))?;
//!     let client = TxClient::new(RpcClient::new(config.endpoint()?), config, abis, keys);
//!
//!     // Sign the demonstration registration and send it
//!     let params = client.sample_params(Operation::Register)?;
//!     let execution = client.execute(&params, true).await?;
//!     println!("{}", execution.signed.to_json()?);
//!
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod broadcast;
pub mod chain;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod signer;
pub mod types;

// Re-export main types for convenience
pub use abi::ContractAbis;
pub use broadcast::PollConfig;
pub use chain::{ChainClient, Inclusion, RpcClient};
pub use client::TxClient;
pub use config::{ContractAddresses, Environment, NetworkConfig};
pub use contracts::{ApproveParams, Node, Order, ProviderInfo};
pub use error::{eyre, Context, Report, Result};
pub use signer::{LocalSigner, Role, RoleKeys, SignedTransaction, TxRequest};
pub use types::{Contract, Execution, Operation, OperationParams, ProviderRef, SendOutcome};
