//! Chain access used by the signer and the broadcaster
//!
//! [`ChainClient`] is the only place the tool talks to a node. [`RpcClient`]
//! implements it over JSON-RPC/HTTP; tests substitute an in-memory chain.

use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;

/// Inclusion status of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusion {
    /// `false` when the transaction reverted
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Node queries needed to sign, submit and confirm a transaction
pub trait ChainClient: Send + Sync {
    /// Chain ID reported by the node
    fn chain_id(&self) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Next nonce for `address`, counting pending transactions
    fn pending_nonce(
        &self,
        address: Address,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Current suggested gas price in wei
    fn gas_price(&self) -> impl std::future::Future<Output = Result<u128>> + Send;

    /// Submit a signed, EIP-2718 encoded transaction
    fn send_raw_transaction(
        &self,
        raw: &[u8],
    ) -> impl std::future::Future<Output = Result<TxHash>> + Send;

    /// Inclusion status of `tx_hash`, `None` while it is not mined
    fn inclusion(
        &self,
        tx_hash: TxHash,
    ) -> impl std::future::Future<Output = Result<Option<Inclusion>>> + Send;
}

/// JSON-RPC client over HTTP
#[derive(Clone)]
pub struct RpcClient {
    provider: Arc<RootProvider<Ethereum>>,
}

impl RpcClient {
    /// Create a client for `url`. No request is made until the first call.
    pub fn new(url: Url) -> Self {
        // No fillers: nonce, gas and signing are done explicitly by the signer
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Self {
            provider: Arc::new(provider),
        }
    }
}

impl ChainClient for RpcClient {
    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("Failed to get chain ID")
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .with_context(|| format!("Failed to get pending nonce for {}", address))
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .context("Failed to get gas price")
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .context("Failed to send transaction")?;

        Ok(*pending.tx_hash())
    }

    async fn inclusion(&self, tx_hash: TxHash) -> Result<Option<Inclusion>> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .context("Failed to get transaction receipt")?;

        Ok(receipt.map(|receipt| Inclusion {
            success: receipt.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        }))
    }
}
