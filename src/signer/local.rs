//! Local private key signer implementation

use super::{SignedTransaction, TxRequest};
use crate::chain::ChainClient;
use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, TxKind};
use alloy::signers::local::PrivateKeySigner;
use eyre::{Context, Result};
use std::fmt;
use tracing::debug;

/// Local signer using a private key
#[derive(Clone)]
pub struct LocalSigner {
    signer: PrivateKeySigner,
}

impl LocalSigner {
    /// Create a new LocalSigner from a private key hex string
    ///
    /// # Arguments
    ///
    /// * `private_key` - Hex-encoded private key (with or without 0x prefix)
    pub fn from_private_key(private_key: impl AsRef<str>) -> Result<Self> {
        let key = private_key.as_ref().trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse().context("Failed to parse private key")?;

        Ok(Self { signer })
    }

    /// The signer's EVM address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign `tx` with explicit nonce, gas price and chain ID
    ///
    /// Pure and deterministic (RFC 6979): the same inputs always produce the
    /// same signed transaction.
    pub fn sign_legacy(
        &self,
        tx: &TxRequest,
        nonce: u64,
        gas_price: u128,
        chain_id: u64,
    ) -> Result<SignedTransaction> {
        let mut legacy = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value,
            input: tx.data.clone(),
        };

        let signature = self
            .signer
            .sign_transaction_sync(&mut legacy)
            .context("Failed to sign transaction")?;

        Ok(SignedTransaction::new(
            legacy.into_signed(signature),
            self.address(),
        ))
    }

    /// Fetch the pending nonce and gas price from `chain`, then sign `tx`
    ///
    /// Any error reaching the chain is returned as is; nothing is retried.
    pub async fn sign<C: ChainClient>(
        &self,
        chain: &C,
        tx: &TxRequest,
        chain_id: u64,
    ) -> Result<SignedTransaction> {
        let from = self.address();
        let nonce = chain.pending_nonce(from).await?;
        let gas_price = chain.gas_price().await?;

        debug!(%from, nonce, gas_price, chain_id, to = %tx.to, "signing transaction");
        self.sign_legacy(tx, nonce, gas_price, chain_id)
    }
}

// Never print key material
impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address())
            .finish()
    }
}
