//! Transaction signing for grid-sendtx
//!
//! A [`LocalSigner`] turns a [`TxRequest`] into a [`SignedTransaction`]: it
//! asks the chain for the sender's pending nonce and the current gas price,
//! builds an EIP-155 legacy transaction and signs it locally. The result is
//! self-contained and can be printed or broadcast independently.

mod local;
mod roles;

pub use local::LocalSigner;
pub use roles::{Role, RoleKeys};

#[cfg(test)]
pub(crate) use local::tests as test_keys;

use crate::constants::DEFAULT_GAS_LIMIT;
use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, Signature, TxHash, B256, U256};
use eyre::{Context, Result};

/// Transaction request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    /// Target contract address
    pub to: Address,
    /// Transaction value in wei
    pub value: U256,
    /// Encoded calldata
    pub data: Bytes,
    /// Gas limit
    pub gas_limit: u64,
}

impl TxRequest {
    /// Create a zero-value call with the default gas limit
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Set gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }
}

/// A signed legacy transaction together with its sender
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    signed: Signed<TxLegacy>,
    from: Address,
}

impl SignedTransaction {
    pub(crate) fn new(signed: Signed<TxLegacy>, from: Address) -> Self {
        Self { signed, from }
    }

    /// Transaction hash
    pub fn hash(&self) -> TxHash {
        *self.signed.hash()
    }

    /// Sender address (derived from the signing key)
    pub fn from(&self) -> Address {
        self.from
    }

    /// Destination address
    pub fn to(&self) -> Option<Address> {
        self.signed.tx().to.to().copied()
    }

    /// Unsigned transaction fields
    pub fn tx(&self) -> &TxLegacy {
        self.signed.tx()
    }

    /// Call data
    pub fn input(&self) -> &Bytes {
        &self.signed.tx().input
    }

    pub fn signature(&self) -> &Signature {
        self.signed.signature()
    }

    /// Raw EIP-2718 encoding, as submitted with `eth_sendRawTransaction`
    pub fn encoded(&self) -> Bytes {
        TxEnvelope::Legacy(self.signed.clone()).encoded_2718().into()
    }

    /// Recover the signer from the signature
    pub fn recover_signer(&self) -> Result<Address> {
        let prehash: B256 = self.signed.tx().signature_hash();
        self.signed
            .signature()
            .recover_address_from_prehash(&prehash)
            .context("Failed to recover signer")
    }

    /// Pretty JSON rendering of the signed transaction
    ///
    /// The RPC transaction object (`type`, `chainId`, `nonce`, `gasPrice`,
    /// `gas`, `to`, `value`, `input`, `v`, `r`, `s`, `hash`) plus the sender
    /// and the raw encoding.
    pub fn to_json(&self) -> Result<String> {
        let mut view = serde_json::to_value(TxEnvelope::Legacy(self.signed.clone()))
            .context("Failed to serialize signed transaction")?;
        if let Some(fields) = view.as_object_mut() {
            fields.insert("from".into(), serde_json::to_value(self.from)?);
            fields.insert("raw".into(), serde_json::to_value(self.encoded())?);
        }

        serde_json::to_string_pretty(&view).context("Failed to serialize signed transaction")
    }
}
