//! Results of running an operation

use super::Operation;
use crate::signer::SignedTransaction;
use alloy::primitives::TxHash;
use std::fmt;

/// What happened to a signed transaction after signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Broadcasting was not requested
    NotSent,
    /// Mined and succeeded
    Confirmed {
        tx_hash: TxHash,
        block_number: Option<u64>,
        gas_used: u64,
    },
    /// Accepted by the node but not mined before the confirmation timeout
    Unconfirmed { tx_hash: TxHash },
    /// Rejected on submission, reverted, or the node stopped answering
    Failed {
        tx_hash: Option<TxHash>,
        reason: String,
    },
}

impl SendOutcome {
    /// `true` for `Unconfirmed` and `Failed`
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Unconfirmed { .. } | Self::Failed { .. })
    }

    /// Hash of the submitted transaction, if it reached the node
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::NotSent => None,
            Self::Confirmed { tx_hash, .. } | Self::Unconfirmed { tx_hash } => Some(*tx_hash),
            Self::Failed { tx_hash, .. } => *tx_hash,
        }
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSent => write!(f, "not sent"),
            Self::Confirmed {
                tx_hash,
                block_number,
                gas_used,
            } => {
                write!(f, "tx ok: {} (gas used {}", tx_hash, gas_used)?;
                if let Some(block) = block_number {
                    write!(f, ", block {}", block)?;
                }
                write!(f, ")")
            }
            Self::Unconfirmed { tx_hash } => write!(f, "tx {} not confirmed before timeout", tx_hash),
            Self::Failed {
                tx_hash: Some(tx_hash),
                reason,
            } => write!(f, "tx {} failed: {}", tx_hash, reason),
            Self::Failed {
                tx_hash: None,
                reason,
            } => write!(f, "send tx failed: {}", reason),
        }
    }
}

/// A signed operation and, when broadcast, its outcome
#[derive(Debug, Clone)]
pub struct Execution {
    pub operation: Operation,
    pub signed: SignedTransaction,
    pub outcome: SendOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn test_failure_classification() {
        let hash = B256::repeat_byte(0xab);
        assert!(!SendOutcome::NotSent.is_failure());
        assert!(!SendOutcome::Confirmed {
            tx_hash: hash,
            block_number: Some(1),
            gas_used: 21_000
        }
        .is_failure());
        assert!(SendOutcome::Unconfirmed { tx_hash: hash }.is_failure());
        assert!(SendOutcome::Failed {
            tx_hash: None,
            reason: "nonce too low".into()
        }
        .is_failure());
    }

    #[test]
    fn test_display() {
        let hash = B256::repeat_byte(0x01);
        let failed = SendOutcome::Failed {
            tx_hash: None,
            reason: "nonce too low".into(),
        };
        assert_eq!(failed.to_string(), "send tx failed: nonce too low");
        assert_eq!(failed.tx_hash(), None);

        let confirmed = SendOutcome::Confirmed {
            tx_hash: hash,
            block_number: Some(12),
            gas_used: 50_000,
        };
        assert!(confirmed.to_string().starts_with("tx ok: 0x0101"));
        assert!(confirmed.to_string().ends_with("(gas used 50000, block 12)"));
        assert_eq!(confirmed.tx_hash(), Some(hash));
    }
}
