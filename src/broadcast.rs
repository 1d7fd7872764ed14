//! Broadcasting signed transactions
//!
//! Submit once, then poll the receipt until the transaction succeeds,
//! reverts, or the confirmation timeout passes. There is no retry,
//! resubmission or fee bumping.

use crate::chain::ChainClient;
use crate::constants::{DEFAULT_CONFIRM_TIMEOUT, DEFAULT_POLL_INTERVAL};
use crate::signer::SignedTransaction;
use crate::types::SendOutcome;
use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

/// Receipt polling schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between receipt queries
    pub interval: Duration,
    /// Stop waiting after this long
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Submit `signed` and wait for it to be mined
///
/// The submission and the receipt polling are each bounded by `poll.timeout`.
pub async fn send<C: ChainClient>(
    chain: &C,
    signed: &SignedTransaction,
    poll: PollConfig,
) -> SendOutcome {
    info!(tx_hash = %signed.hash(), from = %signed.from(), "sending signed tx");

    let submitted = timeout(poll.timeout, chain.send_raw_transaction(&signed.encoded())).await;
    let tx_hash = match submitted {
        Ok(Ok(tx_hash)) => tx_hash,
        Ok(Err(e)) => {
            warn!(tx_hash = %signed.hash(), error = %format!("{e:#}"), "send tx failed");
            return SendOutcome::Failed {
                tx_hash: None,
                reason: format!("{e:#}"),
            };
        }
        Err(_) => {
            warn!(tx_hash = %signed.hash(), timeout = ?poll.timeout, "send tx timed out");
            return SendOutcome::Failed {
                tx_hash: None,
                reason: format!("node did not accept the tx within {:?}", poll.timeout),
            };
        }
    };

    if tx_hash != signed.hash() {
        warn!(expected = %signed.hash(), reported = %tx_hash, "node reported a different tx hash");
    }

    info!(%tx_hash, "waiting for tx to be mined");
    wait_for_inclusion(chain, tx_hash, poll).await
}

/// Poll the receipt of `tx_hash` until it is mined or `poll.timeout` passes
///
/// The deadline covers the receipt queries themselves, not just the sleeps
/// between them.
pub async fn wait_for_inclusion<C: ChainClient>(
    chain: &C,
    tx_hash: TxHash,
    poll: PollConfig,
) -> SendOutcome {
    match timeout(poll.timeout, poll_receipt(chain, tx_hash, poll.interval)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(%tx_hash, timeout = ?poll.timeout, "tx not mined before timeout");
            SendOutcome::Unconfirmed { tx_hash }
        }
    }
}

async fn poll_receipt<C: ChainClient>(
    chain: &C,
    tx_hash: TxHash,
    interval: Duration,
) -> SendOutcome {
    loop {
        match chain.inclusion(tx_hash).await {
            Ok(Some(inclusion)) if inclusion.success => {
                info!(%tx_hash, block = ?inclusion.block_number, gas_used = inclusion.gas_used, "tx ok");
                return SendOutcome::Confirmed {
                    tx_hash,
                    block_number: inclusion.block_number,
                    gas_used: inclusion.gas_used,
                };
            }
            Ok(Some(inclusion)) => {
                warn!(%tx_hash, block = ?inclusion.block_number, "tx reverted");
                return SendOutcome::Failed {
                    tx_hash: Some(tx_hash),
                    reason: "reverted on-chain".into(),
                };
            }
            Ok(None) => {}
            Err(e) => {
                warn!(%tx_hash, error = %format!("{e:#}"), "receipt query failed");
                return SendOutcome::Failed {
                    tx_hash: Some(tx_hash),
                    reason: format!("{e:#}"),
                };
            }
        }

        sleep(interval).await;
    }
}
