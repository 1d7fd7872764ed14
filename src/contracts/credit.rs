//! Credit token contract (ERC20 allowance)

use super::{encode_call, uint256};
use crate::constants::SAMPLE_APPROVE_AMOUNT;
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, U256};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// `approve(address,uint256)`
pub const APPROVE: &str = "approve";

/// Parameters for an allowance grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveParams {
    /// Spender; the market contract when omitted
    #[serde(default)]
    pub spender: Option<Address>,
    /// Allowance in credit base units
    pub amount: U256,
}

impl ApproveParams {
    /// Approve `amount` to the market contract
    pub fn to_market(amount: U256) -> Self {
        Self {
            spender: None,
            amount,
        }
    }

    /// Demonstration allowance to the market contract
    pub fn sample() -> Self {
        Self::to_market(U256::from(SAMPLE_APPROVE_AMOUNT))
    }
}

/// Call data for `credit.approve(spender, amount)`
pub fn approve_data(abi: &JsonAbi, spender: Address, amount: U256) -> Result<Bytes> {
    encode_call(
        abi,
        APPROVE,
        &[DynSolValue::Address(spender), uint256(amount)],
    )
}
