//! Market contract: order creation and user confirmation/cancellation

use super::registry::{PricePerHour, Resources};
use super::{encode_call, uint256, uint8};
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, U256};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// `createOrder(address,Order)`
pub const CREATE_ORDER: &str = "createOrder";
/// `userConfirm(address)`
pub const USER_CONFIRM: &str = "userConfirm";
/// `userCancel(address)`
pub const USER_CANCEL: &str = "userCancel";

/// Status of an order that has not been activated yet
pub const STATUS_UNACTIVE: u8 = 1;

/// Market order record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub user: Address,
    pub provider: Address,
    /// Provider node the order runs on
    pub node_id: U256,
    /// Agreed hourly prices
    pub p: PricePerHour,
    /// Ordered resources
    pub r: Resources,
    /// Credit deposited for the order
    pub total_value: U256,
    pub remain: U256,
    pub remuneration: U256,
    #[serde(default)]
    pub user_confirm: bool,
    #[serde(default)]
    pub provider_confirm: bool,
    #[serde(default)]
    pub activate_time: U256,
    #[serde(default)]
    pub last_settle_time: U256,
    pub probation: U256,
    pub duration: U256,
    pub status: u8,
}

impl Order {
    /// Demonstration order from `user` to `provider`
    pub fn sample(user: Address, provider: Address) -> Self {
        let total_value = U256::from(262_695_400u64);

        Self {
            user,
            provider,
            node_id: U256::from(1u64),
            p: PricePerHour::new(100, 1000, 10, 1),
            r: Resources::new(1, 2, 3, 4),
            total_value,
            remain: total_value,
            remuneration: U256::ZERO,
            user_confirm: false,
            provider_confirm: false,
            activate_time: U256::ZERO,
            last_settle_time: U256::ZERO,
            probation: U256::from(5u64),
            duration: U256::from(123_100u64),
            status: STATUS_UNACTIVE,
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(self.user),
            DynSolValue::Address(self.provider),
            uint256(self.node_id),
            self.p.to_sol_value(),
            self.r.to_sol_value(),
            uint256(self.total_value),
            uint256(self.remain),
            uint256(self.remuneration),
            DynSolValue::Bool(self.user_confirm),
            DynSolValue::Bool(self.provider_confirm),
            uint256(self.activate_time),
            uint256(self.last_settle_time),
            uint256(self.probation),
            uint256(self.duration),
            uint8(self.status),
        ])
    }
}

/// Call data for `market.createOrder(provider, order)`
pub fn create_order_data(abi: &JsonAbi, provider: Address, order: &Order) -> Result<Bytes> {
    encode_call(
        abi,
        CREATE_ORDER,
        &[DynSolValue::Address(provider), order.to_sol_value()],
    )
}

/// Call data for `market.userConfirm(provider)`
pub fn user_confirm_data(abi: &JsonAbi, provider: Address) -> Result<Bytes> {
    encode_call(abi, USER_CONFIRM, &[DynSolValue::Address(provider)])
}

/// Call data for `market.userCancel(provider)`
pub fn user_cancel_data(abi: &JsonAbi, provider: Address) -> Result<Bytes> {
    encode_call(abi, USER_CANCEL, &[DynSolValue::Address(provider)])
}
