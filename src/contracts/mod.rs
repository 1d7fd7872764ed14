//! Call-data builders for the registry, market and credit contracts
//!
//! Every builder is a pure function: it looks the method up in the loaded ABI,
//! type-checks the argument tuple against the declared inputs and returns
//! `selector ++ abi_encode(args)`. Nothing here touches the chain.

pub mod credit;
pub mod market;
pub mod registry;

pub use credit::*;
pub use market::*;
pub use registry::*;

use crate::abi::method;
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Bytes, U256};
use eyre::{ensure, Context, Result};

/// Encode a call to `method_name` with the given arguments
pub fn encode_call(abi: &JsonAbi, method_name: &str, args: &[DynSolValue]) -> Result<Bytes> {
    let function = method(abi, method_name)?;
    let data = function
        .abi_encode_input(args)
        .with_context(|| format!("Failed to encode arguments for {}", function.signature()))?;

    Ok(Bytes::from(data))
}

/// Decode call data produced by [`encode_call`] back into its argument values
///
/// Fails if the selector does not belong to `method_name`.
pub fn decode_call(abi: &JsonAbi, method_name: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
    let function = method(abi, method_name)?;
    ensure!(
        data.len() >= 4 && data[..4] == function.selector()[..],
        "Call data does not start with the {} selector",
        function.signature()
    );

    function
        .abi_decode_input(&data[4..])
        .with_context(|| format!("Failed to decode arguments for {}", function.signature()))
}

pub(crate) fn uint64(value: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 64)
}

pub(crate) fn uint256(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

pub(crate) fn uint8(value: u8) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 8)
}
