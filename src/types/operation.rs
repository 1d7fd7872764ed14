//! Supported operations and their argument records

use crate::abi::ContractAbis;
use crate::config::ContractAddresses;
use crate::contracts::{
    ApproveParams, Node, Order, ProviderInfo, ADD_NODE, APPROVE, CREATE_ORDER, REGISTER, REVISE,
    USER_CANCEL, USER_CONFIRM,
};
use crate::signer::Role;
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use eyre::{bail, Context, Report, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Contract an operation is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    Registry,
    Market,
    Credit,
}

impl Contract {
    /// Deployed address of this contract
    pub fn address(&self, contracts: &ContractAddresses) -> Address {
        match self {
            Self::Registry => contracts.registry,
            Self::Market => contracts.market,
            Self::Credit => contracts.credit,
        }
    }

    /// Interface of this contract
    pub fn abi<'a>(&self, abis: &'a ContractAbis) -> &'a JsonAbi {
        match self {
            Self::Registry => &abis.registry,
            Self::Market => &abis.market,
            Self::Credit => &abis.credit,
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registry => "registry",
            Self::Market => "market",
            Self::Credit => "credit",
        })
    }
}

/// Transaction type, identified on the command line by its code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    /// Register a provider in the registry
    Register = 1,
    /// Approve credit spending by the market
    Approve = 2,
    /// Create a market order
    CreateOrder = 3,
    /// Revise the provider's registration
    Revise = 4,
    /// User confirms an order
    UserConfirm = 5,
    /// User cancels an order
    UserCancel = 6,
    /// Add a compute node to the provider
    AddNode = 7,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Self::Register,
        Self::Approve,
        Self::CreateOrder,
        Self::Revise,
        Self::UserConfirm,
        Self::UserCancel,
        Self::AddNode,
    ];

    /// Numeric code
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match Self::ALL.iter().find(|op| op.code() == code) {
            Some(op) => Ok(*op),
            None => bail!("Unknown operation code {} (expected 1-7)", code),
        }
    }

    /// Contract method called
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Register => REGISTER,
            Self::Approve => APPROVE,
            Self::CreateOrder => CREATE_ORDER,
            Self::Revise => REVISE,
            Self::UserConfirm => USER_CONFIRM,
            Self::UserCancel => USER_CANCEL,
            Self::AddNode => ADD_NODE,
        }
    }

    /// Contract the transaction is addressed to
    pub fn contract(self) -> Contract {
        match self {
            Self::Register | Self::Revise | Self::AddNode => Contract::Registry,
            Self::CreateOrder | Self::UserConfirm | Self::UserCancel => Contract::Market,
            Self::Approve => Contract::Credit,
        }
    }

    /// Role whose key signs the transaction
    pub fn role(self) -> Role {
        match self {
            Self::Register | Self::Revise | Self::AddNode => Role::Provider,
            Self::Approve | Self::CreateOrder | Self::UserConfirm | Self::UserCancel => Role::User,
        }
    }
}

impl From<Operation> for u8 {
    fn from(operation: Operation) -> u8 {
        operation as u8
    }
}

impl FromStr for Operation {
    type Err = Report;

    /// Accepts the numeric code or the method name (`createOrder`, `create-order`, ...)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }

        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "register" | "registercp" => Ok(Self::Register),
            "approve" => Ok(Self::Approve),
            "createorder" => Ok(Self::CreateOrder),
            "revise" => Ok(Self::Revise),
            "userconfirm" => Ok(Self::UserConfirm),
            "usercancel" => Ok(Self::UserCancel),
            "addnode" => Ok(Self::AddNode),
            _ => bail!("Unknown operation '{}'", s),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Provider an order operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderRef {
    /// Provider address; the provider role's address when omitted
    #[serde(default)]
    pub provider: Option<Address>,
}

/// Arguments of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationParams {
    Register(ProviderInfo),
    Approve(ApproveParams),
    CreateOrder(Order),
    Revise(ProviderInfo),
    UserConfirm(ProviderRef),
    UserCancel(ProviderRef),
    AddNode(Node),
}

impl OperationParams {
    /// Operation these arguments belong to
    pub fn operation(&self) -> Operation {
        match self {
            Self::Register(_) => Operation::Register,
            Self::Approve(_) => Operation::Approve,
            Self::CreateOrder(_) => Operation::CreateOrder,
            Self::Revise(_) => Operation::Revise,
            Self::UserConfirm(_) => Operation::UserConfirm,
            Self::UserCancel(_) => Operation::UserCancel,
            Self::AddNode(_) => Operation::AddNode,
        }
    }

    /// Parse the JSON argument record for `operation`
    pub fn from_json(operation: Operation, json: &str) -> Result<Self> {
        let params = match operation {
            Operation::Register => Self::Register(serde_json::from_str(json)?),
            Operation::Approve => Self::Approve(serde_json::from_str(json)?),
            Operation::CreateOrder => Self::CreateOrder(serde_json::from_str(json)?),
            Operation::Revise => Self::Revise(serde_json::from_str(json)?),
            Operation::UserConfirm => Self::UserConfirm(serde_json::from_str(json)?),
            Operation::UserCancel => Self::UserCancel(serde_json::from_str(json)?),
            Operation::AddNode => Self::AddNode(serde_json::from_str(json)?),
        };

        Ok(params)
    }

    /// Read the JSON argument record for `operation` from a file
    pub fn load(operation: Operation, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameters from {}", path.display()))?;

        Self::from_json(operation, &json).with_context(|| {
            format!(
                "Invalid {} parameters in {}",
                operation.method_name(),
                path.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_code(op.code()).unwrap(), op);
            assert_eq!(op.code().to_string().parse::<Operation>().unwrap(), op);
            assert_eq!(op.method_name().parse::<Operation>().unwrap(), op);
        }
        assert!(Operation::from_code(0).is_err());
        assert!(Operation::from_code(8).is_err());
    }

    #[test]
    fn test_name_variants() {
        assert_eq!("create-order".parse::<Operation>().unwrap(), Operation::CreateOrder);
        assert_eq!("add_node".parse::<Operation>().unwrap(), Operation::AddNode);
        assert_eq!("USERCANCEL".parse::<Operation>().unwrap(), Operation::UserCancel);
        assert!("transfer".parse::<Operation>().is_err());
    }

    #[test]
    fn test_roles_and_contracts() {
        assert_eq!(Operation::Register.role(), Role::Provider);
        assert_eq!(Operation::Revise.role(), Role::Provider);
        assert_eq!(Operation::AddNode.role(), Role::Provider);
        assert_eq!(Operation::Approve.role(), Role::User);
        assert_eq!(Operation::CreateOrder.role(), Role::User);

        assert_eq!(Operation::Approve.contract(), Contract::Credit);
        assert_eq!(Operation::UserConfirm.contract(), Contract::Market);
        assert_eq!(Operation::AddNode.contract(), Contract::Registry);
    }

    #[test]
    fn test_params_from_json() {
        let params = OperationParams::from_json(Operation::UserCancel, "{}").unwrap();
        assert_eq!(params, OperationParams::UserCancel(ProviderRef::default()));
        assert_eq!(params.operation(), Operation::UserCancel);

        let params = OperationParams::from_json(
            Operation::UserConfirm,
            r#"{"provider": "0xC4EAc9E1012DFCB4833165F5d35E027EBfE1f640"}"#,
        )
        .unwrap();
        let OperationParams::UserConfirm(provider) = params else {
            panic!("unexpected params {params:?}");
        };
        assert!(provider.provider.is_some());

        // register requires the full provider record
        assert!(OperationParams::from_json(Operation::Register, r#"{"name": "cp1"}"#).is_err());
    }

    #[test]
    fn test_shipped_params_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("params");
        let files = [
            (Operation::Register, "register.json"),
            (Operation::Approve, "approve.json"),
            (Operation::CreateOrder, "create_order.json"),
            (Operation::Revise, "revise.json"),
            (Operation::UserConfirm, "user_confirm.json"),
            (Operation::UserCancel, "user_cancel.json"),
            (Operation::AddNode, "add_node.json"),
        ];

        for (op, file) in files {
            let params = OperationParams::load(op, dir.join(file)).unwrap();
            assert_eq!(params.operation(), op);
        }

        let node = OperationParams::load(Operation::AddNode, dir.join("add_node.json")).unwrap();
        assert_eq!(node, OperationParams::AddNode(Node::sample()));
    }

    #[test]
    fn test_params_missing_file() {
        let err = OperationParams::load(Operation::AddNode, "/nonexistent/node.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read parameters"));
    }
}
