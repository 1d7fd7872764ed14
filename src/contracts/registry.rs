//! Registry contract: provider registration and compute nodes

use super::{encode_call, uint256, uint64};
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, U256};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// `register(Info)`
pub const REGISTER: &str = "register";
/// `revise(Info)`
pub const REVISE: &str = "revise";
/// `add_node(Node)`
pub const ADD_NODE: &str = "add_node";

/// Resource counts (cpu, gpu, memory, disk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: u64,
    pub gpu: u64,
    pub mem: u64,
    pub disk: u64,
}

impl Resources {
    pub fn new(cpu: u64, gpu: u64, mem: u64, disk: u64) -> Self {
        Self { cpu, gpu, mem, disk }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            uint64(self.cpu),
            uint64(self.gpu),
            uint64(self.mem),
            uint64(self.disk),
        ])
    }
}

/// Hourly price per resource unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricePerHour {
    pub cpu: u64,
    pub gpu: u64,
    pub mem: u64,
    pub disk: u64,
}

impl PricePerHour {
    pub fn new(cpu: u64, gpu: u64, mem: u64, disk: u64) -> Self {
        Self { cpu, gpu, mem, disk }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            uint64(self.cpu),
            uint64(self.gpu),
            uint64(self.mem),
            uint64(self.disk),
        ])
    }
}

/// Provider record passed to `register` and `revise`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider account
    pub addr: Address,
    pub name: String,
    pub ip: String,
    pub domain: String,
    pub port: String,
    /// Total resources offered
    pub total: Resources,
    /// Hourly prices
    pub price: PricePerHour,
}

impl ProviderInfo {
    /// Demonstration registration for `addr`
    pub fn sample(addr: Address) -> Self {
        Self {
            addr,
            name: "cp1".into(),
            ip: "123.123.123.0".into(),
            domain: "testdomain".into(),
            port: "123".into(),
            total: Resources::new(11, 22, 33, 44),
            price: PricePerHour::new(10, 20, 10, 1),
        }
    }

    /// Demonstration revision for `addr`
    pub fn sample_revision(addr: Address) -> Self {
        Self {
            addr,
            name: "revised name".into(),
            ip: "revised ip".into(),
            domain: "revised domain".into(),
            port: "revised port".into(),
            total: Resources::new(22, 33, 44, 55),
            price: PricePerHour::new(33, 33, 33, 33),
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(self.addr),
            DynSolValue::String(self.name.clone()),
            DynSolValue::String(self.ip.clone()),
            DynSolValue::String(self.domain.clone()),
            DynSolValue::String(self.port.clone()),
            self.total.to_sol_value(),
            self.price.to_sol_value(),
        ])
    }
}

/// Priced processor (cpu or gpu) of a node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Processor {
    pub price: U256,
    pub model: String,
}

/// Counted, priced storage (memory or disk) of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Storage {
    pub num: U256,
    pub price: U256,
}

/// Compute node record passed to `add_node`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Node ID (0 lets the registry assign one)
    pub id: U256,
    pub cpu: Processor,
    pub gpu: Processor,
    pub mem: Storage,
    pub disk: Storage,
}

impl Node {
    /// Demonstration node
    pub fn sample() -> Self {
        Self {
            id: U256::ZERO,
            cpu: Processor {
                price: U256::from(10u64),
                model: "i5".into(),
            },
            gpu: Processor {
                price: U256::from(100u64),
                model: "RTX4080".into(),
            },
            mem: Storage {
                num: U256::from(1u64),
                price: U256::from(10u64),
            },
            disk: Storage {
                num: U256::from(1u64),
                price: U256::from(10u64),
            },
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        let processor = |p: &Processor| {
            DynSolValue::Tuple(vec![uint256(p.price), DynSolValue::String(p.model.clone())])
        };
        let storage = |s: &Storage| DynSolValue::Tuple(vec![uint256(s.num), uint256(s.price)]);

        DynSolValue::Tuple(vec![
            uint256(self.id),
            processor(&self.cpu),
            processor(&self.gpu),
            storage(&self.mem),
            storage(&self.disk),
        ])
    }
}

/// Call data for `registry.register(info)`
pub fn register_data(abi: &JsonAbi, info: &ProviderInfo) -> Result<Bytes> {
    encode_call(abi, REGISTER, &[info.to_sol_value()])
}

/// Call data for `registry.revise(info)`
pub fn revise_data(abi: &JsonAbi, info: &ProviderInfo) -> Result<Bytes> {
    encode_call(abi, REVISE, &[info.to_sol_value()])
}

/// Call data for `registry.add_node(node)`
pub fn add_node_data(abi: &JsonAbi, node: &Node) -> Result<Bytes> {
    encode_call(abi, ADD_NODE, &[node.to_sol_value()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::method;
    use crate::contracts::decode_call;
    use crate::contracts::tests::abis;
    use alloy::primitives::{address, keccak256};

    const CP: Address = address!("Ef95c72C836605203F7f66788E450Af2a4141957");

    #[test]
    fn test_register_selector_and_roundtrip() {
        let abis = abis();
        let info = ProviderInfo::sample(CP);
        let data = register_data(&abis.registry, &info).unwrap();

        let signature = "register((address,string,string,string,string,(uint64,uint64,uint64,uint64),(uint64,uint64,uint64,uint64)))";
        assert_eq!(method(&abis.registry, REGISTER).unwrap().signature(), signature);
        assert_eq!(data[..4], keccak256(signature)[..4]);

        let decoded = decode_call(&abis.registry, REGISTER, &data).unwrap();
        assert_eq!(decoded, vec![info.to_sol_value()]);
    }

    #[test]
    fn test_revise_differs_from_register() {
        let abis = abis();
        let register = register_data(&abis.registry, &ProviderInfo::sample(CP)).unwrap();
        let revise = revise_data(&abis.registry, &ProviderInfo::sample_revision(CP)).unwrap();
        assert_ne!(register[..4], revise[..4]);

        let decoded = decode_call(&abis.registry, REVISE, &revise).unwrap();
        assert_eq!(decoded, vec![ProviderInfo::sample_revision(CP).to_sol_value()]);
    }

    #[test]
    fn test_add_node_roundtrip() {
        let abis = abis();
        let node = Node::sample();
        let data = add_node_data(&abis.registry, &node).unwrap();

        assert_eq!(method(&abis.registry, ADD_NODE).unwrap().selector()[..], data[..4]);
        let decoded = decode_call(&abis.registry, ADD_NODE, &data).unwrap();
        assert_eq!(decoded, vec![node.to_sol_value()]);
    }

    #[test]
    fn test_builders_are_deterministic() {
        let abis = abis();
        let info = ProviderInfo::sample(CP);
        assert_eq!(
            register_data(&abis.registry, &info).unwrap(),
            register_data(&abis.registry, &info).unwrap()
        );
    }

    #[test]
    fn test_provider_info_from_json() {
        let info: ProviderInfo = serde_json::from_str(
            r#"{
                "addr": "0xEf95c72C836605203F7f66788E450Af2a4141957",
                "name": "cp1",
                "ip": "123.123.123.0",
                "domain": "testdomain",
                "port": "123",
                "total": {"cpu": 11, "gpu": 22, "mem": 33, "disk": 44},
                "price": {"cpu": 10, "gpu": 20, "mem": 10, "disk": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(info, ProviderInfo::sample(CP));
    }
}
