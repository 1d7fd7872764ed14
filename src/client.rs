//! TxClient - main entry point for building, signing and sending operations

use crate::abi::ContractAbis;
use crate::broadcast::{self, PollConfig};
use crate::chain::ChainClient;
use crate::config::NetworkConfig;
use crate::constants::DEFAULT_GAS_LIMIT;
use crate::contracts::{
    add_node_data, approve_data, create_order_data, register_data, revise_data, user_cancel_data,
    user_confirm_data, ApproveParams, Node, Order, ProviderInfo,
};
use crate::signer::{Role, RoleKeys, SignedTransaction, TxRequest};
use crate::types::{Execution, Operation, OperationParams, ProviderRef, SendOutcome};
use alloy::primitives::{Address, Bytes};
use eyre::{Context, Result};
use tracing::info;

/// Client that turns operations into signed transactions for one environment
pub struct TxClient<C: ChainClient> {
    chain: C,
    config: NetworkConfig,
    abis: ContractAbis,
    keys: RoleKeys,
    gas_limit: u64,
    poll: PollConfig,
}

impl<C: ChainClient> TxClient<C> {
    /// Create a new TxClient
    pub fn new(chain: C, config: NetworkConfig, abis: ContractAbis, keys: RoleKeys) -> Self {
        Self {
            chain,
            config,
            abis,
            keys,
            gas_limit: DEFAULT_GAS_LIMIT,
            poll: PollConfig::default(),
        }
    }

    /// Override the gas limit used for every call
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Override the receipt polling schedule
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Get the network configuration
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn abis(&self) -> &ContractAbis {
        &self.abis
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Address of the `role` account
    pub fn address(&self, role: Role) -> Result<Address> {
        self.keys.address(role)
    }

    /// Demonstration arguments for `operation`
    ///
    /// Register, revise and add-node describe the provider account; orders are
    /// placed by the user account with the provider account.
    pub fn sample_params(&self, operation: Operation) -> Result<OperationParams> {
        let params = match operation {
            Operation::Register => {
                OperationParams::Register(ProviderInfo::sample(self.address(Role::Provider)?))
            }
            Operation::Approve => OperationParams::Approve(ApproveParams::sample()),
            Operation::CreateOrder => OperationParams::CreateOrder(Order::sample(
                self.address(Role::User)?,
                self.address(Role::Provider)?,
            )),
            Operation::Revise => OperationParams::Revise(ProviderInfo::sample_revision(
                self.address(Role::Provider)?,
            )),
            Operation::UserConfirm => OperationParams::UserConfirm(ProviderRef::default()),
            Operation::UserCancel => OperationParams::UserCancel(ProviderRef::default()),
            Operation::AddNode => OperationParams::AddNode(Node::sample()),
        };

        Ok(params)
    }

    /// Contract address `operation` is sent to
    pub fn destination(&self, operation: Operation) -> Address {
        operation.contract().address(&self.config.contracts)
    }

    /// Encode the call data for `params`
    ///
    /// Pure apart from key lookup: an omitted spender is the market contract,
    /// an omitted provider is the provider account.
    pub fn build_payload(&self, params: &OperationParams) -> Result<Bytes> {
        let abi = params.operation().contract().abi(&self.abis);
        let data = match params {
            OperationParams::Register(info) => register_data(abi, info),
            OperationParams::Revise(info) => revise_data(abi, info),
            OperationParams::AddNode(node) => add_node_data(abi, node),
            OperationParams::Approve(approve) => approve_data(
                abi,
                approve.spender.unwrap_or(self.config.contracts.market),
                approve.amount,
            ),
            OperationParams::CreateOrder(order) => create_order_data(abi, order.provider, order),
            OperationParams::UserConfirm(provider) => {
                user_confirm_data(abi, self.resolve_provider(provider)?)
            }
            OperationParams::UserCancel(provider) => {
                user_cancel_data(abi, self.resolve_provider(provider)?)
            }
        };

        data.with_context(|| format!("Failed to build {} call data", params.operation()))
    }

    /// Chain ID used for signing: configured value, otherwise asked from the node
    pub async fn chain_id(&self) -> Result<u64> {
        match self.config.chain_id {
            Some(chain_id) => Ok(chain_id),
            None => {
                let chain_id = self.chain.chain_id().await?;
                info!(chain_id, "using chain ID reported by the node");
                Ok(chain_id)
            }
        }
    }

    /// Build and sign the transaction for `params` without sending it
    ///
    /// Key and call data errors are raised before the chain is contacted.
    pub async fn prepare(&self, params: &OperationParams) -> Result<SignedTransaction> {
        let operation = params.operation();
        let signer = self.keys.signer(operation.role())?;
        let data = self.build_payload(params)?;
        let tx = TxRequest::new(self.destination(operation), data).with_gas_limit(self.gas_limit);

        let chain_id = self.chain_id().await?;
        info!(
            %operation,
            role = %operation.role(),
            from = %signer.address(),
            to = %tx.to,
            "signing transaction"
        );

        signer
            .sign(&self.chain, &tx, chain_id)
            .await
            .with_context(|| format!("Failed to sign {} transaction", operation))
    }

    // ========== Registry Operations ==========

    /// Sign `registry.register(info)` with the provider key
    pub async fn register(&self, info: &ProviderInfo) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::Register(info.clone())).await
    }

    /// Sign `registry.revise(info)` with the provider key
    pub async fn revise(&self, info: &ProviderInfo) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::Revise(info.clone())).await
    }

    /// Sign `registry.add_node(node)` with the provider key
    pub async fn add_node(&self, node: &Node) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::AddNode(node.clone())).await
    }

    // ========== Credit Operations ==========

    /// Sign `credit.approve(spender, amount)` with the user key
    pub async fn approve(&self, params: ApproveParams) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::Approve(params)).await
    }

    // ========== Market Operations ==========

    /// Sign `market.createOrder(order.provider, order)` with the user key
    pub async fn create_order(&self, order: &Order) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::CreateOrder(order.clone()))
            .await
    }

    /// Sign `market.userConfirm(provider)` with the user key
    pub async fn user_confirm(&self, provider: ProviderRef) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::UserConfirm(provider)).await
    }

    /// Sign `market.userCancel(provider)` with the user key
    pub async fn user_cancel(&self, provider: ProviderRef) -> Result<SignedTransaction> {
        self.prepare(&OperationParams::UserCancel(provider)).await
    }

    // ========== Utility Methods ==========

    /// Broadcast a signed transaction and wait for it to be mined
    pub async fn send(&self, signed: &SignedTransaction) -> SendOutcome {
        broadcast::send(&self.chain, signed, self.poll).await
    }

    /// Sign `params` and, when `auto_send` is set, broadcast it
    pub async fn execute(&self, params: &OperationParams, auto_send: bool) -> Result<Execution> {
        let operation = params.operation();
        let signed = self.prepare(params).await?;
        info!(%operation, tx_hash = %signed.hash(), "signed transaction");

        let outcome = if auto_send {
            self.send(&signed).await
        } else {
            SendOutcome::NotSent
        };

        Ok(Execution {
            operation,
            signed,
            outcome,
        })
    }

    fn resolve_provider(&self, provider: &ProviderRef) -> Result<Address> {
        match provider.provider {
            Some(address) => Ok(address),
            None => self.address(Role::Provider),
        }
    }
}
