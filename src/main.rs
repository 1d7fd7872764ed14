//! grid-sendtx command line
//!
//! Signs one registry/market/credit operation, prints the signed transaction
//! as JSON and, with `--auto`, sends it and waits for the receipt.

use clap::Parser;
use eyre::{bail, Report, Result};
use grid_sendtx::constants::{DEFAULT_ABI_DIR, DEFAULT_GAS_LIMIT};
use grid_sendtx::{
    ContractAbis, Environment, NetworkConfig, Operation, OperationParams, PollConfig, RoleKeys,
    RpcClient, TxClient,
};
use alloy::transports::http::reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Grid transaction sender
#[derive(Parser)]
#[command(name = "grid-sendtx")]
#[command(about = "Build, sign and send grid contract transactions", long_about = None)]
struct Cli {
    /// Operation code or name: 1 register, 2 approve, 3 createOrder, 4 revise,
    /// 5 userConfirm, 6 userCancel, 7 addNode
    #[arg(long, default_value = "1", value_parser = parse_operation)]
    tx: Operation,

    /// Environment: local, sepo, dev or test
    #[arg(long, default_value = "local", value_parser = parse_environment)]
    chain: Environment,

    /// Send the signed transaction and wait for it to be mined
    #[arg(long)]
    auto: bool,

    /// RPC endpoint, overrides the environment default
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Chain ID, overrides the environment default
    #[arg(long, env = "CHAIN_ID")]
    chain_id: Option<u64>,

    /// Contract address file (default: deployments/<env>.json)
    #[arg(long)]
    contracts: Option<PathBuf>,

    /// Directory holding Registry.abi, Market.abi and Credit.abi
    #[arg(long, default_value = DEFAULT_ABI_DIR)]
    abi_dir: PathBuf,

    /// JSON file with the operation's arguments (default: demonstration values)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Gas limit of the transaction
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    gas_limit: u64,

    /// Seconds between receipt queries
    #[arg(long, default_value_t = 2)]
    poll_interval_secs: u64,

    /// Seconds to wait for the transaction to be mined
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Admin private key
    #[arg(long, env = "ADMIN_PRIVATE_KEY", hide_env_values = true)]
    admin_key: Option<String>,

    /// User private key
    #[arg(long, env = "USER_PRIVATE_KEY", hide_env_values = true)]
    user_key: Option<String>,

    /// Provider private key
    #[arg(long, env = "PROVIDER_PRIVATE_KEY", hide_env_values = true)]
    provider_key: Option<String>,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse().map_err(|e: Report| e.to_string())
}

fn parse_environment(s: &str) -> Result<Environment, String> {
    s.parse().map_err(|e: Report| e.to_string())
}

fn log_startup(config: &NetworkConfig, endpoint: &Url, operation: Operation) {
    info!(
        environment = %config.environment,
        %endpoint,
        %operation,
        registry = %config.contracts.registry,
        market = %config.contracts.market,
        credit = %config.contracts.credit,
        "grid-sendtx"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the signed transaction only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Everything below up to the client is offline and fails before any RPC call
    let operation = cli.tx;

    let mut config = NetworkConfig::load(cli.chain, cli.contracts.as_deref())?;
    if let Some(rpc_url) = cli.rpc_url {
        config = config.with_rpc_url(rpc_url);
    }
    if let Some(chain_id) = cli.chain_id {
        config = config.with_chain_id(chain_id);
    }
    let endpoint = config.endpoint()?;

    let abis = ContractAbis::load(&cli.abi_dir)?;
    let keys = RoleKeys::from_hex(
        cli.admin_key.as_deref(),
        cli.user_key.as_deref(),
        cli.provider_key.as_deref(),
    )?;
    let poll = PollConfig::new(
        Duration::from_secs(cli.poll_interval_secs),
        Duration::from_secs(cli.timeout_secs),
    );

    log_startup(&config, &endpoint, operation);

    let client = TxClient::new(RpcClient::new(endpoint), config, abis, keys)
        .with_gas_limit(cli.gas_limit)
        .with_poll(poll);

    let params = match &cli.params {
        Some(path) => OperationParams::load(operation, path)?,
        None => {
            warn!(%operation, "no --params given, using demonstration values");
            client.sample_params(operation)?
        }
    };

    let execution = client.execute(&params, cli.auto).await?;
    println!("{}", execution.signed.to_json()?);

    if execution.outcome.is_failure() {
        error!(outcome = %execution.outcome, "transaction not confirmed");
        bail!("{}", execution.outcome);
    }
    if cli.auto {
        info!(outcome = %execution.outcome, "done");
    }

    Ok(())
}
