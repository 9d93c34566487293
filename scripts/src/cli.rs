//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use alloy::{primitives::Address, providers::DynProvider};
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy, verify},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CATALOG_CMD, DEFAULT_CONSTANTS_PATH,
        DEFAULT_ETHERSCAN_API_URL, DEFAULT_MAIN_ASSETS_CMD, DEFAULT_RPC_URL,
        ETHERSCAN_API_KEY_ENV_VAR, PRIV_KEY_ENV_VAR, RPC_URL_ENV_VAR,
    },
    errors::ScriptError,
};

/// Deploy & configure the BonTerra contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = PRIV_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = RPC_URL_ENV_VAR, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy, link, configure & verify all of the contracts
    Deploy(DeployArgs),
    /// Verify an already deployed soldier contract
    Verify(VerifyArgs),
}

impl Command {
    pub async fn run(
        self,
        client: DynProvider,
        rpc_url: &str,
        priv_key: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy(args, client, rpc_url, priv_key).await,
            Command::Verify(args) => verify(args, client).await,
        }
    }
}

/// Deploy the soldier, passport, gem & catalog contracts.
///
/// The passport is linked to the faction gem once both are deployed, after
/// which the main assets & catalog are configured by the external routines
/// and the soldier contract is verified.
#[derive(Args)]
pub struct DeployArgs {
    /// Path to the JSON file holding the constructor constants
    #[arg(short, long, default_value = DEFAULT_CONSTANTS_PATH)]
    pub constants: PathBuf,

    /// Path to the Hardhat artifacts directory
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Path to which the deployed addresses are written, if any
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,

    /// Command registering the main assets of the soldier & gem contracts,
    /// run through `sh -c`.
    ///
    /// Receives the deployed addresses in `SOLDIER_ADDRESS`,
    /// `ELEMENT_GEM_ADDRESS`, `FACTION_GEM_ADDRESS` & `SKILL_GEM_ADDRESS`
    #[arg(long, default_value = DEFAULT_MAIN_ASSETS_CMD)]
    pub main_assets_cmd: String,

    /// Command configuring the catalog, run through `sh -c`.
    ///
    /// Receives the deployed addresses in `CATALOG_ADDRESS`,
    /// `ELEMENT_GEM_ADDRESS`, `SKILL_GEM_ADDRESS` & `FACTION_GEM_ADDRESS`
    #[arg(long, default_value = DEFAULT_CATALOG_CMD)]
    pub catalog_cmd: String,

    /// Skip verifying the soldier contract
    #[arg(long)]
    pub skip_verify: bool,

    #[command(flatten)]
    pub etherscan: EtherscanArgs,
}

/// Verify the soldier contract at the given address, constructed
/// from the given constants
#[derive(Args)]
pub struct VerifyArgs {
    /// Address of the soldier contract
    #[arg(long)]
    pub address: Address,

    /// Path to the JSON file holding the constructor constants
    #[arg(short, long, default_value = DEFAULT_CONSTANTS_PATH)]
    pub constants: PathBuf,

    /// Path to the Hardhat artifacts directory
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    #[command(flatten)]
    pub etherscan: EtherscanArgs,
}

/// Block explorer options
#[derive(Args)]
pub struct EtherscanArgs {
    /// Etherscan API key
    #[arg(long, env = ETHERSCAN_API_KEY_ENV_VAR, hide_env_values = true)]
    pub etherscan_api_key: Option<String>,

    /// Etherscan API URL
    #[arg(long, default_value = DEFAULT_ETHERSCAN_API_URL)]
    pub etherscan_api_url: String,
}
