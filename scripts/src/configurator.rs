//! Post-deployment configuration of the contracts, delegated to external routines

use std::process::Stdio;

use alloy::primitives::Address;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::{
    constants::{
        CATALOG_ADDRESS_ENV_VAR, SHELL, ELEMENT_GEM_ADDRESS_ENV_VAR, FACTION_GEM_ADDRESS_ENV_VAR,
        PRIV_KEY_ENV_VAR, RPC_URL_ENV_VAR, SKILL_GEM_ADDRESS_ENV_VAR, SOLDIER_ADDRESS_ENV_VAR,
    },
    errors::ScriptError,
    types::ContractHandle,
};

/// Configures the deployed contracts' assets & catalog
#[async_trait]
pub trait AssetConfigurator: Send + Sync {
    /// Register the main assets of the soldier & gem contracts
    async fn add_main_assets(
        &self,
        soldier: &ContractHandle,
        element_gem: &ContractHandle,
        faction_gem: &ContractHandle,
        skill_gem: &ContractHandle,
    ) -> Result<(), ScriptError>;

    /// Populate the catalog with the parts of the gem contracts
    async fn configure_catalog(
        &self,
        catalog: &ContractHandle,
        element_gem: Address,
        skill_gem: Address,
        faction_gem: Address,
    ) -> Result<(), ScriptError>;
}

/// Runs each configuration routine as an external command, handing it the
/// deployed addresses and the network credentials through its environment
pub struct CommandConfigurator {
    /// The command line registering the main assets
    main_assets_cmd: String,
    /// The command line configuring the catalog
    catalog_cmd: String,
    /// The RPC URL the routines should connect to
    rpc_url: String,
    /// The private key the routines should sign with
    priv_key: String,
}

impl CommandConfigurator {
    pub fn new(main_assets_cmd: String, catalog_cmd: String, rpc_url: &str, priv_key: &str) -> Self {
        Self {
            main_assets_cmd,
            catalog_cmd,
            rpc_url: rpc_url.to_string(),
            priv_key: priv_key.to_string(),
        }
    }

    /// Run the command line with the given addresses in its environment
    async fn run(
        &self,
        command_line: &str,
        addresses: &[(&str, Address)],
    ) -> Result<(), ScriptError> {
        let mut cmd = build_command(command_line)?;
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        cmd.env(RPC_URL_ENV_VAR, &self.rpc_url);
        cmd.env(PRIV_KEY_ENV_VAR, &self.priv_key);
        for (var, address) in addresses {
            cmd.env(var, address.to_string());
        }

        info!("running `{}`", command_line);
        let status = cmd
            .status()
            .await
            .map_err(|e| ScriptError::Configuration(format!("`{}`: {}", command_line, e)))?;

        if !status.success() {
            return Err(ScriptError::Configuration(format!(
                "`{}` failed with {}",
                command_line, status
            )));
        }

        Ok(())
    }
}

/// Build a shell invocation of the command line, so that quoting & paths
/// with spaces behave as they would on a terminal
fn build_command(command_line: &str) -> Result<Command, ScriptError> {
    if command_line.trim().is_empty() {
        return Err(ScriptError::Configuration("empty command".to_string()));
    }

    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(command_line);
    Ok(cmd)
}

#[async_trait]
impl AssetConfigurator for CommandConfigurator {
    async fn add_main_assets(
        &self,
        soldier: &ContractHandle,
        element_gem: &ContractHandle,
        faction_gem: &ContractHandle,
        skill_gem: &ContractHandle,
    ) -> Result<(), ScriptError> {
        self.run(
            &self.main_assets_cmd,
            &[
                (SOLDIER_ADDRESS_ENV_VAR, soldier.address),
                (ELEMENT_GEM_ADDRESS_ENV_VAR, element_gem.address),
                (FACTION_GEM_ADDRESS_ENV_VAR, faction_gem.address),
                (SKILL_GEM_ADDRESS_ENV_VAR, skill_gem.address),
            ],
        )
        .await
    }

    async fn configure_catalog(
        &self,
        catalog: &ContractHandle,
        element_gem: Address,
        skill_gem: Address,
        faction_gem: Address,
    ) -> Result<(), ScriptError> {
        self.run(
            &self.catalog_cmd,
            &[
                (CATALOG_ADDRESS_ENV_VAR, catalog.address),
                (ELEMENT_GEM_ADDRESS_ENV_VAR, element_gem),
                (SKILL_GEM_ADDRESS_ENV_VAR, skill_gem),
                (FACTION_GEM_ADDRESS_ENV_VAR, faction_gem),
            ],
        )
        .await
    }
}
