//! Implementations of the deploy scripts

use std::path::Path;

use alloy::providers::DynProvider;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    cli::{DeployArgs, EtherscanArgs, VerifyArgs},
    configurator::{AssetConfigurator, CommandConfigurator},
    constants::DeployConstants,
    deployer::{ContractDeployer, RpcDeployer},
    errors::ScriptError,
    types::{ConstructorArgs, ContractHandle, Deployment},
    utils::{fetch_chain_id, write_deployments},
    verifier::{EtherscanVerifier, SkipVerification, SourceVerifier},
};

/// Deploy every contract, link the passport to the faction gem, configure
/// the assets & catalog, and verify the soldier contract.
///
/// Each step is awaited before the next is started, and the first error
/// aborts the run. If a deployments path is given, the addresses are written
/// to it once reported, before configuration starts.
pub async fn deploy_contracts(
    deployer: &impl ContractDeployer,
    configurator: &impl AssetConfigurator,
    verifier: &impl SourceVerifier,
    constants: &DeployConstants,
    deployments_path: Option<&Path>,
) -> Result<Deployment, ScriptError> {
    info!("Deploying smart contracts");

    let soldier_args = ConstructorArgs::soldier(constants);
    let soldier = deploy_contract(deployer, &soldier_args).await?;
    let passport = deploy_contract(deployer, &ConstructorArgs::passport()).await?;
    let element_gem = deploy_contract(
        deployer,
        &ConstructorArgs::element_gem(constants, soldier.address),
    )
    .await?;
    let skill_gem = deploy_contract(
        deployer,
        &ConstructorArgs::skill_gem(constants, soldier.address),
    )
    .await?;
    let faction_gem = deploy_contract(
        deployer,
        &ConstructorArgs::faction_gem(constants, soldier.address, passport.address),
    )
    .await?;
    let catalog = deploy_contract(deployer, &ConstructorArgs::catalog(constants)).await?;

    deployer
        .set_faction_gem(passport.address, faction_gem.address)
        .await?;

    let deployment = Deployment {
        soldier,
        passport,
        element_gem,
        faction_gem,
        skill_gem,
        catalog,
    };
    for line in deployment.report_lines() {
        info!("{}", line);
    }

    if let Some(deployments_path) = deployments_path {
        write_deployments(deployments_path, &deployment)?;
        info!("Deployments written to {}", deployments_path.display());
    }

    configurator
        .add_main_assets(&soldier, &element_gem, &faction_gem, &skill_gem)
        .await?;
    configurator
        .configure_catalog(
            &catalog,
            element_gem.address,
            skill_gem.address,
            faction_gem.address,
        )
        .await?;

    verifier.verify(soldier.address, &soldier_args).await?;

    Ok(deployment)
}

async fn deploy_contract(
    deployer: &impl ContractDeployer,
    args: &ConstructorArgs,
) -> Result<ContractHandle, ScriptError> {
    let contract = args.contract();
    info!("Deploying {}", contract);

    let address = deployer.deploy(args).await?;
    Ok(ContractHandle { contract, address })
}

/// Run the full deployment against the network the client is connected to
pub async fn deploy(
    args: DeployArgs,
    client: DynProvider,
    rpc_url: &str,
    priv_key: &str,
) -> Result<(), ScriptError> {
    let constants = DeployConstants::from_file(&args.constants)?;
    let artifacts = ArtifactStore::new(&args.artifacts_dir);

    let deployer = RpcDeployer::new(client.clone(), artifacts.clone());
    let configurator =
        CommandConfigurator::new(args.main_assets_cmd, args.catalog_cmd, rpc_url, priv_key);

    let deployments_path = args.deployments_path.as_deref();

    // The verifier is set up before any transaction is sent
    if args.skip_verify {
        deploy_contracts(
            &deployer,
            &configurator,
            &SkipVerification,
            &constants,
            deployments_path,
        )
        .await?;
    } else {
        let verifier = etherscan_verifier(args.etherscan, &client, artifacts).await?;
        deploy_contracts(
            &deployer,
            &configurator,
            &verifier,
            &constants,
            deployments_path,
        )
        .await?;
    }

    Ok(())
}

/// Verify an already deployed soldier contract
pub async fn verify(args: VerifyArgs, client: DynProvider) -> Result<(), ScriptError> {
    let constants = DeployConstants::from_file(&args.constants)?;
    let artifacts = ArtifactStore::new(&args.artifacts_dir);

    let verifier = etherscan_verifier(args.etherscan, &client, artifacts).await?;
    verifier
        .verify(args.address, &ConstructorArgs::soldier(&constants))
        .await
}

async fn etherscan_verifier(
    args: EtherscanArgs,
    client: &DynProvider,
    artifacts: ArtifactStore,
) -> Result<EtherscanVerifier, ScriptError> {
    let api_key = args.etherscan_api_key.ok_or_else(|| {
        ScriptError::Verification(
            "an Etherscan API key is required unless verification is skipped".to_string(),
        )
    })?;
    let chain_id = fetch_chain_id(client).await?;

    Ok(EtherscanVerifier::new(
        args.etherscan_api_url,
        api_key,
        chain_id,
        artifacts,
    ))
}
