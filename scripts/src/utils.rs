//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{errors::ScriptError, types::Deployment};

/// Sets up the client with which transactions are sent, signing with the
/// given private key and connecting to the given RPC url.
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let deployer = signer.address();
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    let client = DynProvider::new(provider);

    let chain_id = fetch_chain_id(&client).await?;
    info!("deploying from {} on chain {}", deployer, chain_id);

    Ok(client)
}

/// Fetch the chain ID of the network the client is connected to
pub async fn fetch_chain_id(client: &DynProvider) -> Result<u64, ScriptError> {
    client
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

/// Write the deployed addresses to the deployments file, creating it if needed
pub fn write_deployments(file_path: &Path, deployment: &Deployment) -> Result<(), ScriptError> {
    let contents = serde_json::to_string_pretty(&deployment.to_json())
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    fs::write(file_path, contents)
        .map_err(|e| ScriptError::WriteDeployments(format!("{}: {}", file_path.display(), e)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{setup_client, write_deployments};
    use crate::{errors::ScriptError, test_helpers::mock_deployment};

    #[test]
    fn test_write_deployments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let deployment = mock_deployment();

        write_deployments(&path, &deployment).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, deployment.to_json());
    }

    #[test]
    fn test_write_deployments_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("deployments.json");

        assert!(matches!(
            write_deployments(&path, &mock_deployment()),
            Err(ScriptError::WriteDeployments(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_priv_key() {
        let res = setup_client("not-a-key", "http://localhost:8545").await;
        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }
}
