//! Source verification of deployed contracts on a block explorer

use std::time::Duration;

use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    constants::{
        STANDARD_JSON_CODE_FORMAT, VERIFICATION_POLL_ATTEMPTS, VERIFICATION_POLL_INTERVAL,
    },
    errors::ScriptError,
    types::ConstructorArgs,
};

/// The `result` Etherscan gives a verification request for an already verified contract
const ALREADY_VERIFIED_SUBMISSION: &str = "Contract source code already verified";
/// The `result` Etherscan gives a status check for an already verified contract
const ALREADY_VERIFIED_STATUS: &str = "Already Verified";
/// The `result` Etherscan gives a status check for a successful verification
const VERIFIED_STATUS: &str = "Pass - Verified";
/// The `result` Etherscan gives a status check for a queued verification
const PENDING_STATUS: &str = "Pending in queue";

/// Submits a deployed contract's source for verification
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    /// Verify the contract at `address`, constructed with `args`
    async fn verify(&self, address: Address, args: &ConstructorArgs) -> Result<(), ScriptError>;
}

/// Skips verification, for networks without a block explorer
pub struct SkipVerification;

#[async_trait]
impl SourceVerifier for SkipVerification {
    async fn verify(&self, address: Address, args: &ConstructorArgs) -> Result<(), ScriptError> {
        warn!(
            "skipping verification of {} at {}",
            args.contract(),
            address
        );
        Ok(())
    }
}

/// A response from the Etherscan API
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    /// "1" on success, "0" otherwise
    status: String,
    message: String,
    result: String,
}

/// Verifies contracts through the Etherscan API, using the standard JSON
/// compiler input recorded in the Hardhat build info
pub struct EtherscanVerifier {
    client: Client,
    api_url: String,
    api_key: String,
    chain_id: u64,
    artifacts: ArtifactStore,
    poll_interval: Duration,
    poll_attempts: usize,
}

impl EtherscanVerifier {
    pub fn new(api_url: String, api_key: String, chain_id: u64, artifacts: ArtifactStore) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            chain_id,
            artifacts,
            poll_interval: VERIFICATION_POLL_INTERVAL,
            poll_attempts: VERIFICATION_POLL_ATTEMPTS,
        }
    }

    /// Override how often & how many times the verification status is checked
    pub fn with_polling(mut self, poll_interval: Duration, poll_attempts: usize) -> Self {
        self.poll_interval = poll_interval;
        self.poll_attempts = poll_attempts;
        self
    }

    /// Submit the verification request, returning the GUID to poll, or
    /// `None` if the contract is already verified
    async fn submit(
        &self,
        address: Address,
        args: &ConstructorArgs,
    ) -> Result<Option<String>, ScriptError> {
        let input = self.artifacts.verification_input(args.contract())?;
        let constructor_args = hex::encode(args.abi_encode());
        let address = address.to_string();

        let form = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", address.as_str()),
            ("sourceCode", input.standard_json_input.as_str()),
            ("codeformat", STANDARD_JSON_CODE_FORMAT),
            ("contractname", input.fully_qualified_name.as_str()),
            ("compilerversion", input.compiler_version.as_str()),
            // Sic, this is the parameter name the API expects
            ("constructorArguements", constructor_args.as_str()),
        ];

        let response: EtherscanResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", self.chain_id)])
            .form(&form)
            .send()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?
            .json()
            .await
            .map_err(|e| ScriptError::Verification(e.to_string()))?;

        if response.status == "1" {
            return Ok(Some(response.result));
        }
        if response.result == ALREADY_VERIFIED_SUBMISSION {
            return Ok(None);
        }

        Err(ScriptError::Verification(format!(
            "{}: {}",
            response.message, response.result
        )))
    }

    /// Poll the verification status until it passes or fails
    async fn await_verification(&self, guid: &str) -> Result<(), ScriptError> {
        for _ in 0..self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let response: EtherscanResponse = self
                .client
                .get(&self.api_url)
                .query(&[
                    ("chainid", self.chain_id.to_string().as_str()),
                    ("apikey", self.api_key.as_str()),
                    ("module", "contract"),
                    ("action", "checkverifystatus"),
                    ("guid", guid),
                ])
                .send()
                .await
                .map_err(|e| ScriptError::Verification(e.to_string()))?
                .json()
                .await
                .map_err(|e| ScriptError::Verification(e.to_string()))?;

            match response.result.as_str() {
                VERIFIED_STATUS | ALREADY_VERIFIED_STATUS => return Ok(()),
                PENDING_STATUS => continue,
                result => return Err(ScriptError::Verification(result.to_string())),
            }
        }

        Err(ScriptError::Verification(format!(
            "verification {} still pending after {} checks",
            guid, self.poll_attempts
        )))
    }
}

#[async_trait]
impl SourceVerifier for EtherscanVerifier {
    async fn verify(&self, address: Address, args: &ConstructorArgs) -> Result<(), ScriptError> {
        let contract = args.contract();
        match self.submit(address, args).await? {
            Some(guid) => {
                info!("submitted {} for verification, guid {}", contract, guid);
                self.await_verification(&guid).await?;
                info!("{} at {} verified", contract, address);
            }
            None => info!("{} at {} is already verified", contract, address),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    use super::{EtherscanVerifier, SourceVerifier};
    use crate::{
        artifacts::ArtifactStore,
        errors::ScriptError,
        test_helpers::{dummy_constants, mock_address, write_artifacts, DUMMY_SOLC_VERSION},
        types::{BonContract, ConstructorArgs},
    };

    const API_KEY: &str = "TESTKEY";
    const CHAIN_ID: u64 = 11155111;
    const GUID: &str = "ezq878u486pzijkvvmerl6a9mzwhv6sefgvqi5tkwceejc7tvn";

    fn verifier(server: &MockServer, dir: &TempDir) -> EtherscanVerifier {
        write_artifacts(dir.path());
        EtherscanVerifier::new(
            server.url("/api"),
            API_KEY.to_string(),
            CHAIN_ID,
            ArtifactStore::new(dir.path()),
        )
        .with_polling(Duration::from_millis(1), 3)
    }

    #[tokio::test]
    async fn test_verify_soldier() {
        let server = MockServer::start_async().await;
        let dir = tempdir().unwrap();
        let args = ConstructorArgs::soldier(&dummy_constants());
        let address = mock_address(BonContract::BonFlyer);

        let submit = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api")
                    .query_param("chainid", CHAIN_ID.to_string())
                    .x_www_form_urlencoded_tuple("action", "verifysourcecode")
                    .x_www_form_urlencoded_tuple("contractaddress", address.to_string())
                    .x_www_form_urlencoded_tuple("contractname", "contracts/BonFlyer.sol:BonFlyer")
                    .x_www_form_urlencoded_tuple(
                        "compilerversion",
                        format!("v{}", DUMMY_SOLC_VERSION),
                    )
                    .x_www_form_urlencoded_tuple(
                        "constructorArguements",
                        hex::encode(args.abi_encode()),
                    );
                then.status(200)
                    .json_body(json!({ "status": "1", "message": "OK", "result": GUID }));
            })
            .await;
        let status = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api")
                    .query_param("action", "checkverifystatus")
                    .query_param("guid", GUID);
                then.status(200).json_body(
                    json!({ "status": "1", "message": "OK", "result": "Pass - Verified" }),
                );
            })
            .await;

        verifier(&server, &dir).verify(address, &args).await.unwrap();

        submit.assert_async().await;
        status.assert_async().await;
    }

    #[tokio::test]
    async fn test_already_verified() {
        let server = MockServer::start_async().await;
        let dir = tempdir().unwrap();
        let args = ConstructorArgs::soldier(&dummy_constants());

        let submit = server
            .mock_async(|when, then| {
                when.method(POST).path("/api");
                then.status(200).json_body(json!({
                    "status": "0",
                    "message": "NOTOK",
                    "result": "Contract source code already verified"
                }));
            })
            .await;

        verifier(&server, &dir)
            .verify(mock_address(BonContract::BonFlyer), &args)
            .await
            .unwrap();

        submit.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_submission() {
        let server = MockServer::start_async().await;
        let dir = tempdir().unwrap();
        let args = ConstructorArgs::soldier(&dummy_constants());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api");
                then.status(200).json_body(json!({
                    "status": "0",
                    "message": "NOTOK",
                    "result": "Invalid API Key"
                }));
            })
            .await;

        let res = verifier(&server, &dir)
            .verify(mock_address(BonContract::BonFlyer), &args)
            .await;

        assert!(matches!(res, Err(ScriptError::Verification(msg)) if msg.contains("Invalid API Key")));
    }

    #[tokio::test]
    async fn test_failed_verification() {
        let server = MockServer::start_async().await;
        let dir = tempdir().unwrap();
        let args = ConstructorArgs::soldier(&dummy_constants());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api");
                then.status(200)
                    .json_body(json!({ "status": "1", "message": "OK", "result": GUID }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api");
                then.status(200).json_body(json!({
                    "status": "0",
                    "message": "NOTOK",
                    "result": "Fail - Unable to verify"
                }));
            })
            .await;

        let res = verifier(&server, &dir)
            .verify(mock_address(BonContract::BonFlyer), &args)
            .await;

        assert!(matches!(res, Err(ScriptError::Verification(_))));
    }

    #[tokio::test]
    async fn test_verification_stays_pending() {
        let server = MockServer::start_async().await;
        let dir = tempdir().unwrap();
        let args = ConstructorArgs::soldier(&dummy_constants());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api");
                then.status(200)
                    .json_body(json!({ "status": "1", "message": "OK", "result": GUID }));
            })
            .await;
        let status = server
            .mock_async(|when, then| {
                when.method(GET).path("/api");
                then.status(200).json_body(
                    json!({ "status": "0", "message": "NOTOK", "result": "Pending in queue" }),
                );
            })
            .await;

        let res = verifier(&server, &dir)
            .verify(mock_address(BonContract::BonFlyer), &args)
            .await;

        assert!(res.is_err());
        status.assert_hits_async(3).await;
    }
}
