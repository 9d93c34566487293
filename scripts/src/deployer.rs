//! Deployment & linking of the contracts over JSON-RPC

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    constants::{RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL},
    errors::ScriptError,
    solidity::IBonTerraPassport,
    types::ConstructorArgs,
};

/// Submits the transactions that deploy & wire up the contracts
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Deploy the contract constructed by `args`, returning its address
    /// once the deployment transaction is included
    async fn deploy(&self, args: &ConstructorArgs) -> Result<Address, ScriptError>;

    /// Record the faction gem contract's address in the passport contract
    async fn set_faction_gem(
        &self,
        passport: Address,
        faction_gem: Address,
    ) -> Result<(), ScriptError>;
}

/// Deploys contracts from their Hardhat artifacts through an RPC provider
/// with a signing wallet attached
pub struct RpcDeployer {
    /// The provider through which transactions are sent
    client: DynProvider,
    /// The artifacts from which creation bytecode is read
    artifacts: ArtifactStore,
    /// How long to wait between receipt checks
    receipt_poll_interval: Duration,
    /// How many receipt checks to make before giving up on a transaction
    receipt_poll_attempts: usize,
}

impl RpcDeployer {
    pub fn new(client: DynProvider, artifacts: ArtifactStore) -> Self {
        Self {
            client,
            artifacts,
            receipt_poll_interval: RECEIPT_POLL_INTERVAL,
            receipt_poll_attempts: RECEIPT_POLL_ATTEMPTS,
        }
    }

    /// Override the receipt polling schedule
    pub fn with_receipt_polling(mut self, poll_interval: Duration, poll_attempts: usize) -> Self {
        self.receipt_poll_interval = poll_interval;
        self.receipt_poll_attempts = poll_attempts;
        self
    }

    /// Poll for the receipt of the given transaction.
    ///
    /// The receipt is fetched directly rather than through alloy's pending
    /// transaction watcher, retrying a bounded number of times.
    async fn await_receipt(
        &self,
        tx_hash: TxHash,
        err: fn(String) -> ScriptError,
    ) -> Result<TransactionReceipt, ScriptError> {
        for _ in 0..self.receipt_poll_attempts {
            let receipt = self
                .client
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| err(e.to_string()))?;

            match receipt {
                Some(receipt) => return Ok(receipt),
                None => tokio::time::sleep(self.receipt_poll_interval).await,
            }
        }

        Err(err(format!(
            "no receipt for tx {} after {} attempts",
            tx_hash, self.receipt_poll_attempts
        )))
    }
}

/// Append the encoded constructor arguments to the creation bytecode
pub fn deploy_code(bytecode: &Bytes, args: &ConstructorArgs) -> Bytes {
    [&bytecode[..], args.abi_encode().as_slice()]
        .concat()
        .into()
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn deploy(&self, args: &ConstructorArgs) -> Result<Address, ScriptError> {
        let contract = args.contract();
        let bytecode = self.artifacts.creation_bytecode(contract)?;

        let tx = TransactionRequest::default().with_deploy_code(deploy_code(&bytecode, args));
        let pending_tx = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", contract, e)))?;
        let tx_hash = *pending_tx.tx_hash();
        info!("{} deployment submitted in tx {}", contract, tx_hash);

        let receipt = self
            .await_receipt(tx_hash, ScriptError::ContractDeployment)
            .await?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} deployment reverted in tx {}",
                contract, receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in {} deployment receipt",
                contract
            ))
        })
    }

    async fn set_faction_gem(
        &self,
        passport: Address,
        faction_gem: Address,
    ) -> Result<(), ScriptError> {
        let passport = IBonTerraPassport::new(passport, self.client.clone());

        let pending_tx = passport
            .setFactionGem(faction_gem)
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let receipt = self
            .await_receipt(*pending_tx.tx_hash(), ScriptError::ContractInteraction)
            .await?;

        if !receipt.status() {
            return Err(ScriptError::ContractInteraction(format!(
                "setFactionGem reverted in tx {}",
                receipt.transaction_hash
            )));
        }

        Ok(())
    }
}
