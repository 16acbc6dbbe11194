//! The signer collaborator: key material, signing, nonces and submission.
//!
//! Intents are handed over by reference and never modified, so a cancelled
//! or failed submission leaves the caller with the same intent it built.

use async_trait::async_trait;
use interact_core::intent::{CallIntent, DeployIntent, QueryIntent, UpgradeIntent};
use interact_core::value::Address;
use thiserror::Error;

/// Result of a submitted state-changing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: String,
}

/// Result of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub tx_hash: String,
    pub contract_address: Address,
}

/// Values returned by a VM query, one entry per returned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub return_data: Vec<Vec<u8>>,
}

/// Errors reported by the signer. They are surfaced unchanged.
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("signing failed: {0}")]
    Signing(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("execution failed: {0}")]
    Execution(String),
}

/// A wallet able to sign and submit intents.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Account the transactions are sent from.
    fn sender(&self) -> Address;

    async fn deploy(&self, intent: &DeployIntent) -> Result<DeployOutcome, SignerError>;

    async fn upgrade(&self, intent: &UpgradeIntent) -> Result<TxOutcome, SignerError>;

    async fn call(&self, intent: &CallIntent) -> Result<TxOutcome, SignerError>;

    async fn query(&self, intent: &QueryIntent) -> Result<QueryOutcome, SignerError>;
}
