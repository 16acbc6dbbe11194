//! Transaction intents: fully specified operations, ready to be signed.
//!
//! Intents are only produced by the builder and expose read-only accessors.
//! A retry builds a new, equal intent rather than reusing an old one.

use std::fmt;

use num_bigint::BigUint;

use crate::codec::EncodedArgument;
use crate::metadata::CodeMetadata;
use crate::value::Address;

/// A token payment attached to a call. Amounts are always arbitrary width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub token_identifier: String,
    /// Zero for fungible tokens.
    pub nonce: u64,
    pub amount: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployIntent {
    pub(crate) code: Vec<u8>,
    pub(crate) metadata: CodeMetadata,
    pub(crate) gas_limit: u64,
    pub(crate) args: Vec<EncodedArgument>,
}

impl DeployIntent {
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn metadata(&self) -> CodeMetadata {
        self.metadata
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn constructor_args(&self) -> &[EncodedArgument] {
        &self.args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeIntent {
    pub(crate) target: Address,
    pub(crate) code: Vec<u8>,
    pub(crate) metadata: CodeMetadata,
    pub(crate) gas_limit: u64,
    pub(crate) args: Vec<EncodedArgument>,
}

impl UpgradeIntent {
    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn metadata(&self) -> CodeMetadata {
        self.metadata
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn args(&self) -> &[EncodedArgument] {
        &self.args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallIntent {
    pub(crate) target: Address,
    pub(crate) function: String,
    pub(crate) gas_limit: u64,
    pub(crate) value: BigUint,
    pub(crate) transfers: Vec<TokenTransfer>,
    pub(crate) args: Vec<EncodedArgument>,
}

impl CallIntent {
    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Native value in the smallest denomination.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn token_transfers(&self) -> &[TokenTransfer] {
        &self.transfers
    }

    pub fn args(&self) -> &[EncodedArgument] {
        &self.args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIntent {
    pub(crate) target: Address,
    pub(crate) function: String,
    pub(crate) args: Vec<EncodedArgument>,
}

impl QueryIntent {
    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[EncodedArgument] {
        &self.args
    }
}

/// One operation against the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionIntent {
    Deploy(DeployIntent),
    Upgrade(UpgradeIntent),
    Call(CallIntent),
    Query(QueryIntent),
}

impl TransactionIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            TransactionIntent::Deploy(_) => "deploy",
            TransactionIntent::Upgrade(_) => "upgrade",
            TransactionIntent::Call(_) => "call",
            TransactionIntent::Query(_) => "query",
        }
    }

    /// Contract the intent is addressed to; deployments have none.
    pub fn target(&self) -> Option<&Address> {
        match self {
            TransactionIntent::Deploy(_) => None,
            TransactionIntent::Upgrade(i) => Some(&i.target),
            TransactionIntent::Call(i) => Some(&i.target),
            TransactionIntent::Query(i) => Some(&i.target),
        }
    }

    pub fn function(&self) -> Option<&str> {
        match self {
            TransactionIntent::Call(i) => Some(&i.function),
            TransactionIntent::Query(i) => Some(&i.function),
            _ => None,
        }
    }

    /// Gas budget; queries are free.
    pub fn gas_limit(&self) -> Option<u64> {
        match self {
            TransactionIntent::Deploy(i) => Some(i.gas_limit),
            TransactionIntent::Upgrade(i) => Some(i.gas_limit),
            TransactionIntent::Call(i) => Some(i.gas_limit),
            TransactionIntent::Query(_) => None,
        }
    }

    pub fn args(&self) -> &[EncodedArgument] {
        match self {
            TransactionIntent::Deploy(i) => &i.args,
            TransactionIntent::Upgrade(i) => &i.args,
            TransactionIntent::Call(i) => &i.args,
            TransactionIntent::Query(i) => &i.args,
        }
    }
}

impl fmt::Display for TransactionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionIntent::Deploy(i) => write!(
                f,
                "deploy {} bytes of code, metadata {}, gas {}",
                i.code.len(),
                i.metadata,
                i.gas_limit
            ),
            TransactionIntent::Upgrade(i) => write!(
                f,
                "upgrade {} with {} bytes of code, metadata {}, gas {}",
                i.target,
                i.code.len(),
                i.metadata,
                i.gas_limit
            ),
            TransactionIntent::Call(i) => {
                write!(f, "call {}::{}, gas {}", i.target, i.function, i.gas_limit)?;
                if i.value != BigUint::default() {
                    write!(f, ", value {}", i.value)?;
                }
                for t in &i.transfers {
                    write!(f, ", pay {} {}", t.amount, t.token_identifier)?;
                    if t.nonce != 0 {
                        write!(f, "#{}", t.nonce)?;
                    }
                }
                Ok(())
            }
            TransactionIntent::Query(i) => write!(f, "query {}::{}", i.target, i.function),
        }
    }
}
