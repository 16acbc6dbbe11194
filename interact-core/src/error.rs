//! Error types for argument encoding, intent construction and configuration.
//!
//! Every error here is raised while an intent is being put together, before
//! anything is handed to a signer. None of them are worth retrying: they
//! point at a bad command table, a bad raw argument or a bad data file.

use num_bigint::BigUint;
use thiserror::Error;

use crate::config::Environment;
use crate::value::{UintWidth, ValuePath, ValueShape};

/// Failure to turn bech32 text into a 32-byte account id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("malformed bech32: {0}")]
    Bech32(#[from] bech32::Error),

    #[error("wrong human-readable part: expected \"{expected}\", got \"{found}\"")]
    Hrp { expected: &'static str, found: String },

    #[error("expected bech32 checksum, got bech32m")]
    Variant,

    #[error("expected 32 address bytes, got {0}")]
    Length(usize),
}

/// Malformed `TypedValue` input reported by the codec.
///
/// `position` is the path from the encoded root to the offending value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("value {value} at {position} does not fit in {width}")]
    Range {
        position: ValuePath,
        width: UintWidth,
        value: BigUint,
    },

    #[error("list element at {position} is {found}, expected {expected} like the elements before it")]
    TypeMismatch {
        position: ValuePath,
        expected: ValueShape,
        found: ValueShape,
    },

    #[error("invalid address \"{text}\" at {position}: {source}")]
    AddressFormat {
        position: ValuePath,
        text: String,
        source: AddressError,
    },
}

impl EncodingError {
    pub fn position(&self) -> &ValuePath {
        match self {
            EncodingError::Range { position, .. }
            | EncodingError::TypeMismatch { position, .. }
            | EncodingError::AddressFormat { position, .. } => position,
        }
    }
}

/// Failure to build a transaction intent for a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command '{command}' is misconfigured: {reason}")]
    InvalidCommand { command: String, reason: String },

    #[error("command '{command}' needs a contract address, but none is configured for {environment}")]
    UnresolvedAddress {
        command: String,
        environment: Environment,
    },

    #[error("command '{command}', argument {index} ({label}): {reason}")]
    ArgumentBinding {
        command: String,
        label: String,
        index: usize,
        reason: String,
    },

    #[error("command '{command}', argument {index} ({label}): {source}")]
    Encoding {
        command: String,
        label: String,
        index: usize,
        source: EncodingError,
    },
}

impl BuildError {
    /// Numeric code for scripted callers.
    pub fn error_code(&self) -> u32 {
        match self {
            BuildError::UnknownCommand(_) => 2000,
            BuildError::InvalidCommand { .. } => 2001,
            BuildError::UnresolvedAddress { .. } => 2002,
            BuildError::ArgumentBinding { .. } => 2003,
            BuildError::Encoding { source, .. } => match source {
                EncodingError::Range { .. } => 2100,
                EncodingError::TypeMismatch { .. } => 2101,
                EncodingError::AddressFormat { .. } => 2102,
            },
        }
    }
}

/// Failure to load the interaction data file or command table.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("contract code is not valid hex: {0}")]
    Code(#[from] hex::FromHexError),

    #[error("address configured for {environment} is invalid: {source}")]
    Address {
        environment: Environment,
        source: AddressError,
    },

    #[error("unknown environment '{0}' (expected devnet, testnet or mainnet)")]
    UnknownEnvironment(String),
}
