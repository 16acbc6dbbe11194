//! Environment selection and the interaction data file.
//!
//! The data file holds the compiled contract and where it lives on each
//! network:
//!
//! ```json
//! {
//!   "code": "0061736d0100000001...",
//!   "address": {
//!     "devnet": "erd1qqqqqqqqqqqqqpgq...",
//!     "mainnet": "erd1qqqqqqqqqqqqqpgq..."
//!   }
//! }
//! ```
//!
//! Everything is decoded once at load time into a `ResolvedConfig`, which is
//! then passed by reference into the intent builder.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::value::Address;

/// Network the tool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Devnet,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Devnet => "devnet",
            Environment::Testnet => "testnet",
            Environment::Mainnet => "mainnet",
        }
    }

    /// Chain id signed into every transaction.
    pub fn chain_id(self) -> &'static str {
        match self {
            Environment::Devnet => "D",
            Environment::Testnet => "T",
            Environment::Mainnet => "1",
        }
    }

    pub fn explorer_url(self) -> &'static str {
        match self {
            Environment::Devnet => "https://devnet-explorer.multiversx.com",
            Environment::Testnet => "https://testnet-explorer.multiversx.com",
            Environment::Mainnet => "https://explorer.multiversx.com",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" | "D" => Ok(Environment::Devnet),
            "testnet" | "T" => Ok(Environment::Testnet),
            "mainnet" | "1" => Ok(Environment::Mainnet),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw contents of the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractData {
    /// Contract bytecode, hex encoded.
    pub code: String,
    #[serde(default)]
    pub address: BTreeMap<Environment, String>,
}

/// Configuration for one run: the active environment, the contract code and
/// the per-environment address table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    environment: Environment,
    code: Vec<u8>,
    addresses: BTreeMap<Environment, Address>,
}

impl ResolvedConfig {
    pub fn new(environment: Environment, code: Vec<u8>) -> Self {
        Self {
            environment,
            code,
            addresses: BTreeMap::new(),
        }
    }

    pub fn with_address(mut self, environment: Environment, address: Address) -> Self {
        self.addresses.insert(environment, address);
        self
    }

    pub fn from_data(environment: Environment, data: &InteractData) -> Result<Self, ConfigError> {
        let code = hex::decode(data.code.trim().trim_start_matches("0x"))?;
        let mut config = Self::new(environment, code);
        for (env, text) in &data.address {
            let address = Address::from_bech32(text).map_err(|source| ConfigError::Address {
                environment: *env,
                source,
            })?;
            config = config.with_address(*env, address);
        }
        Ok(config)
    }

    pub fn from_json(environment: Environment, json: &str) -> Result<Self, ConfigError> {
        let data: InteractData = serde_json::from_str(json)?;
        Self::from_data(environment, &data)
    }

    pub fn load(environment: Environment, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(environment, &json)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// The contract address for the active environment, if one is recorded.
    pub fn contract_address(&self) -> Option<&Address> {
        self.addresses.get(&self.environment)
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/transactions/{}", self.environment.explorer_url(), tx_hash)
    }

    pub fn account_url(&self, address: &Address) -> String {
        format!("{}/accounts/{}", self.environment.explorer_url(), address)
    }
}
