//! Declarative command table.
//!
//! A command table describes every command the tool knows: what kind of
//! operation it is, its fixed fields (function name, gas limit, metadata,
//! payments) and the ordered list of arguments it takes. It is plain JSON:
//!
//! ```json
//! {
//!   "name": "nft-minter",
//!   "version": "0.1.0",
//!   "commands": [
//!     {
//!       "name": "mint",
//!       "kind": "call",
//!       "function": "mint",
//!       "gasLimit": 100000000,
//!       "transfers": [{ "token": "RIDE-05b1bb", "nonce": 0, "amount": "15e18" }],
//!       "args": [{ "name": "amount_of_tokens", "type": "u32", "default": 3 }]
//!     }
//!   ]
//! }
//! ```

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::CodeMetadata;

/// Top-level command table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTable {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub commands: Vec<CommandDef>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// One named command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: CommandKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
}

/// Operation kind plus the fields fixed by the command definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CommandKind {
    Deploy {
        gas_limit: u64,
        #[serde(default)]
        metadata: CodeMetadata,
    },
    Upgrade {
        gas_limit: u64,
        #[serde(default)]
        metadata: CodeMetadata,
    },
    Call {
        function: String,
        gas_limit: u64,
        /// Native (EGLD) value, in the smallest denomination.
        #[serde(default, with = "decimal", skip_serializing_if = "is_zero")]
        value: BigUint,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transfers: Vec<TransferSpec>,
    },
    Query {
        function: String,
        /// Queries are free; a gas limit here is a table error and is
        /// rejected when the command is built.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas_limit: Option<u64>,
    },
}

fn is_zero(v: &BigUint) -> bool {
    *v == BigUint::default()
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Deploy { .. } => "deploy",
            CommandKind::Upgrade { .. } => "upgrade",
            CommandKind::Call { .. } => "call",
            CommandKind::Query { .. } => "query",
        }
    }

    /// Whether the command is sent to the already deployed contract.
    pub fn needs_target(&self) -> bool {
        !matches!(self, CommandKind::Deploy { .. })
    }

    pub fn gas_limit(&self) -> Option<u64> {
        match self {
            CommandKind::Deploy { gas_limit, .. }
            | CommandKind::Upgrade { gas_limit, .. }
            | CommandKind::Call { gas_limit, .. } => Some(*gas_limit),
            CommandKind::Query { .. } => None,
        }
    }
}

/// A token payment attached to a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpec {
    pub token: String,
    #[serde(default)]
    pub nonce: u64,
    #[serde(with = "decimal")]
    pub amount: BigUint,
}

/// A declared argument: its label and type, and optionally the value used
/// when the invoker does not supply one.
///
/// The label is for help text and error messages only; arguments are bound
/// by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ArgType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Declared argument type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgType {
    Primitive(Primitive),
    Option { option: Box<ArgType> },
    List { list: Box<ArgType> },
    Tuple { tuple: Vec<ArgType> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    U8,
    U32,
    U64,
    BigUint,
    Bool,
    String,
    Address,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::U8 => "u8",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::BigUint => "biguint",
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Address => "address",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Primitive(p) => write!(f, "{}", p),
            ArgType::Option { option } => write!(f, "Option<{}>", option),
            ArgType::List { list } => write!(f, "List<{}>", list),
            ArgType::Tuple { tuple } => {
                let strs: Vec<String> = tuple.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", strs.join(", "))
            }
        }
    }
}

impl CommandTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            commands: vec![],
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `BigUint` as a decimal string. Accepts plain digits, `_` separators and
/// an integer exponent (`"15e18"`), or a JSON integer.
pub mod decimal {
    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => parse(&s).map_err(D::Error::custom),
            Value::Number(n) => n
                .as_u64()
                .map(BigUint::from)
                .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {}", n))),
            other => Err(D::Error::custom(format!("expected a decimal amount, got {}", other))),
        }
    }

    /// Most decimal digits an amount may have: enough for any 256-bit value.
    pub const MAX_DIGITS: usize = 78;

    /// Parse `digits[eEXP]`, ignoring `_` separators.
    pub fn parse(raw: &str) -> Result<BigUint, String> {
        let (digits, exponent) = split(raw)?;
        if digits.is_empty() {
            return Ok(BigUint::default());
        }
        let base: BigUint = digits
            .parse()
            .map_err(|_| format!("'{}' is not an unsigned integer", raw))?;
        Ok(base * BigUint::from(10u32).pow(exponent))
    }

    /// Check the syntax and size of an amount without building it.
    pub fn validate(raw: &str) -> Result<(), String> {
        split(raw).map(|_| ())
    }

    /// Significant mantissa digits (empty for zero) and the exponent.
    /// Rejects values longer than `MAX_DIGITS` before any arithmetic.
    fn split(raw: &str) -> Result<(String, u32), String> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
        let (mantissa, exponent) = match cleaned.split_once(['e', 'E']) {
            Some((m, e)) => (m, Some(e)),
            None => (cleaned.as_str(), None),
        };
        if mantissa.starts_with('-') {
            return Err(format!("'{}' is negative", raw));
        }
        if mantissa.is_empty() || !mantissa.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("'{}' is not an unsigned integer", raw));
        }
        let exponent = match exponent {
            Some(e) => e
                .parse::<u32>()
                .map_err(|_| format!("invalid exponent in '{}'", raw))?,
            None => 0,
        };
        let digits = mantissa.trim_start_matches('0');
        if digits.is_empty() {
            return Ok((String::new(), 0));
        }
        if digits.len() as u64 + u64::from(exponent) > MAX_DIGITS as u64 {
            return Err(format!("'{}' has more than {} digits", raw, MAX_DIGITS));
        }
        Ok((digits.to_string(), exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_exponent() {
        assert_eq!(decimal::parse("15e18").unwrap().to_string(), "15000000000000000000");
        assert_eq!(decimal::parse("100_000_000").unwrap(), BigUint::from(100_000_000u32));
        assert_eq!(decimal::parse("0").unwrap(), BigUint::default());
        assert!(decimal::parse("-5").unwrap_err().contains("negative"));
        assert!(decimal::parse("1.5").is_err());
        assert!(decimal::parse("").is_err());
    }

    #[test]
    fn test_decimal_size_limit() {
        let started = std::time::Instant::now();
        let err = decimal::parse("1e4000000000").unwrap_err();
        assert!(err.contains("more than 78 digits"), "{}", err);
        assert!(decimal::parse("1e99999999999").unwrap_err().contains("invalid exponent"));
        let err = decimal::parse("1e30000000").unwrap_err();
        assert!(err.contains("more than 78 digits"), "{}", err);
        assert!(decimal::parse(&"9".repeat(100)).is_err());
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        assert_eq!(decimal::parse("1e77").unwrap(), BigUint::from(10u32).pow(77));
        assert!(decimal::parse("10e77").is_err());
        assert_eq!(decimal::parse("000e4000").unwrap(), BigUint::default());
        assert!(decimal::validate("1e30000000").is_err());
        assert!(decimal::validate("696969e18").is_ok());
    }

    #[test]
    fn test_arg_type_display() {
        let ty: ArgType = serde_json::from_str(r#"{"tuple":["string","u64","biguint"]}"#).unwrap();
        assert_eq!(ty.to_string(), "(string, u64, biguint)");
        let ty: ArgType = serde_json::from_str(r#"{"option":{"list":"address"}}"#).unwrap();
        assert_eq!(ty.to_string(), "Option<List<address>>");
    }
}
