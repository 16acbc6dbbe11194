//! Code metadata: the capability bits set on a contract at deploy/upgrade time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataFlag {
    Upgradeable,
    Readable,
    Payable,
    PayableBySc,
}

impl MetadataFlag {
    pub const ALL: [MetadataFlag; 4] = [
        MetadataFlag::Upgradeable,
        MetadataFlag::Readable,
        MetadataFlag::Payable,
        MetadataFlag::PayableBySc,
    ];

    /// Bit within the big-endian 2-byte metadata word.
    const fn bit(self) -> u16 {
        match self {
            MetadataFlag::Upgradeable => 0x0100,
            MetadataFlag::Readable => 0x0400,
            MetadataFlag::Payable => 0x0002,
            MetadataFlag::PayableBySc => 0x0004,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataFlag::Upgradeable => "upgradeable",
            MetadataFlag::Readable => "readable",
            MetadataFlag::Payable => "payable",
            MetadataFlag::PayableBySc => "payableBySc",
        }
    }
}

impl FromStr for MetadataFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetadataFlag::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown code metadata flag '{}'", s))
    }
}

impl fmt::Display for MetadataFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of metadata flags. Declaration order and repetition do not matter.
///
/// Serialized as the list of flag names, e.g. `["upgradeable", "payable"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<MetadataFlag>", into = "Vec<MetadataFlag>")]
pub struct CodeMetadata(u16);

impl CodeMetadata {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn with(self, flag: MetadataFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    pub fn contains(&self, flag: MetadataFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn flags(&self) -> Vec<MetadataFlag> {
        MetadataFlag::ALL.into_iter().filter(|f| self.contains(*f)).collect()
    }

    /// The two bytes sent on chain.
    pub fn to_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl FromIterator<MetadataFlag> for CodeMetadata {
    fn from_iter<I: IntoIterator<Item = MetadataFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<MetadataFlag>> for CodeMetadata {
    fn from(flags: Vec<MetadataFlag>) -> Self {
        flags.into_iter().collect()
    }
}

impl From<CodeMetadata> for Vec<MetadataFlag> {
    fn from(metadata: CodeMetadata) -> Self {
        metadata.flags()
    }
}

impl fmt::Display for CodeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.flags().into_iter().map(MetadataFlag::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
