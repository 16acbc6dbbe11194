//! Argument codec: `TypedValue` → contract call argument bytes.
//!
//! Each argument is encoded on its own; framing between arguments (the `@`
//! separators of a transaction data field, or the list of a VM query) is
//! left to the surrounding transport.
//!
//! | value                  | encoding                                   |
//! |------------------------|--------------------------------------------|
//! | string                 | UTF-8 bytes, no length prefix              |
//! | u8 / u32 / u64         | big-endian, exactly 1 / 4 / 8 bytes        |
//! | biguint                | minimal big-endian, `00` for zero          |
//! | bool                   | `00` / `01`                                |
//! | address                | 32 raw bytes decoded from bech32           |
//! | option (absent)        | nothing                                    |
//! | option (present)       | `01` then the inner encoding               |
//! | tuple / list           | item encodings concatenated, no separators |

use std::fmt;

use crate::error::EncodingError;
use crate::value::{Address, TypedValue, ValuePath, ValueShape};

/// Marker byte written in front of a present option payload.
pub const OPTION_SOME_MARKER: u8 = 0x01;

/// The encoded form of one argument.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedArgument(Vec<u8>);

impl EncodedArgument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for EncodedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedArgument(0x{})", self.to_hex())
    }
}

impl AsRef<[u8]> for EncodedArgument {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode a single argument.
pub fn encode(value: &TypedValue) -> Result<EncodedArgument, EncodingError> {
    let mut out = Vec::new();
    encode_into(&mut out, value, &ValuePath::root())?;
    Ok(EncodedArgument(out))
}

/// Encode a sequence of arguments in order, stopping at the first failure.
/// The error carries the failing argument's index.
pub fn encode_all(values: &[TypedValue]) -> Result<Vec<EncodedArgument>, (usize, EncodingError)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| encode(v).map_err(|e| (i, e)))
        .collect()
}

fn encode_into(out: &mut Vec<u8>, value: &TypedValue, path: &ValuePath) -> Result<(), EncodingError> {
    match value {
        TypedValue::Str(s) => out.extend_from_slice(s.as_bytes()),
        TypedValue::UnsignedInt { width, value } => {
            if !width.fits(value) {
                return Err(EncodingError::Range {
                    position: path.clone(),
                    width: *width,
                    value: value.clone(),
                });
            }
            // `to_bytes_be` yields `[0]` for zero, which is the arbitrary-width form.
            let bytes = value.to_bytes_be();
            if let Some(len) = width.byte_len() {
                out.resize(out.len() + len - bytes.len(), 0);
            }
            out.extend_from_slice(&bytes);
        }
        TypedValue::Bool(b) => out.push(u8::from(*b)),
        TypedValue::Address(text) => {
            let address = Address::from_bech32(text).map_err(|source| EncodingError::AddressFormat {
                position: path.clone(),
                text: text.clone(),
                source,
            })?;
            out.extend_from_slice(address.as_bytes());
        }
        TypedValue::Option(None) => {}
        TypedValue::Option(Some(inner)) => {
            out.push(OPTION_SOME_MARKER);
            encode_into(out, inner, &path.child(0))?;
        }
        TypedValue::Tuple(items) => {
            for (i, item) in items.iter().enumerate() {
                encode_into(out, item, &path.child(i))?;
            }
        }
        TypedValue::List(items) => {
            check_homogeneous(items, path)?;
            for (i, item) in items.iter().enumerate() {
                encode_into(out, item, &path.child(i))?;
            }
        }
    }
    Ok(())
}

/// Every list item must have the same full shape, nested option payloads,
/// tuple fields and list elements included.
fn check_homogeneous(items: &[TypedValue], path: &ValuePath) -> Result<(), EncodingError> {
    let mut expected: Option<ValueShape> = None;
    for (i, item) in items.iter().enumerate() {
        let found = item.shape();
        expected = match expected {
            None => Some(found),
            Some(known) => match known.unify(&found) {
                Some(merged) => Some(merged),
                None => {
                    return Err(EncodingError::TypeMismatch {
                        position: path.child(i),
                        expected: known,
                        found,
                    })
                }
            },
        };
    }
    Ok(())
}
