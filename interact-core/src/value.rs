//! Typed argument values and chain addresses.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use num_bigint::BigUint;

use crate::error::AddressError;

/// Human-readable part of every account address on the chain.
pub const ADDRESS_HRP: &str = "erd";

/// Length in bytes of an account id.
pub const ADDRESS_LEN: usize = 32;

/// A 32-byte account id, shown to users in bech32 form (`erd1…`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// The all-zero address deployments are sent to.
    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn from_bech32(text: &str) -> Result<Self, AddressError> {
        let (hrp, data, variant) = bech32::decode(text)?;
        if hrp != ADDRESS_HRP {
            return Err(AddressError::Hrp {
                expected: ADDRESS_HRP,
                found: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::Variant);
        }
        let bytes = Vec::<u8>::from_base32(&data)?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::Length(bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn to_bech32(&self) -> String {
        bech32::encode(ADDRESS_HRP, self.0.to_base32(), Variant::Bech32)
            .unwrap_or_default()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

/// Declared width of an unsigned integer argument.
///
/// The width belongs to the contract's parameter type, never to the value:
/// a `u32` holding 5 and a `u64` holding 5 encode differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U32,
    U64,
    /// Arbitrary precision (`BigUint` on the contract side).
    Big,
}

impl UintWidth {
    /// Fixed byte width, or `None` for arbitrary precision.
    pub fn byte_len(self) -> Option<usize> {
        match self {
            UintWidth::U8 => Some(1),
            UintWidth::U32 => Some(4),
            UintWidth::U64 => Some(8),
            UintWidth::Big => None,
        }
    }

    pub fn fits(self, value: &BigUint) -> bool {
        match self.byte_len() {
            Some(len) => value.bits() <= (len as u64) * 8,
            None => true,
        }
    }
}

impl fmt::Display for UintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UintWidth::U8 => "u8",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::Big => "biguint",
        };
        f.write_str(name)
    }
}

/// A value tagged with the exact on-chain type it must be encoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Str(String),
    UnsignedInt { width: UintWidth, value: BigUint },
    Bool(bool),
    /// Bech32 text; decoded (and validated) by the codec.
    Address(String),
    Option(Option<Box<TypedValue>>),
    Tuple(Vec<TypedValue>),
    List(Vec<TypedValue>),
}

impl TypedValue {
    pub fn str(s: impl Into<String>) -> Self {
        TypedValue::Str(s.into())
    }

    pub fn u8(v: u8) -> Self {
        Self::uint(UintWidth::U8, v)
    }

    pub fn u32(v: u32) -> Self {
        Self::uint(UintWidth::U32, v)
    }

    pub fn u64(v: u64) -> Self {
        Self::uint(UintWidth::U64, v)
    }

    pub fn biguint(v: impl Into<BigUint>) -> Self {
        Self::uint(UintWidth::Big, v)
    }

    /// An unsigned integer of an explicit width. The value is not checked
    /// against the width here; the codec rejects values that do not fit.
    pub fn uint(width: UintWidth, value: impl Into<BigUint>) -> Self {
        TypedValue::UnsignedInt {
            width,
            value: value.into(),
        }
    }

    pub fn address(text: impl Into<String>) -> Self {
        TypedValue::Address(text.into())
    }

    pub fn none() -> Self {
        TypedValue::Option(None)
    }

    pub fn some(inner: TypedValue) -> Self {
        TypedValue::Option(Some(Box::new(inner)))
    }

    /// The full type of this value, including what its containers hold.
    ///
    /// A list's element shape is the unification of its items; an absent
    /// option and an empty list leave their inner shape open.
    pub fn shape(&self) -> ValueShape {
        match self {
            TypedValue::Str(_) => ValueShape::Str,
            TypedValue::UnsignedInt { width, .. } => ValueShape::UnsignedInt(*width),
            TypedValue::Bool(_) => ValueShape::Bool,
            TypedValue::Address(_) => ValueShape::Address,
            TypedValue::Option(inner) => {
                ValueShape::Option(inner.as_ref().map(|v| Box::new(v.shape())))
            }
            TypedValue::Tuple(items) => ValueShape::Tuple(items.iter().map(TypedValue::shape).collect()),
            TypedValue::List(items) => {
                let mut element: Option<ValueShape> = None;
                for item in items {
                    let shape = item.shape();
                    element = match element {
                        None => Some(shape),
                        // A mismatch here is reported when the inner list is encoded.
                        Some(known) => Some(known.unify(&shape).unwrap_or(known)),
                    };
                }
                ValueShape::List(element.map(Box::new))
            }
        }
    }
}

impl From<Address> for TypedValue {
    fn from(address: Address) -> Self {
        TypedValue::Address(address.to_bech32())
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Str(s) => write!(f, "\"{}\"", s),
            TypedValue::UnsignedInt { width, value } => write!(f, "{}{}", value, width),
            TypedValue::Bool(b) => write!(f, "{}", b),
            TypedValue::Address(a) => write!(f, "{}", a),
            TypedValue::Option(None) => write!(f, "None"),
            TypedValue::Option(Some(inner)) => write!(f, "Some({})", inner),
            TypedValue::Tuple(items) => {
                let strs: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", strs.join(", "))
            }
            TypedValue::List(items) => {
                let strs: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", strs.join(", "))
            }
        }
    }
}

/// Recursive type of a `TypedValue`, used to check that list elements are
/// homogeneous. `None` inside `Option` or `List` is an unknown inner shape
/// (an absent option, an empty list) and is compatible with any shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape {
    Str,
    UnsignedInt(UintWidth),
    Bool,
    Address,
    Option(Option<Box<ValueShape>>),
    Tuple(Vec<ValueShape>),
    List(Option<Box<ValueShape>>),
}

impl ValueShape {
    /// The most specific shape compatible with both, or `None` when they
    /// disagree anywhere.
    pub fn unify(&self, other: &ValueShape) -> Option<ValueShape> {
        match (self, other) {
            (ValueShape::Option(a), ValueShape::Option(b)) => {
                Some(ValueShape::Option(unify_open(a, b)?))
            }
            (ValueShape::List(a), ValueShape::List(b)) => Some(ValueShape::List(unify_open(a, b)?)),
            (ValueShape::Tuple(a), ValueShape::Tuple(b)) => {
                if a.len() != b.len() {
                    return None;
                }
                let fields = a
                    .iter()
                    .zip(b)
                    .map(|(x, y)| x.unify(y))
                    .collect::<Option<Vec<_>>>()?;
                Some(ValueShape::Tuple(fields))
            }
            (a, b) if a == b => Some(a.clone()),
            _ => None,
        }
    }
}

fn unify_open(
    a: &Option<Box<ValueShape>>,
    b: &Option<Box<ValueShape>>,
) -> Option<Option<Box<ValueShape>>> {
    match (a, b) {
        (None, other) | (other, None) => Some(other.clone()),
        (Some(x), Some(y)) => Some(Some(Box::new(x.unify(y)?))),
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Str => f.write_str("string"),
            ValueShape::UnsignedInt(width) => write!(f, "{}", width),
            ValueShape::Bool => f.write_str("bool"),
            ValueShape::Address => f.write_str("address"),
            ValueShape::Option(Some(inner)) => write!(f, "Option<{}>", inner),
            ValueShape::Option(None) => f.write_str("Option<_>"),
            ValueShape::List(Some(inner)) => write!(f, "List<{}>", inner),
            ValueShape::List(None) => f.write_str("List<_>"),
            ValueShape::Tuple(fields) => {
                let strs: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
                write!(f, "({})", strs.join(", "))
            }
        }
    }
}

/// Location of a nested value: element indices from the root down.
/// Option payloads count as index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath(Vec<usize>);

impl ValuePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for i in &self.0 {
            write!(f, "[{}]", i)?;
        }
        Ok(())
    }
}
