//! Parameter types and decoded values.
//!
//! `ParamType` is the resolved form of a Solidity type string (plus tuple
//! components). Its `Display` impl is the canonical form used in signature
//! hashing, so `uint` renders as `uint256` and tuples render as `(a,b)`.
//!
//! `DecodedValue` is what consumers see after decoding: integers as decimal
//! strings, addresses as lower-case hex, everything else structurally.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::abi::Param;
use crate::error::TypeParseError;

/// Size of one ABI word in bytes.
pub const WORD: usize = 32;

/// A resolved Solidity ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Unsigned integer. Width in bits.
    Uint(usize),
    /// Signed integer. Width in bits.
    Int(usize),
    /// 20-byte account address
    Address,
    Bool,
    /// `bytes1` .. `bytes32`. Length in bytes.
    FixedBytes(usize),
    /// Variable-length byte string
    Bytes,
    /// UTF-8 string
    String,
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[N]`
    FixedArray(Box<ParamType>, usize),
    /// Tuple / struct; member names are kept for the decoded output.
    Tuple(Vec<(String, ParamType)>),
}

impl ParamType {
    /// Resolve a type string such as `"uint256[]"` or `"tuple[2]"` into a
    /// `ParamType`. `components` supplies the members when the base is `tuple`.
    pub fn resolve(ty: &str, components: &[Param]) -> Result<Self, TypeParseError> {
        let ty = ty.trim();

        if let Some(stripped) = ty.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| TypeParseError::InvalidArrayDimension(ty.to_string()))?;
            let elem = Self::resolve(&stripped[..open], components)?;
            let dim = &stripped[open + 1..];
            if dim.is_empty() {
                return Ok(ParamType::Array(Box::new(elem)));
            }
            let len = parse_digits(dim)
                .ok_or_else(|| TypeParseError::InvalidArrayDimension(ty.to_string()))?;
            return Ok(ParamType::FixedArray(Box::new(elem), len));
        }

        match ty {
            "address" => Ok(ParamType::Address),
            "bool" => Ok(ParamType::Bool),
            "string" => Ok(ParamType::String),
            "bytes" => Ok(ParamType::Bytes),
            "uint" => Ok(ParamType::Uint(256)),
            "int" => Ok(ParamType::Int(256)),
            "byte" => Ok(ParamType::FixedBytes(1)),
            "tuple" => {
                if components.is_empty() {
                    return Err(TypeParseError::MissingComponents(ty.to_string()));
                }
                let members = components
                    .iter()
                    .map(|c| Ok((c.name.clone(), c.kind()?)))
                    .collect::<Result<Vec<_>, TypeParseError>>()?;
                Ok(ParamType::Tuple(members))
            }
            _ => {
                if let Some(bits) = ty.strip_prefix("uint") {
                    int_width(ty, bits).map(ParamType::Uint)
                } else if let Some(bits) = ty.strip_prefix("int") {
                    int_width(ty, bits).map(ParamType::Int)
                } else if let Some(size) = ty.strip_prefix("bytes") {
                    match parse_digits(size) {
                        Some(n) if (1..=32).contains(&n) => Ok(ParamType::FixedBytes(n)),
                        _ => Err(TypeParseError::InvalidBytesSize(ty.to_string())),
                    }
                } else {
                    Err(TypeParseError::Unknown(ty.to_string()))
                }
            }
        }
    }

    /// Whether this type is encoded through an offset into the tail region.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(elem, _) => elem.is_dynamic(),
            ParamType::Tuple(members) => members.iter().any(|(_, t)| t.is_dynamic()),
            _ => false,
        }
    }

    /// Number of bytes this type occupies in its enclosing head region.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD;
        }
        match self {
            ParamType::FixedArray(elem, len) => elem.head_size().saturating_mul(*len),
            ParamType::Tuple(members) => members
                .iter()
                .fold(0usize, |acc, (_, t)| acc.saturating_add(t.head_size())),
            _ => WORD,
        }
    }

    /// Whether values of this type render as decimal strings.
    pub fn is_integer(&self) -> bool {
        matches!(self, ParamType::Uint(_) | ParamType::Int(_))
    }
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn int_width(ty: &str, bits: &str) -> Result<usize, TypeParseError> {
    match parse_digits(bits) {
        Some(b) if b % 8 == 0 && (8..=256).contains(&b) => Ok(b),
        _ => Err(TypeParseError::InvalidIntWidth(ty.to_string())),
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::FixedBytes(n) => write!(f, "bytes{n}"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::String => write!(f, "string"),
            ParamType::Array(elem) => write!(f, "{elem}[]"),
            ParamType::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            ParamType::Tuple(members) => {
                f.write_str("(")?;
                for (i, (_, t)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A decoded, normalized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// Any `intN`/`uintN`, rendered base-10 with a leading `-` when negative
    Int(String),
    /// `0x` + 40 lower-case hex digits
    Address(String),
    Bool(bool),
    /// Fixed or dynamic bytes; also the raw topic of a hashed indexed parameter
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<DecodedValue>),
    /// Tuple members in declaration order. Unnamed members use their position.
    Tuple(IndexMap<String, DecodedValue>),
}

impl DecodedValue {
    /// The decimal string of an integer value.
    pub fn as_int(&self) -> Option<&str> {
        match self {
            DecodedValue::Int(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            DecodedValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Look up a tuple member by name.
    pub fn member(&self, name: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Tuple(fields) => fields.get(name),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Int(v) => write!(f, "{v}"),
            DecodedValue::Address(a) => write!(f, "{a}"),
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            DecodedValue::Str(s) => write!(f, "{s}"),
            DecodedValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// Plain JSON: strings, bools, arrays and objects, with bytes as `0x` hex.
impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Int(s) | DecodedValue::Address(s) | DecodedValue::Str(s) => {
                serializer.serialize_str(s)
            }
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Bytes(b) => serializer.serialize_str(&format!("0x{}", hex::encode(b))),
            DecodedValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Tuple(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
