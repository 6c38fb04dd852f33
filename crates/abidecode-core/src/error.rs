//! Error types for the abidecode registry and decode pipeline.

use thiserror::Error;

/// A Solidity type string that could not be resolved into a [`ParamType`].
///
/// [`ParamType`]: crate::types::ParamType
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("unknown type '{0}'")]
    Unknown(String),

    #[error("invalid bit width in '{0}' (expected a multiple of 8 in 8..=256)")]
    InvalidIntWidth(String),

    #[error("invalid fixed bytes size in '{0}' (expected 1..=32)")]
    InvalidBytesSize(String),

    #[error("invalid array dimension in '{0}'")]
    InvalidArrayDimension(String),

    #[error("tuple type '{0}' has no components")]
    MissingComponents(String),
}

/// Structural problems found while walking an ABI-encoded blob.
///
/// Every offset, length and count read from the blob is untrusted; any of
/// them pointing outside the buffer surfaces as one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("buffer too short: need {needed} bytes at offset {at}, have {len}")]
    ShortBuffer { at: usize, needed: usize, len: usize },

    #[error("offset {offset} points outside a {len}-byte frame")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("length {length} exceeds the {available} bytes remaining")]
    LengthOutOfBounds { length: usize, available: usize },

    #[error("element count {count} cannot fit in the {available} bytes remaining")]
    CountOutOfBounds { count: usize, available: usize },

    #[error("word does not fit in a machine-sized integer")]
    ValueOverflow,

    #[error("nesting depth exceeds the limit of {max}")]
    DepthExceeded { max: usize },

    #[error("blob of {len} bytes exceeds the limit of {max}")]
    DataTooLarge { len: usize, max: usize },

    #[error("decoding needs more than the {budget} units of work allowed for this blob")]
    BudgetExceeded { budget: usize },
}

/// Errors that can occur while decoding a single call or log.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] EncodingError),

    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: String, reason: String },

    #[error("unsupported parameter type: {0}")]
    UnsupportedType(#[from] TypeParseError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DecodeError {
    /// Short machine-friendly label, used as a metrics attribute.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::MalformedEncoding(_) => "malformed_encoding",
            DecodeError::InvalidHex { .. } => "invalid_hex",
            DecodeError::UnsupportedType(_) => "unsupported_type",
            DecodeError::Serde(_) => "serde",
        }
    }
}

/// Errors that can occur during batch decoding.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    #[error("Decode error at index {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

/// Errors from the ABI registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
