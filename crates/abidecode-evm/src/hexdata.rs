//! Hex input parsing for calldata, log data and topics.

use abidecode_core::{error::DecodeError, types::WORD};

/// Decode a hex string, with or without a `0x` prefix. `"0x"` and `""` are
/// empty input.
pub(crate) fn decode(field: &str, input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| DecodeError::InvalidHex {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a 32-byte topic.
pub(crate) fn decode_word(field: &str, input: &str) -> Result<[u8; WORD], DecodeError> {
    let bytes = decode(field, input)?;
    <[u8; WORD]>::try_from(bytes.as_slice()).map_err(|_| DecodeError::InvalidHex {
        field: field.to_string(),
        reason: format!("expected {WORD} bytes, got {}", bytes.len()),
    })
}
