//! Converts raw word-decoder `Token`s → abidecode `DecodedValue`s.
//!
//! Integers of every width become base-10 strings (negative values keep
//! their sign), addresses become lower-case `0x` hex, and unnamed tuple
//! members are keyed by position.

use abidecode_core::types::DecodedValue;
use alloy_primitives::Address;
use indexmap::IndexMap;

use crate::word::Token;

/// Convert a decoded `Token` into a `DecodedValue`.
pub fn normalize(token: Token) -> DecodedValue {
    match token {
        Token::Uint(u) => DecodedValue::Int(u.to_string()),
        Token::Int(i) => DecodedValue::Int(i.to_string()),
        Token::Address(a) => DecodedValue::Address(address_hex(&a)),
        Token::Bool(b) => DecodedValue::Bool(b),
        Token::FixedBytes(b) | Token::Bytes(b) => DecodedValue::Bytes(b),
        Token::String(s) => DecodedValue::Str(s),
        Token::Array(items) => DecodedValue::Array(items.into_iter().map(normalize).collect()),
        Token::Tuple(members) => {
            let mut fields = IndexMap::with_capacity(members.len());
            for (i, (name, tok)) in members.into_iter().enumerate() {
                let key = if name.is_empty() { i.to_string() } else { name };
                fields.insert(key, normalize(tok));
            }
            DecodedValue::Tuple(fields)
        }
    }
}

/// `0x` + 40 lower-case hex digits.
pub fn address_hex(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr.as_slice()))
}
