//! Hostile calldata and logs must produce errors, never panics.

use abidecode_core::{
    config::{DecodeLimits, DecoderConfig},
    decoder::ErrorMode,
    error::{DecodeError, EncodingError},
    event::RawLog,
    types::ParamType,
};
use abidecode_evm::{decode_params, AbiDecoder, Token};

const ABI: &str = r#"[
    {"type": "function", "name": "store", "inputs": [
        {"name": "blob", "type": "bytes"},
        {"name": "names", "type": "string[]"},
        {"name": "grid", "type": "uint256[][]"}
    ]},
    {"type": "event", "name": "Stored", "inputs": [
        {"name": "who", "type": "address", "indexed": true},
        {"name": "blob", "type": "bytes", "indexed": false}
    ]}
]"#;

fn selector() -> String {
    let hash = abidecode_core::keccak256(b"store(bytes,string[],uint256[][])");
    hex::encode(&hash[..4])
}

fn word(v: u64) -> String {
    format!("{v:064x}")
}

fn decoder() -> AbiDecoder {
    let mut dec = AbiDecoder::new();
    dec.add_abi_json(ABI).unwrap();
    dec
}

fn call(words: &[String]) -> String {
    format!("0x{}{}", selector(), words.concat())
}

fn malformed(err: DecodeError) -> EncodingError {
    match err {
        DecodeError::MalformedEncoding(e) => e,
        other => panic!("expected malformed encoding, got {other:?}"),
    }
}

/// store(0x01, [], [])
fn valid_words() -> Vec<String> {
    let mut blob = "01".to_string();
    blob.push_str(&"00".repeat(31));
    vec![
        word(0x60),
        word(0xa0),
        word(0xc0),
        word(1),
        blob,
        word(0),
        word(0),
    ]
}

#[test]
fn valid_call_decodes() {
    let call = decoder().decode_method(&call(&valid_words())).unwrap().unwrap();
    assert_eq!(call.param("blob").and_then(|v| v.as_bytes()), Some(&[1u8][..]));
    assert_eq!(call.param("names").and_then(|v| v.as_array()).map(|a| a.len()), Some(0));
}

#[test]
fn offset_beyond_buffer() {
    let mut words = valid_words();
    words[0] = word(0xffff);
    let err = malformed(decoder().decode_method(&call(&words)).unwrap_err());
    assert!(matches!(err, EncodingError::OffsetOutOfBounds { offset: 0xffff, .. }));
}

#[test]
fn offset_wider_than_usize() {
    let mut words = valid_words();
    words[1] = "ff".repeat(32);
    let err = malformed(decoder().decode_method(&call(&words)).unwrap_err());
    assert_eq!(err, EncodingError::ValueOverflow);
}

#[test]
fn length_beyond_buffer() {
    let mut words = valid_words();
    words[3] = word(10_000);
    let err = malformed(decoder().decode_method(&call(&words)).unwrap_err());
    assert!(matches!(err, EncodingError::LengthOutOfBounds { length: 10_000, .. }));
}

#[test]
fn count_beyond_buffer() {
    let mut words = valid_words();
    words[5] = word(1 << 40);
    let err = malformed(decoder().decode_method(&call(&words)).unwrap_err());
    assert!(matches!(err, EncodingError::CountOutOfBounds { .. }));
}

#[test]
fn depth_limit_from_config() {
    let cfg = DecoderConfig::from_json(r#"{"limits": {"max_depth": 1}}"#).unwrap();
    let mut dec = AbiDecoder::with_config(cfg);
    dec.add_abi_json(ABI).unwrap();
    // grid = [[]] needs two levels of nesting
    let mut words = valid_words();
    words[6] = word(1);
    words.push(word(0x20));
    words.push(word(0));
    let err = malformed(dec.decode_method(&call(&words)).unwrap_err());
    assert_eq!(err, EncodingError::DepthExceeded { max: 1 });

    assert!(decoder().decode_method(&call(&words)).unwrap().is_some());
}

#[test]
fn scrambled_calldata_never_panics() {
    let dec = decoder();
    let base = valid_words().concat();
    let mut bytes = hex::decode(&base).unwrap();
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    for _ in 0..2_000 {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let idx = (state as usize) % bytes.len();
        bytes[idx] = (state >> 32) as u8;
        let truncated = &bytes[..(state as usize >> 8) % (bytes.len() + 1)];
        for data in [&bytes[..], truncated] {
            let hex_call = format!("0x{}{}", selector(), hex::encode(data));
            let _ = dec.decode_method(&hex_call);
        }
    }
}

#[test]
fn malformed_logs_in_a_batch() {
    let dec = decoder();
    let topic0 = format!(
        "0x{}",
        hex::encode(abidecode_core::keccak256(b"Stored(address,bytes)"))
    );
    let who = format!("0x{}", word(0xbeef));
    let topics = vec![topic0, who];
    let good = RawLog::new("0x01", topics.clone(), format!("0x{}{}", word(0x20), word(0)));
    let bad_offset = RawLog::new("0x02", topics.clone(), format!("0x{}", word(0x40)));
    let bad_hex = RawLog::new("0x03", topics, "0xnothex");

    let res = dec
        .decode_logs(&[good, bad_offset, bad_hex], ErrorMode::Collect)
        .unwrap();
    assert_eq!(res.logs.len(), 1);
    assert_eq!(
        res.logs[0].field("who").and_then(|v| v.as_address()),
        Some("0x000000000000000000000000000000000000beef")
    );
    let indices: Vec<usize> = res.errors.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, [1, 2]);
    assert_eq!(res.errors[0].1.kind(), "malformed_encoding");
    assert_eq!(res.errors[1].1.kind(), "invalid_hex");
}

/// `uint256[]` nested `levels` deep where every array has two elements and
/// both element offsets point at the same child.
fn aliased_nesting(levels: usize) -> (ParamType, Vec<u8>) {
    let mut ty = ParamType::Uint(256);
    for _ in 0..levels {
        ty = ParamType::Array(Box::new(ty));
    }
    let mut words = vec![word(0x20)];
    for _ in 1..levels {
        words.extend([word(2), word(0x40), word(0x40)]);
    }
    words.extend([word(2), word(7), word(7)]);
    (ty, hex::decode(words.concat()).unwrap())
}

fn count_leaves(token: &Token) -> usize {
    match token {
        Token::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

#[test]
fn shared_tails_decode_while_shallow() {
    let (ty, data) = aliased_nesting(2);
    let tokens = decode_params(&data, &[ty], &DecodeLimits::default()).unwrap();
    assert_eq!(count_leaves(&tokens[0]), 4);
}

#[test]
fn shared_tails_cannot_expand_exponentially() {
    let (ty, data) = aliased_nesting(20);
    assert_eq!(data.len(), 1952);
    let started = std::time::Instant::now();
    let err = decode_params(&data, &[ty], &DecodeLimits::default()).unwrap_err();
    assert!(matches!(err, EncodingError::BudgetExceeded { .. }));
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}

#[test]
fn shared_tails_in_a_log_are_collected_as_errors() {
    let cells = format!("uint256{}", "[]".repeat(30));
    let mut dec = AbiDecoder::new();
    dec.add_abi(&serde_json::json!([{"type": "event", "name": "Grid", "inputs": [
        {"name": "cells", "type": cells, "indexed": false}
    ]}]))
    .unwrap();
    let signature = format!("Grid({cells})");
    let topic0 = format!("0x{}", hex::encode(abidecode_core::keccak256(signature.as_bytes())));
    let (_, data) = aliased_nesting(30);
    let log = RawLog::new("0x01", vec![topic0], format!("0x{}", hex::encode(data)));

    let res = dec.decode_logs(&[log], ErrorMode::Collect).unwrap();
    assert!(res.logs.is_empty());
    assert_eq!(res.errors.len(), 1);
    assert!(matches!(
        &res.errors[0].1,
        DecodeError::MalformedEncoding(EncodingError::BudgetExceeded { .. })
    ));
}
