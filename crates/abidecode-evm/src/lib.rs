//! # abidecode-evm
//!
//! Decodes EVM calldata and event logs against a per-instance ABI registry.
//!
//! ## Implementation notes
//! - Calldata: first 4 bytes select the function, the rest is the ABI-encoded inputs tuple
//! - Topics[0] → event signature hash (keccak256)
//! - Topics[1..] → indexed parameters (each 32 bytes, hashed for reference types)
//! - `data` → non-indexed parameters (ABI-encoded tuple)
//! - The head/tail word decoder is bounds-checked against untrusted input

pub mod batch;
pub mod call_decoder;
pub mod decoder;
mod hexdata;
pub mod log_decoder;
pub mod normalizer;
pub mod word;

pub use decoder::AbiDecoder;
pub use word::{decode_params, Token};

pub use abidecode_core::{
    BatchDecodeResult, DecodeError, DecodedCall, DecodedConstructor, DecodedLog, DecodedParam,
    DecodedValue, DecoderConfig, ErrorMode, RawLog,
};
