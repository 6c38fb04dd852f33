//! # abidecode-core
//!
//! The ABI model, canonical type strings, selector derivation and the value
//! types shared by the abidecode registry and decoders.

pub mod abi;
pub mod call;
pub mod canonical;
pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod selector;
pub mod types;

pub use abi::{Fragment, FragmentKind, FragmentLookup, Param};
pub use call::{DecodedCall, DecodedConstructor, DecodedParam};
pub use config::{DecodeLimits, DecoderConfig};
pub use decoder::{BatchDecodeResult, ErrorMode};
pub use error::{BatchDecodeError, DecodeError, EncodingError, RegistryError, TypeParseError};
pub use event::{DecodedLog, RawLog};
pub use selector::{derive_selector, keccak256, Selector};
pub use types::{DecodedValue, ParamType};
