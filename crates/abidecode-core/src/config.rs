//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Resource bounds applied while walking untrusted ABI-encoded data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum nesting of arrays/tuples followed during one decode
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Largest data blob (in bytes) the word decoder will accept
    #[serde(default = "default_max_data_len")]
    pub max_data_len: usize,
    /// Decode work allowed per 32-byte word of input. Offsets that point at
    /// the same tail are followed again each time, and this caps the total.
    #[serde(default = "default_work_factor")]
    pub work_factor: usize,
}

fn default_max_depth() -> usize { 32 }
fn default_max_data_len() -> usize { 4 * 1024 * 1024 }
fn default_work_factor() -> usize { 4 }

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_data_len: default_max_data_len(),
            work_factor: default_work_factor(),
        }
    }
}

/// Top-level configuration for an `AbiDecoder`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub limits: DecodeLimits,
}

impl DecoderConfig {
    /// Parse a config document, e.g. `{"limits": {"max_depth": 16}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
