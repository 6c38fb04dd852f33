//! Raw and decoded log types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::call::DecodedParam;
use crate::types::DecodedValue;

/// A raw log entry as returned by `eth_getLogs` or a receipt.
///
/// Only `topics`, `data` and `address` are interpreted. Every other field
/// (`blockNumber`, `transactionHash`, …) is carried through to the decoded
/// output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLog {
    /// `topics[0]` is the event selector; `topics[1..]` carry indexed params
    #[serde(default)]
    pub topics: Vec<String>,
    /// `0x`-prefixed ABI-encoded non-indexed params
    #[serde(default)]
    pub data: String,
    /// Emitting contract, passed through verbatim
    #[serde(default)]
    pub address: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl RawLog {
    pub fn new(address: impl Into<String>, topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            topics,
            data: data.into(),
            address: address.into(),
            extra: IndexMap::new(),
        }
    }

    /// The event selector, if present.
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}

/// A decoded log: `{name, events, address, ...passthrough}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedLog {
    /// Event name, e.g. "Deposit"
    pub name: String,
    /// Inputs in declaration order, indexed and non-indexed interleaved
    pub events: Vec<DecodedParam>,
    pub address: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl DecodedLog {
    /// Get a decoded input by name.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        self.events.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}
