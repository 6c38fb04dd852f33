//! Output types for decoded function calls and constructor arguments.

use serde::Serialize;

use crate::types::DecodedValue;

/// One decoded parameter: `{name, type, value}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedParam {
    pub name: String,
    /// Type string as declared in the ABI, e.g. `"address[]"` or `"tuple"`
    #[serde(rename = "type")]
    pub ty: String,
    pub value: DecodedValue,
}

/// Result of decoding a function call's calldata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedCall {
    /// Function name (e.g. "transfer")
    pub name: String,
    /// First 4 bytes of calldata
    #[serde(serialize_with = "serialize_selector")]
    pub selector: [u8; 4],
    /// Decoded inputs in declaration order
    pub params: Vec<DecodedParam>,
}

fn serialize_selector<S: serde::Serializer>(sel: &[u8; 4], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(sel)))
}

impl DecodedCall {
    /// Selector as a hex string ("0xaabbccdd")
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }

    /// Look up a decoded input by name
    pub fn param(&self, name: &str) -> Option<&DecodedValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// Result of decoding constructor arguments (no selector prefix).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedConstructor {
    pub params: Vec<DecodedParam>,
}

impl DecodedConstructor {
    pub fn param(&self, name: &str) -> Option<&DecodedValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}
