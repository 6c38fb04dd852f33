//! ABI fragment model: the in-memory form of a standard JSON ABI entry.
//!
//! Fields the decoder does not interpret (`constant`, `payable`, …) are kept
//! in `extra` so a registered fragment serializes back to what was supplied.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TypeParseError;
use crate::types::ParamType;

/// The `type` field of an ABI entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Solidity JSON ABIs make `function` the default when `type` is omitted.
    #[default]
    Function,
    Event,
    Constructor,
    Fallback,
    Receive,
    Error,
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FragmentKind::Function => "function",
            FragmentKind::Event => "event",
            FragmentKind::Constructor => "constructor",
            FragmentKind::Fallback => "fallback",
            FragmentKind::Receive => "receive",
            FragmentKind::Error => "error",
        };
        write!(f, "{s}")
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One input or output parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. `"uint256"`, `"tuple[]"`
    #[serde(rename = "type")]
    pub ty: String,
    /// Events only: carried in a topic rather than in `data`
    #[serde(default, skip_serializing_if = "is_false")]
    pub indexed: bool,
    /// Tuple members when the base type is `tuple`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
    #[serde(rename = "internalType", default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            indexed: false,
            components: Vec::new(),
            internal_type: None,
        }
    }

    /// Builder-style toggle for event parameters.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn with_components(mut self, components: Vec<Param>) -> Self {
        self.components = components;
        self
    }

    /// Resolve the declared type string (and components) into a `ParamType`.
    pub fn kind(&self) -> Result<ParamType, TypeParseError> {
        ParamType::resolve(&self.ty, &self.components)
    }
}

/// A single ABI entry: function, event, constructor, fallback, receive or error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "type", default)]
    pub kind: FragmentKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Not used by decoding; kept for introspection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Param>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,
    #[serde(rename = "stateMutability", default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    /// Any other fields present in the source JSON, verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Fragment {
    pub fn new(kind: FragmentKind, name: impl Into<String>, inputs: Vec<Param>) -> Self {
        Self {
            kind,
            name: name.into(),
            inputs,
            outputs: Vec::new(),
            anonymous: false,
            state_mutability: None,
            extra: IndexMap::new(),
        }
    }

    pub fn function(name: impl Into<String>, inputs: Vec<Param>) -> Self {
        Self::new(FragmentKind::Function, name, inputs)
    }

    pub fn event(name: impl Into<String>, inputs: Vec<Param>) -> Self {
        Self::new(FragmentKind::Event, name, inputs)
    }

    pub fn is_event(&self) -> bool {
        self.kind == FragmentKind::Event
    }

    /// Number of inputs carried in topics. Always 0 for non-events.
    pub fn indexed_count(&self) -> usize {
        if !self.is_event() {
            return 0;
        }
        self.inputs.iter().filter(|p| p.indexed).count()
    }

    /// Resolve every input type, in declaration order.
    pub fn input_types(&self) -> Result<Vec<ParamType>, TypeParseError> {
        self.inputs.iter().map(Param::kind).collect()
    }
}

/// Read-only view over registered fragments, keyed by selector.
/// The concrete implementation lives in `abidecode-registry`.
pub trait FragmentLookup: Send + Sync {
    /// Function (or custom error) registered under a 4-byte selector.
    fn function(&self, selector: &[u8; 4]) -> Option<&Fragment>;

    /// Event registered under `topic0`. When several indexed layouts share
    /// the hash, the one with `indexed_count` indexed inputs wins; otherwise
    /// the most recently registered layout is returned.
    fn event(&self, topic0: &[u8; 32], indexed_count: usize) -> Option<&Fragment>;

    /// The contract constructor, if one was registered.
    fn constructor(&self) -> Option<&Fragment>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_abi_entry_with_passthrough_fields() {
        let json = r#"{"inputs": [{"type": "address", "name": ""}], "constant": true,
            "name": "isInstantiation", "payable": false,
            "outputs": [{"type": "bool", "name": ""}], "type": "function"}"#;
        let frag: Fragment = serde_json::from_str(json).unwrap();
        assert_eq!(frag.kind, FragmentKind::Function);
        assert_eq!(frag.name, "isInstantiation");
        assert_eq!(frag.inputs[0].ty, "address");
        assert_eq!(frag.extra.get("constant"), Some(&serde_json::Value::Bool(true)));
        assert_eq!(frag.extra.get("payable"), Some(&serde_json::Value::Bool(false)));
    }

    #[test]
    fn type_defaults_to_function() {
        let frag: Fragment = serde_json::from_str(r#"{"name": "f", "inputs": []}"#).unwrap();
        assert_eq!(frag.kind, FragmentKind::Function);
    }

    #[test]
    fn fallback_without_inputs_or_name() {
        let frag: Fragment = serde_json::from_str(r#"{"payable": true, "type": "fallback"}"#).unwrap();
        assert_eq!(frag.kind, FragmentKind::Fallback);
        assert!(frag.name.is_empty());
        assert!(frag.inputs.is_empty());
    }

    #[test]
    fn indexed_count_ignores_non_events() {
        let ev = Fragment::event(
            "Deposit",
            vec![Param::new("sender", "address").indexed(), Param::new("value", "uint256")],
        );
        assert_eq!(ev.indexed_count(), 1);

        let mut f = Fragment::function("f", vec![Param::new("a", "uint256").indexed()]);
        assert_eq!(f.indexed_count(), 0);
        f.kind = FragmentKind::Event;
        assert_eq!(f.indexed_count(), 1);
    }
}
