//! Selector derivation.
//!
//! Functions, fallbacks and custom errors are addressed by the first 4 bytes
//! of `keccak256(signature)`; events by the full 32-byte hash (their
//! `topics[0]`). A contract has at most one constructor, so it gets a fixed
//! reserved key instead of a hash.

use serde::{Serialize, Serializer};
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

use crate::abi::{Fragment, FragmentKind};
use crate::canonical;
use crate::error::TypeParseError;

/// keccak256 of arbitrary bytes.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(bytes);
    hasher.finalize(&mut output);
    output
}

/// Key under which a fragment is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selector {
    Function([u8; 4]),
    Event([u8; 32]),
    Constructor,
}

impl Selector {
    /// `0x`-prefixed lower-case hex; `"constructor"` for the reserved key.
    pub fn as_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Function(s) => write!(f, "0x{}", hex::encode(s)),
            Selector::Event(h) => write!(f, "0x{}", hex::encode(h)),
            Selector::Constructor => write!(f, "constructor"),
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derive the selector a fragment is registered under.
pub fn derive_selector(fragment: &Fragment) -> Result<Selector, TypeParseError> {
    if fragment.kind == FragmentKind::Constructor {
        return Ok(Selector::Constructor);
    }
    let hash = keccak256(canonical::signature(fragment)?.as_bytes());
    match fragment.kind {
        FragmentKind::Event => Ok(Selector::Event(hash)),
        _ => {
            let mut sel = [0u8; 4];
            sel.copy_from_slice(&hash[..4]);
            Ok(Selector::Function(sel))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::Param;

    fn erc20_transfer_event() -> Fragment {
        Fragment::event(
            "Transfer",
            vec![
                Param::new("from", "address").indexed(),
                Param::new("to", "address").indexed(),
                Param::new("value", "uint256"),
            ],
        )
    }

    #[test]
    fn erc20_transfer_topic() {
        let sel = derive_selector(&erc20_transfer_event()).unwrap();
        assert_eq!(
            sel.as_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn transfer_function_selector() {
        let f = Fragment::function(
            "transfer",
            vec![Param::new("to", "address"), Param::new("amount", "uint256")],
        );
        assert_eq!(derive_selector(&f).unwrap(), Selector::Function([0xa9, 0x05, 0x9c, 0xbb]));
    }

    #[test]
    fn constructor_uses_reserved_key() {
        let mut c = Fragment::new(FragmentKind::Constructor, "", vec![Param::new("a", "uint256")]);
        assert_eq!(derive_selector(&c).unwrap(), Selector::Constructor);
        c.name = "Whatever".into();
        assert_eq!(derive_selector(&c).unwrap().to_string(), "constructor");
    }

    #[test]
    fn derivation_is_stable() {
        let ev = erc20_transfer_event();
        assert_eq!(derive_selector(&ev).unwrap(), derive_selector(&ev.clone()).unwrap());
    }

    #[test]
    fn matches_alloy_json_abi() {
        let json = r#"[
            {"type": "function", "name": "swap", "inputs": [
                {"name": "params", "type": "tuple", "components": [
                    {"name": "path", "type": "bytes"},
                    {"name": "recipient", "type": "address"},
                    {"name": "amounts", "type": "uint256[2]"}
                ]},
                {"name": "deadline", "type": "uint256"}
            ], "outputs": [], "stateMutability": "payable"},
            {"type": "event", "name": "Swap", "anonymous": false, "inputs": [
                {"name": "sender", "type": "address", "indexed": true},
                {"name": "amount0", "type": "int256", "indexed": false},
                {"name": "tick", "type": "int24", "indexed": false}
            ]}
        ]"#;
        let ours: Vec<Fragment> = serde_json::from_str(json).unwrap();
        let theirs: alloy_json_abi::JsonAbi = serde_json::from_str(json).unwrap();

        let func = theirs.functions().next().unwrap();
        assert_eq!(derive_selector(&ours[0]).unwrap(), Selector::Function(func.selector().0));

        let event = theirs.events().next().unwrap();
        assert_eq!(derive_selector(&ours[1]).unwrap(), Selector::Event(event.selector().0));
    }
}
