//! In-memory ABI registry.
//!
//! Holds the flat list of every fragment ever added (insertion order,
//! duplicates kept) and the selector index derived from it. Mutation takes
//! `&mut self`; callers sharing one registry across threads wrap it in a lock.

use abidecode_core::{
    abi::{Fragment, FragmentKind, FragmentLookup},
    error::RegistryError,
    selector::{derive_selector, Selector},
};
use indexmap::{map::Entry, IndexMap};
use serde_json::Value;
use tracing::{debug, warn};

use crate::entry::IndexEntry;

/// Selector → fragment(s), in first-registration order.
pub type SelectorIndex = IndexMap<Selector, IndexEntry>;

/// ABI registry owned by a single decoder.
#[derive(Debug, Clone, Default)]
pub struct AbiRegistry {
    fragments: Vec<Fragment>,
    index: SelectorIndex,
}

impl AbiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ABI given as a JSON value.
    ///
    /// # Errors
    /// `RegistryError::InvalidInput` if `abi` is not an array of fragment
    /// records. Nothing is registered in that case.
    pub fn add_abi(&mut self, abi: &Value) -> Result<usize, RegistryError> {
        let fragments = parse_abi(abi)?;
        Ok(self.add_fragments(fragments))
    }

    /// Register an ABI given as a JSON string.
    pub fn add_abi_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let value: Value = serde_json::from_str(json)?;
        self.add_abi(&value)
    }

    /// Index every named fragment (and any constructor) and append all of
    /// them to the raw list. Returns the number of fragments indexed.
    pub fn add_fragments(&mut self, fragments: impl IntoIterator<Item = Fragment>) -> usize {
        let mut indexed = 0;
        for fragment in fragments {
            if let Some(selector) = index_key(&fragment) {
                match self.index.entry(selector) {
                    Entry::Occupied(mut slot) => slot.get_mut().insert(fragment.clone()),
                    Entry::Vacant(slot) => {
                        slot.insert(IndexEntry::Single(fragment.clone()));
                    }
                }
                indexed += 1;
            }
            self.fragments.push(fragment);
        }
        debug!(indexed, total = self.index.len(), "registered ABI fragments");
        indexed
    }

    /// Remove an ABI given as a JSON value. Same input rules as [`add_abi`].
    ///
    /// [`add_abi`]: AbiRegistry::add_abi
    pub fn remove_abi(&mut self, abi: &Value) -> Result<usize, RegistryError> {
        let fragments = parse_abi(abi)?;
        Ok(self.remove_fragments(&fragments))
    }

    pub fn remove_abi_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let value: Value = serde_json::from_str(json)?;
        self.remove_abi(&value)
    }

    /// Drop the index entries matching `fragments`. Removing something that
    /// is not registered is a no-op. The raw fragment list is left untouched.
    pub fn remove_fragments(&mut self, fragments: &[Fragment]) -> usize {
        let mut removed = 0;
        for fragment in fragments {
            let Some(selector) = index_key(fragment) else {
                continue;
            };
            let Some(entry) = self.index.get_mut(&selector) else {
                continue;
            };
            let before = entry.fragments().len();
            if entry.remove(fragment.indexed_count()) {
                self.index.shift_remove(&selector);
                removed += 1;
            } else if entry.fragments().len() < before {
                removed += 1;
            }
        }
        debug!(removed, total = self.index.len(), "removed ABI fragments");
        removed
    }

    /// Every fragment ever added, in insertion order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The current selector index.
    pub fn selector_index(&self) -> &SelectorIndex {
        &self.index
    }

    pub fn get(&self, selector: &Selector) -> Option<&IndexEntry> {
        self.index.get(selector)
    }

    /// Number of selectors in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl FragmentLookup for AbiRegistry {
    fn function(&self, selector: &[u8; 4]) -> Option<&Fragment> {
        self.index.get(&Selector::Function(*selector))?.resolve(0)
    }

    fn event(&self, topic0: &[u8; 32], indexed_count: usize) -> Option<&Fragment> {
        self.index.get(&Selector::Event(*topic0))?.resolve(indexed_count)
    }

    fn constructor(&self) -> Option<&Fragment> {
        self.index.get(&Selector::Constructor)?.resolve(0)
    }
}

/// The key a fragment is indexed under, or `None` if it is not indexable.
fn index_key(fragment: &Fragment) -> Option<Selector> {
    if fragment.name.is_empty() && fragment.kind != FragmentKind::Constructor {
        return None;
    }
    match derive_selector(fragment) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(
                name = %fragment.name,
                kind = %fragment.kind,
                error = %e,
                "fragment has an unresolvable input type; not indexed"
            );
            None
        }
    }
}

fn parse_abi(abi: &Value) -> Result<Vec<Fragment>, RegistryError> {
    if !abi.is_array() {
        return Err(RegistryError::InvalidInput {
            reason: format!("expected ABI array, got {}", json_kind(abi)),
        });
    }
    serde_json::from_value(abi.clone()).map_err(|e| RegistryError::InvalidInput {
        reason: format!("invalid ABI fragment: {e}"),
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
