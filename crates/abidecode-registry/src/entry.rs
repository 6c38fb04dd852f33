//! Selector index entries.
//!
//! Most selectors map to exactly one fragment. Events are the exception: the
//! indexed flag is not part of the signature, so ERC-20
//! `Transfer(address indexed,address indexed,uint256)` and ERC-721
//! `Transfer(address indexed,address indexed,uint256 indexed)` hash to the
//! same topic. Those are stored side by side, keyed by indexed-input count,
//! and the log decoder picks one from the number of topics it observes.

use abidecode_core::abi::Fragment;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a selector resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndexEntry {
    /// One fragment owns this selector.
    Single(Fragment),
    /// Events sharing a signature hash but differing in indexed layout.
    Layouts {
        /// indexed-input count → fragment
        variants: BTreeMap<usize, Fragment>,
        /// Indexed counts in registration order, most recent last. Used when
        /// no layout matches a log.
        order: Vec<usize>,
    },
}

impl IndexEntry {
    /// Insert or overwrite. A second event layout under the same selector
    /// promotes a `Single` entry to `Layouts`; everything else is last write wins.
    pub(crate) fn insert(&mut self, fragment: Fragment) {
        let count = fragment.indexed_count();
        match self {
            IndexEntry::Layouts { variants, order } => {
                variants.insert(count, fragment);
                order.retain(|c| *c != count);
                order.push(count);
            }
            IndexEntry::Single(existing) => {
                if fragment.is_event() && existing.is_event() && existing.indexed_count() != count {
                    let prev = existing.clone();
                    let order = vec![prev.indexed_count(), count];
                    let mut variants = BTreeMap::new();
                    variants.insert(prev.indexed_count(), prev);
                    variants.insert(count, fragment);
                    *self = IndexEntry::Layouts { variants, order };
                } else {
                    *existing = fragment;
                }
            }
        }
    }

    /// Remove the layout with `indexed_count` indexed inputs.
    /// Returns `true` when the whole entry should be dropped from the index.
    pub(crate) fn remove(&mut self, indexed_count: usize) -> bool {
        match self {
            IndexEntry::Single(f) => f.indexed_count() == indexed_count,
            IndexEntry::Layouts { variants, order } => {
                if variants.remove(&indexed_count).is_none() {
                    return false;
                }
                order.retain(|c| *c != indexed_count);
                if variants.len() > 1 {
                    return false;
                }
                match std::mem::take(variants).into_values().next() {
                    Some(only) => {
                        *self = IndexEntry::Single(only);
                        false
                    }
                    None => true,
                }
            }
        }
    }

    /// Pick the fragment for a log carrying `indexed_count` indexed topics.
    pub fn resolve(&self, indexed_count: usize) -> Option<&Fragment> {
        match self {
            IndexEntry::Single(f) => Some(f),
            IndexEntry::Layouts { variants, order } => variants
                .get(&indexed_count)
                .or_else(|| order.last().and_then(|c| variants.get(c))),
        }
    }

    /// All fragments stored under this selector.
    pub fn fragments(&self) -> Vec<&Fragment> {
        match self {
            IndexEntry::Single(f) => vec![f],
            IndexEntry::Layouts { variants, .. } => variants.values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abidecode_core::abi::Param;

    fn transfer(token_id_indexed: bool) -> Fragment {
        let mut last = Param::new(if token_id_indexed { "tokenId" } else { "value" }, "uint256");
        last.indexed = token_id_indexed;
        Fragment::event(
            "Transfer",
            vec![
                Param::new("from", "address").indexed(),
                Param::new("to", "address").indexed(),
                last,
            ],
        )
    }

    #[test]
    fn second_layout_promotes_to_layouts() {
        let mut entry = IndexEntry::Single(transfer(false));
        entry.insert(transfer(true));
        assert!(matches!(&entry, IndexEntry::Layouts { order, .. } if order == &[2, 3]));
        assert_eq!(entry.resolve(2).unwrap().inputs[2].name, "value");
        assert_eq!(entry.resolve(3).unwrap().inputs[2].name, "tokenId");
        // unknown layout falls back to the latest registration
        assert_eq!(entry.resolve(0).unwrap().inputs[2].name, "tokenId");
    }

    #[test]
    fn same_layout_overwrites() {
        let mut entry = IndexEntry::Single(transfer(false));
        let mut renamed = transfer(false);
        renamed.inputs[2].name = "amount".into();
        entry.insert(renamed);
        assert_eq!(entry.fragments().len(), 1);
        assert_eq!(entry.resolve(2).unwrap().inputs[2].name, "amount");
    }

    #[test]
    fn removing_a_layout_collapses_to_single() {
        let mut entry = IndexEntry::Single(transfer(false));
        entry.insert(transfer(true));
        assert!(!entry.remove(3));
        assert!(matches!(entry, IndexEntry::Single(_)));
        assert_eq!(entry.resolve(3).unwrap().inputs[2].name, "value");
        assert!(!entry.remove(7));
        assert!(entry.remove(2));
    }

    fn layout(indexed: usize) -> Fragment {
        let inputs = (0..4)
            .map(|i| {
                let p = Param::new(format!("p{i}"), "uint256");
                if i < indexed {
                    p.indexed()
                } else {
                    p
                }
            })
            .collect();
        Fragment::event("Wide", inputs)
    }

    #[test]
    fn fallback_follows_registration_order_after_removal() {
        let mut entry = IndexEntry::Single(layout(1));
        entry.insert(layout(3));
        entry.insert(layout(2));
        assert_eq!(entry.resolve(0).unwrap().indexed_count(), 2);

        // dropping the latest falls back to the one registered before it,
        // not to the highest indexed count
        assert!(!entry.remove(2));
        assert_eq!(entry.resolve(0).unwrap().indexed_count(), 3);

        entry.insert(layout(1));
        assert_eq!(entry.resolve(0).unwrap().indexed_count(), 1);
        assert!(!entry.remove(1));
        assert_eq!(entry.resolve(0).unwrap().indexed_count(), 3);
    }

    #[test]
    fn removing_unknown_layout_is_noop() {
        let mut entry = IndexEntry::Single(transfer(false));
        entry.insert(transfer(true));
        assert!(!entry.remove(1));
        assert_eq!(entry.fragments().len(), 2);
    }
}
