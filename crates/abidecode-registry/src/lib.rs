//! # abidecode-registry
//!
//! The ABI registry: every fragment ever added, plus a selector index used
//! by the call and log decoders. Each decoder owns its own registry; there
//! is no process-wide state.

pub mod entry;
pub mod memory;

pub use entry::IndexEntry;
pub use memory::{AbiRegistry, SelectorIndex};
