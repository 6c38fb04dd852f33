//! Canonical type strings and signatures.
//!
//! Selectors are hashes of these strings, so the output must match what
//! Solidity itself produces: aliases expanded (`uint` → `uint256`), tuples
//! spelled out as `(T1,T2)` and no whitespace or parameter names.

use crate::abi::{Fragment, Param};
use crate::error::TypeParseError;

/// Canonical type string of a single parameter, e.g. `"(address,uint256)[]"`.
pub fn canonicalize(param: &Param) -> Result<String, TypeParseError> {
    Ok(param.kind()?.to_string())
}

/// Canonical signature, e.g. `"Transfer(address,address,uint256)"`.
pub fn signature(fragment: &Fragment) -> Result<String, TypeParseError> {
    let types = fragment
        .inputs
        .iter()
        .map(canonicalize)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", fragment.name, types.join(",")))
}
