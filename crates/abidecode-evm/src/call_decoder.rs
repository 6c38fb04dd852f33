//! Function-call and constructor calldata decoder.
//!
//! # How it works
//! - First 4 bytes of calldata = keccak256(function_signature)[:4] (the selector)
//! - Remaining bytes = ABI-encoded inputs tuple
//! - Constructor: no selector prefix; all bytes = ABI-encoded constructor args

use abidecode_core::{
    abi::{FragmentLookup, Param},
    call::{DecodedCall, DecodedConstructor, DecodedParam},
    config::DecodeLimits,
    error::DecodeError,
};
use tracing::debug;

use crate::{hexdata, normalizer, word};

/// Decode hex calldata against the functions in `registry`.
///
/// Returns `Ok(None)` when the calldata is shorter than a selector or the
/// selector is not registered.
///
/// # Errors
/// `InvalidHex` for unparseable input; `MalformedEncoding` when the argument
/// bytes do not match the function's inputs.
pub fn decode_method(
    registry: &dyn FragmentLookup,
    call_data: &str,
    limits: &DecodeLimits,
) -> Result<Option<DecodedCall>, DecodeError> {
    let calldata = hexdata::decode("callData", call_data)?;
    if calldata.len() < 4 {
        debug!(len = calldata.len(), "calldata shorter than a selector");
        return Ok(None);
    }
    let (head, args) = calldata.split_at(4);
    let mut selector = [0u8; 4];
    selector.copy_from_slice(head);

    let Some(function) = registry.function(&selector) else {
        debug!(selector = %hex::encode(selector), "no function registered for selector");
        return Ok(None);
    };

    let params = decode_inputs(&function.inputs, args, limits)?;
    Ok(Some(DecodedCall {
        name: function.name.clone(),
        selector,
        params,
    }))
}

/// Decode ABI-encoded constructor arguments (no selector prefix).
///
/// Returns `Ok(None)` when no constructor is registered.
pub fn decode_constructor(
    registry: &dyn FragmentLookup,
    args_hex: &str,
    limits: &DecodeLimits,
) -> Result<Option<DecodedConstructor>, DecodeError> {
    let Some(constructor) = registry.constructor() else {
        debug!("no constructor registered");
        return Ok(None);
    };
    let args = hexdata::decode("constructorArgs", args_hex)?;
    let params = decode_inputs(&constructor.inputs, &args, limits)?;
    Ok(Some(DecodedConstructor { params }))
}

/// Word-decode `data` against `inputs` and pair each value with its parameter.
pub(crate) fn decode_inputs(
    inputs: &[Param],
    data: &[u8],
    limits: &DecodeLimits,
) -> Result<Vec<DecodedParam>, DecodeError> {
    let types = inputs.iter().map(Param::kind).collect::<Result<Vec<_>, _>>()?;
    let tokens = word::decode_params(data, &types, limits)?;
    Ok(inputs
        .iter()
        .zip(tokens)
        .map(|(param, token)| DecodedParam {
            name: param.name.clone(),
            ty: param.ty.clone(),
            value: normalizer::normalize(token),
        })
        .collect())
}
