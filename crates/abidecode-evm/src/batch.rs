//! Batch log decoding, sequential and Rayon-parallel.
//!
//! Both entry points apply the same `ErrorMode` policy and return logs in
//! input order. Logs that do not resolve to a registered event are counted in
//! `unresolved` and are never treated as errors.

use abidecode_core::{
    abi::FragmentLookup,
    config::DecodeLimits,
    decoder::{BatchDecodeResult, ErrorMode},
    error::{BatchDecodeError, DecodeError},
    event::{DecodedLog, RawLog},
};
use rayon::prelude::*;
use tracing::warn;

use crate::log_decoder::decode_log;

type Outcome = Result<Option<DecodedLog>, DecodeError>;

/// Decode `logs` one after another.
pub fn decode_logs(
    registry: &dyn FragmentLookup,
    logs: &[RawLog],
    mode: ErrorMode,
    limits: &DecodeLimits,
) -> Result<BatchDecodeResult, BatchDecodeError> {
    let mut result = BatchDecodeResult::default();
    for (idx, raw) in logs.iter().enumerate() {
        absorb(&mut result, idx, decode_log(registry, raw, limits), mode)?;
    }
    Ok(result)
}

/// Decode `logs` across the Rayon thread pool. The policy is applied after
/// all logs are decoded, in input order, so `Throw` reports the first
/// failing index just as the sequential path does.
pub fn parallel_decode(
    registry: &dyn FragmentLookup,
    logs: &[RawLog],
    mode: ErrorMode,
    limits: &DecodeLimits,
) -> Result<BatchDecodeResult, BatchDecodeError> {
    let outcomes: Vec<Outcome> = logs
        .par_iter()
        .map(|raw| decode_log(registry, raw, limits))
        .collect();

    let mut result = BatchDecodeResult::default();
    for (idx, outcome) in outcomes.into_iter().enumerate() {
        absorb(&mut result, idx, outcome, mode)?;
    }
    Ok(result)
}

fn absorb(
    result: &mut BatchDecodeResult,
    idx: usize,
    outcome: Outcome,
    mode: ErrorMode,
) -> Result<(), BatchDecodeError> {
    match outcome {
        Ok(Some(log)) => result.logs.push(log),
        Ok(None) => result.unresolved += 1,
        Err(e) => match mode {
            ErrorMode::Skip => {
                warn!(index = idx, error = %e, "skipping log that failed to decode");
            }
            ErrorMode::Collect => result.errors.push((idx, e)),
            ErrorMode::Throw => {
                return Err(BatchDecodeError::ItemFailed { index: idx, source: e });
            }
        },
    }
    Ok(())
}
