//! Batch decode policy and result types.

use crate::error::DecodeError;
use crate::event::DecodedLog;

/// Controls how batch decoding reacts to individual decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Silently skip logs that fail to decode.
    #[default]
    Skip,
    /// Collect decode errors alongside successes and return both at the end.
    Collect,
    /// Abort the entire batch on first error.
    Throw,
}

/// The output of a batch decode.
#[derive(Debug, Default)]
pub struct BatchDecodeResult {
    /// Decoded logs, in input order
    pub logs: Vec<DecodedLog>,
    /// `(input index, error)`; populated only in `ErrorMode::Collect`
    pub errors: Vec<(usize, DecodeError)>,
    /// Logs whose selector is not registered (not errors)
    pub unresolved: usize,
}

impl BatchDecodeResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
