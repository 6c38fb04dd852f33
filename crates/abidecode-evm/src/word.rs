//! ABI head/tail word decoder.
//!
//! Walks an ABI-encoded blob against a list of `ParamType`s and produces raw
//! `Token`s. Every offset, length and element count read from the blob is
//! bounds-checked against the frame it applies to, so hostile input yields an
//! `EncodingError` rather than a panic or a runaway allocation.
//!
//! Frames: the top-level parameter list is one frame. The tail of every
//! dynamic array, and every tuple or fixed array, opens a new frame, and
//! offsets found in a frame's head are relative to that frame's start.
//!
//! Nothing stops two offsets from pointing at the same tail, so a small blob
//! can describe an exponentially large value. Each decode therefore carries a
//! work budget of `work_factor` units per input word. A word read costs one
//! unit and every element of a dynamic array costs one more on entry; a
//! well-formed encoding stays under two units per word.

use abidecode_core::{
    config::DecodeLimits,
    error::EncodingError,
    types::{ParamType, WORD},
};
use alloy_primitives::{Address, I256, U256};

/// A decoded value before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Int(I256),
    Address(Address),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    /// Invalid UTF-8 is replaced, not rejected
    String(String),
    /// Both `T[]` and `T[N]`
    Array(Vec<Token>),
    /// Members paired with their declared names (possibly empty)
    Tuple(Vec<(String, Token)>),
}

/// Decode `data` as the head/tail encoding of `types`.
///
/// Bytes past the last value referenced by the encoding are ignored.
pub fn decode_params(
    data: &[u8],
    types: &[ParamType],
    limits: &DecodeLimits,
) -> Result<Vec<Token>, EncodingError> {
    if data.len() > limits.max_data_len {
        return Err(EncodingError::DataTooLarge {
            len: data.len(),
            max: limits.max_data_len,
        });
    }
    let budget = limits
        .work_factor
        .saturating_mul(data.len().div_ceil(WORD) + 1);
    WordDecoder {
        limits,
        budget,
        remaining: budget,
    }
    .decode_frame(data, types.iter(), types.len(), 0)
}

struct WordDecoder<'a> {
    limits: &'a DecodeLimits,
    budget: usize,
    remaining: usize,
}

impl WordDecoder<'_> {
    /// Decode consecutive head slots of one frame.
    fn decode_frame<'t>(
        &mut self,
        frame: &[u8],
        types: impl Iterator<Item = &'t ParamType>,
        count: usize,
        depth: usize,
    ) -> Result<Vec<Token>, EncodingError> {
        let mut out = Vec::with_capacity(count);
        let mut head = 0usize;
        for ty in types {
            out.push(self.decode_slot(frame, head, ty, depth)?);
            head = head
                .checked_add(ty.head_size())
                .ok_or(EncodingError::ValueOverflow)?;
        }
        Ok(out)
    }

    /// Decode the value whose head slot starts at `frame[at..]`.
    fn decode_slot(
        &mut self,
        frame: &[u8],
        at: usize,
        ty: &ParamType,
        depth: usize,
    ) -> Result<Token, EncodingError> {
        if !ty.is_dynamic() {
            return self.decode_body(frame, at, ty, depth);
        }
        self.charge(1)?;
        let offset = read_usize(frame, at)?;
        let tail = frame.get(offset..).ok_or(EncodingError::OffsetOutOfBounds {
            offset,
            len: frame.len(),
        })?;
        self.decode_body(tail, 0, ty, depth)
    }

    /// Decode the encoding of `ty` that begins at `frame[at..]`. For dynamic
    /// types this is the tail, already reached through its offset.
    fn decode_body(
        &mut self,
        frame: &[u8],
        at: usize,
        ty: &ParamType,
        depth: usize,
    ) -> Result<Token, EncodingError> {
        if matches!(
            ty,
            ParamType::Uint(_)
                | ParamType::Int(_)
                | ParamType::Address
                | ParamType::Bool
                | ParamType::FixedBytes(_)
        ) {
            self.charge(1)?;
        }
        match ty {
            ParamType::Uint(_) => Ok(Token::Uint(U256::from_be_bytes(read_word(frame, at)?))),
            ParamType::Int(_) => Ok(Token::Int(I256::from_raw(U256::from_be_bytes(read_word(
                frame, at,
            )?)))),
            ParamType::Address => {
                let word = read_word(frame, at)?;
                Ok(Token::Address(Address::from_slice(&word[12..])))
            }
            ParamType::Bool => Ok(Token::Bool(read_word(frame, at)?.iter().any(|b| *b != 0))),
            ParamType::FixedBytes(size) => {
                let word = read_word(frame, at)?;
                Ok(Token::FixedBytes(word[..(*size).min(WORD)].to_vec()))
            }
            ParamType::Bytes => {
                let content = read_bytes(frame, at)?;
                self.charge(1 + content.len().div_ceil(WORD))?;
                Ok(Token::Bytes(content.to_vec()))
            }
            ParamType::String => {
                let content = read_bytes(frame, at)?;
                self.charge(1 + content.len().div_ceil(WORD))?;
                Ok(Token::String(String::from_utf8_lossy(content).into_owned()))
            }
            ParamType::Array(elem) => {
                let depth = self.enter(depth)?;
                let count = read_usize(frame, at)?;
                let body = frame.get(at + WORD..).unwrap_or_default();
                check_count(count, elem.head_size(), body.len())?;
                self.charge(count.saturating_add(1))?;
                self.decode_frame(body, std::iter::repeat(&**elem).take(count), count, depth)
                    .map(Token::Array)
            }
            ParamType::FixedArray(elem, len) => {
                let depth = self.enter(depth)?;
                let body = frame.get(at..).unwrap_or_default();
                check_count(*len, elem.head_size(), body.len())?;
                self.decode_frame(body, std::iter::repeat(&**elem).take(*len), *len, depth)
                    .map(Token::Array)
            }
            ParamType::Tuple(members) => {
                let depth = self.enter(depth)?;
                let body = frame.get(at..).unwrap_or_default();
                let tokens =
                    self.decode_frame(body, members.iter().map(|(_, t)| t), members.len(), depth)?;
                Ok(Token::Tuple(
                    members.iter().map(|(name, _)| name.clone()).zip(tokens).collect(),
                ))
            }
        }
    }

    fn charge(&mut self, units: usize) -> Result<(), EncodingError> {
        self.remaining = self
            .remaining
            .checked_sub(units)
            .ok_or(EncodingError::BudgetExceeded {
                budget: self.budget,
            })?;
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<usize, EncodingError> {
        let next = depth + 1;
        if next > self.limits.max_depth {
            return Err(EncodingError::DepthExceeded {
                max: self.limits.max_depth,
            });
        }
        Ok(next)
    }
}

fn read_word(frame: &[u8], at: usize) -> Result<[u8; WORD], EncodingError> {
    let end = at.checked_add(WORD).ok_or(EncodingError::ValueOverflow)?;
    let slice = frame.get(at..end).ok_or(EncodingError::ShortBuffer {
        at,
        needed: WORD,
        len: frame.len(),
    })?;
    let mut word = [0u8; WORD];
    word.copy_from_slice(slice);
    Ok(word)
}

/// A word used as an offset, length or count. Anything above `usize::MAX`
/// cannot address a real buffer.
fn read_usize(frame: &[u8], at: usize) -> Result<usize, EncodingError> {
    let word = read_word(frame, at)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(EncodingError::ValueOverflow);
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| EncodingError::ValueOverflow)
}

/// Length-prefixed content of `bytes`/`string`. Trailing padding is not required.
fn read_bytes(frame: &[u8], at: usize) -> Result<&[u8], EncodingError> {
    let length = read_usize(frame, at)?;
    let start = at + WORD;
    let available = frame.len().saturating_sub(start);
    if length > available {
        return Err(EncodingError::LengthOutOfBounds { length, available });
    }
    Ok(&frame[start..start + length])
}

/// Every element needs at least one word of head, so a count that cannot fit
/// in the remaining bytes is rejected before anything is allocated.
fn check_count(count: usize, elem_head: usize, available: usize) -> Result<(), EncodingError> {
    let needed = count
        .checked_mul(elem_head.max(1))
        .ok_or(EncodingError::CountOutOfBounds { count, available })?;
    if needed > available {
        return Err(EncodingError::CountOutOfBounds { count, available });
    }
    Ok(())
}
