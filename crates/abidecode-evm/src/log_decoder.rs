//! Event log decoder.
//!
//! `topics[0]` selects the event. Indexed inputs are read from `topics[1..]`
//! in declaration order; everything else is ABI-decoded from `data`. The two
//! streams are merged back into declaration order.

use abidecode_core::{
    abi::FragmentLookup,
    call::DecodedParam,
    config::DecodeLimits,
    error::DecodeError,
    event::{DecodedLog, RawLog},
    types::{DecodedValue, ParamType, WORD},
};
use tracing::debug;

use crate::{hexdata, normalizer, word};

/// Decode one raw log against the events in `registry`.
///
/// Returns `Ok(None)` when the log has no topics, its `topics[0]` is not a
/// registered event, or it carries fewer topics than the matched event has
/// indexed inputs.
pub fn decode_log(
    registry: &dyn FragmentLookup,
    log: &RawLog,
    limits: &DecodeLimits,
) -> Result<Option<DecodedLog>, DecodeError> {
    let Some(topic0) = log.topic0() else {
        debug!(address = %log.address, "log has no topics");
        return Ok(None);
    };
    let topic0 = hexdata::decode_word("topics[0]", topic0)?;
    let observed = log.topics.len() - 1;

    let Some(event) = registry.event(&topic0, observed) else {
        debug!(topic0 = %hex::encode(topic0), "no event registered for topic");
        return Ok(None);
    };
    let declared = event.indexed_count();
    if declared > observed {
        debug!(
            event = %event.name,
            declared,
            observed,
            "log carries fewer topics than the event has indexed inputs"
        );
        return Ok(None);
    }

    let types = event.input_types()?;

    // Indexed values come straight from their topic; `None` marks a data slot.
    let mut slots: Vec<Option<DecodedValue>> = Vec::with_capacity(types.len());
    let mut data_types = Vec::new();
    let mut topics = log.topics.iter().enumerate().skip(1);
    for (param, ty) in event.inputs.iter().zip(&types) {
        if !param.indexed {
            data_types.push(ty.clone());
            slots.push(None);
            continue;
        }
        let Some((i, topic)) = topics.next() else {
            return Ok(None);
        };
        let topic = hexdata::decode_word(&format!("topics[{i}]"), topic)?;
        slots.push(Some(decode_topic(&topic, ty, limits)?));
    }

    let data = hexdata::decode("data", &log.data)?;
    let mut data_values = word::decode_params(&data, &data_types, limits)?
        .into_iter()
        .map(normalizer::normalize);
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        *slot = data_values.next();
    }

    let events = event
        .inputs
        .iter()
        .zip(slots)
        .filter_map(|(param, value)| {
            value.map(|value| DecodedParam {
                name: param.name.clone(),
                ty: param.ty.clone(),
                value,
            })
        })
        .collect();

    Ok(Some(DecodedLog {
        name: event.name.clone(),
        events,
        address: log.address.clone(),
        extra: log.extra.clone(),
    }))
}

/// Value types are stored in the topic as their 32-byte encoding. Reference
/// types are stored as the keccak256 of their encoding, which cannot be
/// reversed, so the raw topic is returned.
fn decode_topic(
    topic: &[u8; WORD],
    ty: &ParamType,
    limits: &DecodeLimits,
) -> Result<DecodedValue, DecodeError> {
    let is_reference = matches!(
        ty,
        ParamType::Bytes
            | ParamType::String
            | ParamType::Array(_)
            | ParamType::FixedArray(..)
            | ParamType::Tuple(_)
    );
    if is_reference {
        return Ok(DecodedValue::Bytes(topic.to_vec()));
    }
    let token = word::decode_params(topic, std::slice::from_ref(ty), limits)?
        .into_iter()
        .next()
        .map(normalizer::normalize);
    Ok(token.unwrap_or_else(|| DecodedValue::Bytes(topic.to_vec())))
}
