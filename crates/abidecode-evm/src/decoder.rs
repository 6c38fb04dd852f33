//! `AbiDecoder`: one registry plus the decoders that read from it.

use abidecode_core::{
    abi::Fragment,
    call::{DecodedCall, DecodedConstructor},
    config::{DecodeLimits, DecoderConfig},
    decoder::{BatchDecodeResult, ErrorMode},
    error::{BatchDecodeError, DecodeError, RegistryError},
    event::{DecodedLog, RawLog},
};
use abidecode_registry::{AbiRegistry, SelectorIndex};
use serde_json::Value;
use tracing::info;

use crate::{batch, call_decoder, log_decoder};

/// ABI decoder owning its own registry.
///
/// Registration takes `&mut self` and decoding takes `&self`, so a decoder
/// shared between threads goes behind an `RwLock`. Independent decoders never
/// see each other's ABIs.
#[derive(Debug, Clone, Default)]
pub struct AbiDecoder {
    registry: AbiRegistry,
    config: DecoderConfig,
}

impl AbiDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            registry: AbiRegistry::new(),
            config,
        }
    }

    /// Register every fragment of a JSON ABI array. Returns how many were indexed.
    ///
    /// # Errors
    /// `RegistryError::InvalidInput` if `abi` is not an array of fragments.
    pub fn add_abi(&mut self, abi: &Value) -> Result<usize, RegistryError> {
        self.registry.add_abi(abi)
    }

    pub fn add_abi_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        self.registry.add_abi_json(json)
    }

    /// Drop the selectors of every fragment in `abi`. Unknown entries are ignored.
    pub fn remove_abi(&mut self, abi: &Value) -> Result<usize, RegistryError> {
        self.registry.remove_abi(abi)
    }

    pub fn remove_abi_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        self.registry.remove_abi_json(json)
    }

    /// Every fragment ever added, duplicates included, in insertion order.
    pub fn abis(&self) -> &[Fragment] {
        self.registry.fragments()
    }

    /// Selector → fragment index.
    pub fn method_ids(&self) -> &SelectorIndex {
        self.registry.selector_index()
    }

    pub fn registry(&self) -> &AbiRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn limits(&self) -> &DecodeLimits {
        &self.config.limits
    }

    /// Decode hex calldata. `Ok(None)` when the selector is unknown.
    pub fn decode_method(&self, call_data: &str) -> Result<Option<DecodedCall>, DecodeError> {
        call_decoder::decode_method(&self.registry, call_data, self.limits())
    }

    /// Decode hex constructor arguments. `Ok(None)` without a registered constructor.
    pub fn decode_constructor(
        &self,
        args_hex: &str,
    ) -> Result<Option<DecodedConstructor>, DecodeError> {
        call_decoder::decode_constructor(&self.registry, args_hex, self.limits())
    }

    /// Decode one log. `Ok(None)` when it does not match a registered event.
    pub fn decode_log(&self, log: &RawLog) -> Result<Option<DecodedLog>, DecodeError> {
        log_decoder::decode_log(&self.registry, log, self.limits())
    }

    /// Decode a batch of logs, applying `mode` to per-log failures.
    pub fn decode_logs(
        &self,
        logs: &[RawLog],
        mode: ErrorMode,
    ) -> Result<BatchDecodeResult, BatchDecodeError> {
        let result = batch::decode_logs(&self.registry, logs, mode, self.limits())?;
        log_summary(logs.len(), &result);
        Ok(result)
    }

    /// Same as [`decode_logs`], spread over the Rayon thread pool.
    ///
    /// [`decode_logs`]: AbiDecoder::decode_logs
    pub fn decode_logs_par(
        &self,
        logs: &[RawLog],
        mode: ErrorMode,
    ) -> Result<BatchDecodeResult, BatchDecodeError> {
        let result = batch::parallel_decode(&self.registry, logs, mode, self.limits())?;
        log_summary(logs.len(), &result);
        Ok(result)
    }
}

fn log_summary(total: usize, result: &BatchDecodeResult) {
    info!(
        total,
        decoded = result.logs.len(),
        unresolved = result.unresolved,
        errors = result.errors.len(),
        "batch decode complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deposit_abi() -> Value {
        json!([{
            "anonymous": false, "type": "event", "name": "Deposit",
            "inputs": [
                {"indexed": true, "name": "sender", "type": "address"},
                {"indexed": false, "name": "value", "type": "uint256"}
            ]
        }])
    }

    #[test]
    fn decoders_are_isolated() {
        let mut a = AbiDecoder::new();
        let b = AbiDecoder::new();
        a.add_abi(&deposit_abi()).unwrap();
        assert_eq!(a.method_ids().len(), 1);
        assert!(b.method_ids().is_empty());
        assert!(b.abis().is_empty());
    }

    #[test]
    fn config_limits_apply() {
        let cfg = DecoderConfig::from_json(r#"{"limits": {"max_data_len": 4}}"#).unwrap();
        let mut dec = AbiDecoder::with_config(cfg);
        dec.add_abi_json(
            r#"[{"type": "function", "name": "set", "inputs": [{"name": "v", "type": "uint256"}]}]"#,
        )
        .unwrap();
        let call = format!("0x60fe47b1{:064x}", 1);
        let err = dec.decode_method(&call).unwrap_err();
        assert_eq!(err.kind(), "malformed_encoding");
    }

    #[test]
    fn decoder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AbiDecoder>();
    }
}
