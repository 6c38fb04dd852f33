//! # with_observability
//!
//! Demonstrates abidecode metrics and structured logging via
//! `abidecode-observability`.
//!
//! Run with:
//! ```sh
//! cargo run --bin with_observability
//!
//! # With JSON logging:
//! LOG_JSON=1 cargo run --bin with_observability
//! ```

use abidecode_core::{decoder::ErrorMode, event::RawLog};
use abidecode_evm::AbiDecoder;
use abidecode_observability::{
    metrics::DecoderMetrics,
    tracing_setup::{init_tracing, LogConfig},
};
use anyhow::Result;
use opentelemetry::global;
use tracing::{info, warn};

const DEPOSIT_ABI: &str = r#"[
    {"type": "event", "name": "Deposit", "anonymous": false, "inputs": [
        {"indexed": true,  "name": "sender", "type": "address"},
        {"indexed": false, "name": "value",  "type": "uint256"}
    ]},
    {"type": "function", "name": "changeDailyLimit", "inputs": [
        {"name": "_dailyLimit", "type": "uint256"}
    ]}
]"#;

fn deposit(value: u64) -> RawLog {
    RawLog::new(
        "0x0457874Bb0a346962128a0C01310d00Fc5bb6a81",
        vec![
            "0xe1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c".into(),
            "0x00000000000000000000000005039084cc6f4773291a6ed7dcf5bc3a2e894ff3".into(),
        ],
        format!("0x{value:064x}"),
    )
}

fn main() -> Result<()> {
    // ── 1. Initialise structured logging ──────────────────────────────────────
    let log_config = LogConfig {
        level: "info".into(),
        components: [
            ("abidecode_evm".into(), "debug".into()),
            ("abidecode_registry".into(), "warn".into()),
        ]
        .into(),
        // Set LOG_JSON=1 to emit JSON-structured logs
        json: std::env::var("LOG_JSON").is_ok(),
    };
    init_tracing(&log_config)?;

    info!(
        component = "with_observability",
        log_json = log_config.json,
        level = %log_config.level,
        "abidecode observability demo starting"
    );

    // ── 2. Meter + metrics ───────────────────────────────────────────────────
    //
    // The global meter is a no-op until a MeterProvider is installed, which
    // lets the demo run without an exporter.
    let meter = global::meter("abidecode-demo");
    let metrics = DecoderMetrics::new(&meter);

    // ── 3. Decoder ───────────────────────────────────────────────────────────
    let mut decoder = AbiDecoder::new();
    decoder.add_abi_json(DEPOSIT_ABI)?;

    // ── 4. Calls ─────────────────────────────────────────────────────────────
    let calls = [
        format!("0xcea08621{:064x}", 1_000u64),
        "0xdeadbeef".to_string(),
        "0xcea08621".to_string(),
    ];
    for data in &calls {
        match decoder.decode_method(data) {
            Ok(Some(call)) => {
                metrics.record_call(&call.name);
                info!(function = %call.name, params = call.params.len(), "call decoded");
            }
            Ok(None) => {
                metrics.record_unresolved("call");
                info!(calldata = %data, "call not in registry");
            }
            Err(e) => {
                metrics.record_error(&e);
                warn!(error = %e, kind = e.kind(), "call failed to decode");
            }
        }
    }

    // ── 5. Log batch ─────────────────────────────────────────────────────────
    let mut logs: Vec<RawLog> = (1..=5).map(|i| deposit(i * 1_000_000_000_000_000)).collect();
    logs.push(RawLog::new("0x01", vec![], "0x"));
    let mut broken = deposit(1);
    broken.data = "0x00".into();
    logs.push(broken);

    let result = decoder.decode_logs_par(&logs, ErrorMode::Collect)?;
    metrics.record_batch(logs.len(), &result);

    for log in &result.logs {
        let value = log.field("value").map(|v| v.to_string()).unwrap_or_default();
        info!(event = %log.name, value = %value, "log decoded");
    }
    for (index, err) in &result.errors {
        warn!(index, error = %err, "log failed to decode");
    }

    info!(
        decoded = result.logs.len(),
        unresolved = result.unresolved,
        errors = result.errors.len(),
        "demo complete"
    );
    Ok(())
}
