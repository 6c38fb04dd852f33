//! # decode_logs
//!
//! Batch-decodes `eth_getLogs`-style JSON with `AbiDecoder`, including the
//! ERC-20 / ERC-721 `Transfer` pair that shares one topic hash.
//!
//! Run with:
//! ```sh
//! cargo run --bin decode_logs
//! ```

use abidecode_core::{decoder::ErrorMode, event::RawLog};
use abidecode_evm::AbiDecoder;
use anyhow::Result;

const TOKEN_ABIS: &str = r#"[
    {"type": "event", "name": "Transfer", "anonymous": false, "inputs": [
        {"name": "from",  "type": "address", "indexed": true},
        {"name": "to",    "type": "address", "indexed": true},
        {"name": "value", "type": "uint256", "indexed": false}
    ]},
    {"type": "event", "name": "Transfer", "anonymous": false, "inputs": [
        {"name": "from",    "type": "address", "indexed": true},
        {"name": "to",      "type": "address", "indexed": true},
        {"name": "tokenId", "type": "uint256", "indexed": true}
    ]}
]"#;

const LOGS: &str = r#"[
    {
        "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b"
        ],
        "data": "0x000000000000000000000000000000000000000000000000000000003b9aca00",
        "blockNumber": "0x121eac0",
        "transactionHash": "0xabc001"
    },
    {
        "address": "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x0000000000000000000000000000000000000000000000000000000000000000",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "0x0000000000000000000000000000000000000000000000000000000000001e61"
        ],
        "data": "0x",
        "blockNumber": "0x121eac1",
        "transactionHash": "0xabc002"
    },
    {
        "address": "0x0000000000000000000000000000000000000001",
        "topics": ["0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"],
        "data": "0x",
        "blockNumber": "0x121eac2"
    },
    {
        "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b"
        ],
        "data": "0x1234",
        "blockNumber": "0x121eac3"
    }
]"#;

fn main() -> Result<()> {
    let mut decoder = AbiDecoder::new();
    decoder.add_abi_json(TOKEN_ABIS)?;
    let logs: Vec<RawLog> = serde_json::from_str(LOGS)?;

    println!("abidecode: log decoder");
    println!("=======================================================");

    // ── 1. Sequential, collecting errors ─────────────────────────────────────
    let result = decoder.decode_logs(&logs, ErrorMode::Collect)?;
    println!(
        "\n{} logs in → {} decoded, {} unresolved, {} errors",
        logs.len(),
        result.logs.len(),
        result.unresolved,
        result.errors.len()
    );
    for log in &result.logs {
        println!("\n{}", serde_json::to_string_pretty(log)?);
    }
    for (index, err) in &result.errors {
        println!("\n  log #{index} failed: {err}");
    }

    // ── 2. Parallel, skipping errors ─────────────────────────────────────────
    let parallel = decoder.decode_logs_par(&logs, ErrorMode::Skip)?;
    println!("\nparallel decode: {} logs (same order as input)", parallel.logs.len());
    for log in &parallel.logs {
        let fields: Vec<String> = log.events.iter().map(|p| format!("{}={}", p.name, p.value)).collect();
        println!("  {} @ {}: {}", log.name, log.address, fields.join(", "));
    }

    // ── 3. Throw mode stops at the first failure ─────────────────────────────
    match decoder.decode_logs(&logs, ErrorMode::Throw) {
        Ok(_) => println!("\nunexpected: throw mode succeeded"),
        Err(e) => println!("\nthrow mode: {e}"),
    }

    Ok(())
}
