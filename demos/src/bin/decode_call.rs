//! # decode_call
//!
//! Decodes ERC-20 calldata and constructor arguments with `AbiDecoder`.
//!
//! Run with:
//! ```sh
//! cargo run --bin decode_call
//! ```

use abidecode_evm::AbiDecoder;
use anyhow::{Context, Result};

// Standard ERC-20 ABI (transfer, approve, transferFrom) plus a constructor
const ERC20_ABI: &str = r#"[
    {
        "type": "constructor",
        "inputs": [
            {"name": "name",   "type": "string"},
            {"name": "symbol", "type": "string"}
        ]
    },
    {
        "name": "transfer",
        "type": "function",
        "inputs": [
            {"name": "to",     "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    },
    {
        "name": "approve",
        "type": "function",
        "inputs": [
            {"name": "spender", "type": "address"},
            {"name": "amount",  "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    },
    {
        "name": "transferFrom",
        "type": "function",
        "inputs": [
            {"name": "from",   "type": "address"},
            {"name": "to",     "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    }
]"#;

fn main() -> Result<()> {
    let mut decoder = AbiDecoder::new();
    let indexed = decoder.add_abi_json(ERC20_ABI)?;

    println!("abidecode: call decoder");
    println!("=======================================================");

    // ── 1. Print the selector index ──────────────────────────────────────────
    println!("\n{indexed} selectors registered:");
    for (selector, entry) in decoder.method_ids() {
        for fragment in entry.fragments() {
            println!("  {selector} → {} {}", fragment.kind, fragment.name);
        }
    }

    // ── 2. Decode a transfer() call ───────────────────────────────────────────
    //
    //   [0..4]   0xa9059cbb = keccak256("transfer(address,uint256)")[:4]
    //   [4..36]  `to` address, zero-padded to 32 bytes
    //   [36..68] `amount` = 1,000,000 = 0x0F4240
    let transfer = concat!(
        "0xa9059cbb",
        "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
        "00000000000000000000000000000000000000000000000000000000000f4240",
    );
    let call = decoder
        .decode_method(transfer)?
        .context("transfer selector should be registered")?;
    println!("\ntransfer() decoded:");
    println!("{}", serde_json::to_string_pretty(&call)?);

    // ── 3. Max-approval check ────────────────────────────────────────────────
    let approve = format!(
        "0x095ea7b3{}{}",
        "0000000000000000000000001111111254eeb25477b68fb85ed929f73a960582",
        "f".repeat(64),
    );
    if let Some(call) = decoder.decode_method(&approve)? {
        let amount = call.param("amount").and_then(|v| v.as_int()).unwrap_or_default();
        println!("\napprove() amount = {amount}");
        if amount.len() >= 70 {
            println!("  ⚠ unlimited approval");
        }
    }

    // ── 4. Unknown selector ───────────────────────────────────────────────────
    match decoder.decode_method("0xdeadbeef")? {
        Some(call) => println!("\nunexpected match: {}", call.name),
        None => println!("\n0xdeadbeef → not in the registry"),
    }

    // ── 5. Constructor arguments ("Token", "TKN") ────────────────────────────
    let ctor_args = concat!(
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000080",
        "0000000000000000000000000000000000000000000000000000000000000005",
        "546f6b656e000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "544b4e0000000000000000000000000000000000000000000000000000000000",
    );
    if let Some(ctor) = decoder.decode_constructor(ctor_args)? {
        println!("\nconstructor args:");
        for p in &ctor.params {
            println!("  {} ({}) = {}", p.name, p.ty, p.value);
        }
    }

    Ok(())
}
