//! Selector derivation agrees with alloy-json-abi for every fixture fragment.

use alloy_json_abi::JsonAbi;
use abidecode_core::selector::Selector;
use abidecode_evm::AbiDecoder;

const WALLET_ABI: &str = include_str!("fixtures/multisig_wallet_abi.json");
const FACTORY_ABI: &str = include_str!("fixtures/wallet_factory_abi.json");

fn check(json: &str) {
    let mut dec = AbiDecoder::new();
    dec.add_abi_json(json).unwrap();
    let abi: JsonAbi = serde_json::from_str(json).unwrap();

    for f in abi.functions() {
        let key = Selector::Function(f.selector().0);
        let entry = dec.method_ids().get(&key);
        assert!(entry.is_some(), "missing selector for {}", f.name);
        assert_eq!(entry.unwrap().resolve(0).unwrap().name, f.name);
    }
    for e in abi.events() {
        let key = Selector::Event(e.selector().0);
        assert!(dec.method_ids().contains_key(&key), "missing topic for {}", e.name);
    }
}

#[test]
fn wallet_selectors_match_alloy() {
    check(WALLET_ABI);
}

#[test]
fn factory_selectors_match_alloy() {
    check(FACTORY_ABI);
}

#[test]
fn registration_order_does_not_change_selectors() {
    let mut a = AbiDecoder::new();
    a.add_abi_json(WALLET_ABI).unwrap();
    a.add_abi_json(FACTORY_ABI).unwrap();
    let mut b = AbiDecoder::new();
    b.add_abi_json(FACTORY_ABI).unwrap();
    b.add_abi_json(WALLET_ABI).unwrap();

    let mut ka: Vec<String> = a.method_ids().keys().map(|k| k.to_string()).collect();
    let mut kb: Vec<String> = b.method_ids().keys().map(|k| k.to_string()).collect();
    ka.sort();
    kb.sort();
    assert_eq!(ka, kb);
}
