//! Intent construction from a command table and raw arguments.

use interact_core::builder::build_intent;
use interact_core::codec::encode;
use interact_core::command::CommandTable;
use interact_core::config::{Environment, ResolvedConfig};
use interact_core::error::BuildError;
use interact_core::intent::TransactionIntent;
use interact_core::metadata::MetadataFlag;
use interact_core::value::{Address, TypedValue};
use num_bigint::BigUint;
use serde_json::{json, Value};

const TABLE: &str = r#"{
  "name": "fixture",
  "commands": [
    {
      "name": "deploy",
      "kind": "deploy",
      "gasLimit": 100000000,
      "metadata": ["upgradeable", "payable", "upgradeable"],
      "args": [
        { "name": "image_extension", "type": "string" },
        { "name": "royalties", "type": "u32" }
      ]
    },
    { "name": "upgrade", "kind": "upgrade", "gasLimit": 100000000, "metadata": ["upgradeable"] },
    { "name": "startMinting", "kind": "call", "function": "startMinting", "gasLimit": 10000000 },
    {
      "name": "mint",
      "kind": "call",
      "function": "mint",
      "gasLimit": 100000000,
      "transfers": [{ "token": "RIDE-05b1bb", "amount": "15e18" }],
      "args": [{ "name": "amount_of_tokens", "type": "u32" }]
    },
    { "name": "issue", "kind": "call", "function": "issueToken", "gasLimit": 100000000, "value": "5e16" },
    {
      "name": "giveaway",
      "kind": "call",
      "function": "giveaway",
      "gasLimit": 600000000,
      "args": [
        { "name": "addresses", "type": { "list": "address" } },
        { "name": "amount", "type": "u32" }
      ]
    },
    { "name": "fetchFileExtension", "kind": "query", "function": "fileExtension" },
    { "name": "broken", "kind": "call", "function": "broken", "gasLimit": 0 },
    { "name": "gasQuery", "kind": "query", "function": "fileExtension", "gasLimit": 5000 },
    {
      "name": "paidTwice",
      "kind": "call",
      "function": "mint",
      "gasLimit": 100000000,
      "value": "1",
      "transfers": [{ "token": "RIDE-05b1bb", "amount": "1" }]
    }
  ]
}"#;

fn table() -> CommandTable {
    CommandTable::from_json(TABLE).unwrap()
}

fn contract() -> Address {
    Address::new([0xaa; 32])
}

fn config() -> ResolvedConfig {
    ResolvedConfig::new(Environment::Devnet, vec![0x00, 0x61, 0x73, 0x6d])
        .with_address(Environment::Devnet, contract())
}

fn unconfigured() -> ResolvedConfig {
    ResolvedConfig::new(Environment::Mainnet, vec![0x00, 0x61, 0x73, 0x6d])
        .with_address(Environment::Devnet, contract())
}

#[test]
fn test_deploy_has_no_target() {
    let intent = build_intent("deploy", &unconfigured(), &table(), &[json!(".png"), json!(2500)]).unwrap();
    assert_eq!(intent.target(), None);
    match intent {
        TransactionIntent::Deploy(d) => {
            assert_eq!(d.code(), &[0x00, 0x61, 0x73, 0x6d]);
            assert_eq!(d.gas_limit(), 100_000_000);
            assert!(d.metadata().contains(MetadataFlag::Upgradeable));
            assert!(d.metadata().contains(MetadataFlag::Payable));
            assert!(!d.metadata().contains(MetadataFlag::Readable));
            assert_eq!(d.constructor_args()[0].as_bytes(), b".png");
            assert_eq!(d.constructor_args()[1].to_hex(), "000009c4");
        }
        other => panic!("expected deploy, got {:?}", other),
    }
}

#[test]
fn test_zero_argument_call() {
    let intent = build_intent("startMinting", &config(), &table(), &[]).unwrap();
    assert!(intent.args().is_empty());
    assert_eq!(intent.function(), Some("startMinting"));
    assert_eq!(intent.gas_limit(), Some(10_000_000));
    assert_eq!(intent.target(), Some(&contract()));
}

#[test]
fn test_call_with_payments() {
    let intent = build_intent("mint", &config(), &table(), &[json!(3)]).unwrap();
    match intent {
        TransactionIntent::Call(c) => {
            assert_eq!(c.value(), &BigUint::default());
            assert_eq!(c.token_transfers().len(), 1);
            let t = &c.token_transfers()[0];
            assert_eq!(t.token_identifier, "RIDE-05b1bb");
            assert_eq!(t.nonce, 0);
            assert_eq!(t.amount, BigUint::from(15u32) * BigUint::from(10u32).pow(18));
            assert_eq!(c.args(), &[encode(&TypedValue::u32(3)).unwrap()]);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_with_native_value() {
    let intent = build_intent("issue", &config(), &table(), &[]).unwrap();
    match intent {
        TransactionIntent::Call(c) => {
            assert_eq!(c.value(), &BigUint::from(50_000_000_000_000_000u64));
            assert!(c.token_transfers().is_empty());
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_upgrade_uses_configured_address() {
    let intent = build_intent("upgrade", &config(), &table(), &[]).unwrap();
    match intent {
        TransactionIntent::Upgrade(u) => {
            assert_eq!(u.target(), &contract());
            assert_eq!(u.metadata().to_hex(), "0100");
        }
        other => panic!("expected upgrade, got {:?}", other),
    }
}

#[test]
fn test_query_has_no_gas() {
    let intent = build_intent("fetchFileExtension", &config(), &table(), &[]).unwrap();
    assert_eq!(intent.kind(), "query");
    assert_eq!(intent.gas_limit(), None);
    assert_eq!(intent.function(), Some("fileExtension"));
}

#[test]
fn test_missing_argument_is_binding_error() {
    let err = build_intent("giveaway", &config(), &table(), &[json!([])]).unwrap_err();
    match err {
        BuildError::ArgumentBinding { command, label, index, .. } => {
            assert_eq!(command, "giveaway");
            assert_eq!(label, "amount");
            assert_eq!(index, 1);
        }
        other => panic!("expected ArgumentBinding, got {:?}", other),
    }
}

#[test]
fn test_extra_argument_is_binding_error() {
    let err = build_intent("startMinting", &config(), &table(), &[json!(1)]).unwrap_err();
    assert!(matches!(err, BuildError::ArgumentBinding { index: 0, .. }), "got {:?}", err);
}

#[test]
fn test_unresolved_address_checked_before_arguments() {
    // The address argument is malformed, but the missing contract address
    // must be reported first.
    let raw: Vec<Value> = vec![json!(["not-an-address"]), json!(1)];
    let err = build_intent("giveaway", &unconfigured(), &table(), &raw).unwrap_err();
    match err {
        BuildError::UnresolvedAddress { command, environment } => {
            assert_eq!(command, "giveaway");
            assert_eq!(environment, Environment::Mainnet);
        }
        other => panic!("expected UnresolvedAddress, got {:?}", other),
    }

    let err = build_intent("giveaway", &config(), &table(), &raw).unwrap_err();
    assert!(matches!(err, BuildError::Encoding { index: 0, .. }), "got {:?}", err);
    assert_eq!(err.error_code(), 2102);
}

#[test]
fn test_empty_address_list() {
    let intent = build_intent("giveaway", &config(), &table(), &[json!([]), json!(1)]).unwrap();
    assert!(intent.args()[0].is_empty());
    assert_eq!(intent.args()[1].to_hex(), "00000001");
}

#[test]
fn test_rebuild_is_equal_by_value() {
    let a = build_intent("mint", &config(), &table(), &[json!(3)]).unwrap();
    let b = build_intent("mint", &config(), &table(), &[json!("3")]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_unknown_and_invalid_commands() {
    let err = build_intent("nope", &config(), &table(), &[]).unwrap_err();
    assert_eq!(err, BuildError::UnknownCommand("nope".to_string()));

    let err = build_intent("broken", &config(), &table(), &[]).unwrap_err();
    assert!(matches!(err, BuildError::InvalidCommand { .. }), "got {:?}", err);
}

#[test]
fn test_query_with_gas_limit_is_invalid() {
    let err = build_intent("gasQuery", &config(), &table(), &[]).unwrap_err();
    match err {
        BuildError::InvalidCommand { command, reason } => {
            assert_eq!(command, "gasQuery");
            assert!(reason.contains("gas"), "{}", reason);
        }
        other => panic!("expected InvalidCommand, got {:?}", other),
    }
}

#[test]
fn test_native_value_with_token_transfers_is_invalid() {
    let err = build_intent("paidTwice", &config(), &table(), &[]).unwrap_err();
    assert!(matches!(err, BuildError::InvalidCommand { .. }), "got {:?}", err);
    assert_eq!(err.error_code(), 2001);
}
