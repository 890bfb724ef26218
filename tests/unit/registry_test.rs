use pretty_assertions::assert_eq;

use crate::common::{read_only_config, writable_config};
use ledger_quorum::ledger::{LedgerError, LedgerId, LedgerRegistry};

#[test]
fn registers_and_looks_up_ledgers() {
    let mut registry = LedgerRegistry::new();
    registry.register(writable_config("alpha"));
    registry.register(read_only_config("beta"));

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(&"alpha".into()).unwrap().display_name, "alpha net");
    assert!(registry.get(&"beta".into()).unwrap().contract_address.is_none());
}

#[test]
fn unknown_ledger_is_a_typed_error() {
    let registry = LedgerRegistry::from_configs(vec![writable_config("alpha")]);
    let missing = LedgerId::new("gamma");
    assert_eq!(
        registry.get(&missing),
        Err(LedgerError::UnknownLedger(missing.clone()))
    );
}

#[test]
fn reregistering_replaces_last_write_wins() {
    let mut registry = LedgerRegistry::from_configs(vec![writable_config("alpha")]);
    let updated = writable_config("alpha").with_block_interval(2);
    registry.register(updated);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&"alpha".into()).unwrap().avg_block_interval_secs, 2);
}

#[test]
fn loads_from_json_configuration() {
    let raw = r#"[
        {
            "id": "alpha",
            "display_name": "Alpha Net",
            "endpoint_url": "https://rpc.alpha.example",
            "contract_address": "0xaaa",
            "explorer_url": "https://scan.alpha.example",
            "avg_block_interval_secs": 6
        },
        {
            "id": "beta",
            "display_name": "Beta Net",
            "endpoint_url": "https://rpc.beta.example"
        }
    ]"#;

    let registry = LedgerRegistry::from_json(raw).unwrap();
    assert_eq!(registry.len(), 2);

    let alpha = registry.get(&"alpha".into()).unwrap();
    assert!(alpha.is_writable());
    assert_eq!(
        alpha.explorer_link("0xdeadbeef").as_deref(),
        Some("https://scan.alpha.example/tx/0xdeadbeef")
    );

    let beta = registry.get(&"beta".into()).unwrap();
    assert!(!beta.is_writable());
    assert_eq!(beta.avg_block_interval_secs, 12);
}

#[test]
fn malformed_json_fails_loudly() {
    let err = LedgerRegistry::from_json("not json").unwrap_err();
    assert!(matches!(err, ledger_quorum::Error::Serialization(_)));
    assert!(!err.is_retryable());
}

#[test]
fn blank_config_fields_are_rejected() {
    let no_id = r#"[{"id": "", "display_name": "X", "endpoint_url": "https://rpc.x.example"}]"#;
    let err = LedgerRegistry::from_json(no_id).unwrap_err();
    assert!(matches!(err, ledger_quorum::Error::Config(_)));
    assert!(!err.is_retryable());

    let no_endpoint = r#"[{"id": "alpha", "display_name": "Alpha", "endpoint_url": ""}]"#;
    assert!(matches!(
        LedgerRegistry::from_json(no_endpoint),
        Err(ledger_quorum::Error::Config(_))
    ));
}
