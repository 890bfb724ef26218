use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{matching_event, test_expected};
use ledger_quorum::ledger::ExpectedPayload;

#[test]
fn matching_payload_has_no_mismatch() {
    let expected = test_expected();
    assert_eq!(expected.mismatch(&expected.to_payload()), None);
}

#[test]
fn each_fixed_key_is_compared_exactly() {
    let expected = test_expected();

    let mut payload = expected.to_payload();
    payload.insert(ExpectedPayload::KEY_HASH.into(), Value::String("0xother".into()));
    assert_eq!(expected.mismatch(&payload), Some(ExpectedPayload::KEY_HASH));

    let mut payload = expected.to_payload();
    payload.insert(
        ExpectedPayload::KEY_COMMITMENT.into(),
        Value::String("zk-commit-other".into()),
    );
    assert_eq!(expected.mismatch(&payload), Some(ExpectedPayload::KEY_COMMITMENT));

    let mut payload = expected.to_payload();
    payload.insert(ExpectedPayload::KEY_TRUST_SCORE.into(), Value::from(12));
    assert_eq!(expected.mismatch(&payload), Some(ExpectedPayload::KEY_TRUST_SCORE));
}

#[test]
fn missing_keys_count_as_mismatch() {
    let expected = test_expected();
    let mut payload = expected.to_payload();
    payload.remove(ExpectedPayload::KEY_COMMITMENT);
    assert_eq!(expected.mismatch(&payload), Some(ExpectedPayload::KEY_COMMITMENT));
}

#[test]
fn extra_payload_fields_are_ignored() {
    let expected = test_expected();
    let mut payload = expected.to_payload();
    payload.insert("ledger_specific_nonce".into(), Value::from(991));
    assert_eq!(expected.mismatch(&payload), None);
}

#[test]
fn every_attempt_gets_its_own_event_identity() {
    let first = matching_event("alpha", 10);
    let second = matching_event("alpha", 10);
    // Same ledger, same block, different attempts.
    assert_ne!(first.attempt, second.attempt);
    assert!(!first.verified);
}
