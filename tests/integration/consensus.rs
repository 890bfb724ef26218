use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::common::{
    conflicting_event, matching_event, pool_of, registry_of, test_commitment_hash, test_expected,
    verifier_over, MockLedger,
};
use ledger_quorum::ledger::{ClientPool, ClientState, LedgerError, LedgerId, LedgerRegistry};
use ledger_quorum::verify::{ConsensusVerifier, TrustWeights, VerificationResult};

fn ids(names: &[&str]) -> BTreeSet<LedgerId> {
    names.iter().map(|n| LedgerId::new(*n)).collect()
}

#[tokio::test]
async fn majority_verification_reaches_consensus() {
    // 5 ledgers with weights [1.0, 0.8, 0.7, 0.6, 0.5]; ledgers 1-3 verify,
    // 4-5 fail.
    let registry = registry_of(&["l1", "l2", "l3", "l4", "l5"]);
    let weights = TrustWeights::default()
        .with_weight("l1", 1.0)
        .with_weight("l2", 0.8)
        .with_weight("l3", 0.7)
        .with_weight("l4", 0.6)
        .with_weight("l5", 0.5);
    let pool = pool_of(vec![
        MockLedger::new("l1").with_event(matching_event("l1", 50)),
        MockLedger::new("l2").with_event(matching_event("l2", 51)),
        MockLedger::new("l3").with_event(matching_event("l3", 52)),
        MockLedger::new("l4").with_query_error(LedgerError::Unreachable("down".into())),
        MockLedger::new("l5").with_query_error(LedgerError::Unreachable("down".into())),
    ]);

    let verifier = verifier_over(registry, pool, weights);
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(result.verified_ledgers, ids(&["l1", "l2", "l3"]));
    assert_eq!(result.conflicting_ledgers, ids(&["l4", "l5"]));
    assert!(result.consensus_reached); // 3 >= ceil(5/2)
    assert!(result.is_valid);
    assert_eq!(result.confidence, 100.0);
}

#[tokio::test]
async fn minority_verification_scores_full_confidence_without_quorum() {
    // Only the lowest-weight ledger verifies: confidence reflects certainty
    // among those that answered, consensus reflects quorum.
    let registry = registry_of(&["l1", "l2", "l3", "l4", "l5"]);
    let weights = TrustWeights::default().with_weight("l5", 0.5);
    let pool = pool_of(vec![
        MockLedger::new("l1").with_query_error(LedgerError::Unreachable("down".into())),
        MockLedger::new("l2").with_query_error(LedgerError::Unreachable("down".into())),
        MockLedger::new("l3"),
        MockLedger::new("l4"),
        MockLedger::new("l5").with_event(matching_event("l5", 60)),
    ]);

    let verifier = verifier_over(registry, pool, weights);
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(result.verified_ledgers, ids(&["l5"]));
    assert!(!result.consensus_reached); // 1 < 3
    assert!(!result.is_valid);
    assert_eq!(result.confidence, 100.0);
}

#[tokio::test]
async fn one_failing_ledger_does_not_block_the_rest() {
    let registry = registry_of(&["a", "b", "c"]);
    let pool = pool_of(vec![
        MockLedger::new("a").with_event(matching_event("a", 10)),
        MockLedger::new("b").with_event(matching_event("b", 11)),
        // Slower than the branch timeout.
        MockLedger::new("c")
            .with_event(matching_event("c", 12))
            .with_delay(Duration::from_secs(2)),
    ]);

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    let started = std::time::Instant::now();
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(result.verified_ledgers, ids(&["a", "b"]));
    assert_eq!(result.conflicting_ledgers, ids(&["c"]));
    assert!(result.consensus_reached);
    // Bounded by the branch timeout, not the slow ledger.
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn zero_registered_ledgers_is_a_definitive_negative() {
    let verifier = verifier_over(
        LedgerRegistry::new(),
        ClientPool::new(),
        TrustWeights::default(),
    );
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(
        result,
        VerificationResult {
            is_valid: false,
            confidence: 0.0,
            verified_ledgers: BTreeSet::new(),
            conflicting_ledgers: BTreeSet::new(),
            consensus_reached: false,
        }
    );
}

#[tokio::test]
async fn unavailable_client_is_permanently_conflicting() {
    let registry = registry_of(&["a", "b"]);
    let mut pool = pool_of(vec![MockLedger::new("a").with_event(matching_event("a", 5))]);
    pool.insert(
        LedgerId::new("b"),
        ClientState::Unavailable(LedgerError::Unreachable("bad endpoint".into())),
    );

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    for _ in 0..2 {
        let result = verifier.verify(test_commitment_hash(), &test_expected()).await;
        assert_eq!(result.verified_ledgers, ids(&["a"]));
        assert_eq!(result.conflicting_ledgers, ids(&["b"]));
        assert!(result.consensus_reached); // 1 >= ceil(2/2)
    }
}

#[tokio::test]
async fn mismatched_payload_marks_the_ledger_conflicting() {
    let registry = registry_of(&["a", "b"]);
    let pool = pool_of(vec![
        MockLedger::new("a").with_event(matching_event("a", 5)),
        MockLedger::new("b").with_event(conflicting_event("b", 6)),
    ]);

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(result.verified_ledgers, ids(&["a"]));
    assert_eq!(result.conflicting_ledgers, ids(&["b"]));
}

#[tokio::test]
async fn most_recent_event_wins_within_a_ledger() {
    // Older conflicting record superseded by a newer matching one.
    let registry = registry_of(&["a"]);
    let pool = pool_of(vec![MockLedger::new("a")
        .with_event(conflicting_event("a", 10))
        .with_event(matching_event("a", 42))]);

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;
    assert_eq!(result.verified_ledgers, ids(&["a"]));
}

#[tokio::test]
async fn empty_query_result_is_conflicting_not_an_error() {
    let registry = registry_of(&["a", "b"]);
    let pool = pool_of(vec![
        MockLedger::new("a").with_event(matching_event("a", 5)),
        MockLedger::new("b"), // healthy, but holds no matching events
    ]);

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;

    assert_eq!(result.verified_ledgers, ids(&["a"]));
    assert_eq!(result.conflicting_ledgers, ids(&["b"]));
}

#[tokio::test]
async fn transient_failures_are_retried_within_the_budget() {
    let registry = registry_of(&["a"]);
    let mock = MockLedger::new("a")
        .with_errors_before_success(2, LedgerError::Unreachable("flaky".into()))
        .with_event(matching_event("a", 7));
    let pool = pool_of(vec![mock]);

    let mut config = crate::common::fast_verifier_config();
    config.retry = crate::common::fast_retry(2);
    let verifier = ConsensusVerifier::with_config(
        registry,
        pool,
        TrustWeights::default(),
        config,
    );

    let result = verifier.verify(test_commitment_hash(), &test_expected()).await;
    assert_eq!(result.verified_ledgers, ids(&["a"]));
    assert!(result.consensus_reached);
}

#[tokio::test]
async fn metrics_track_attempts_and_branch_faults() {
    let registry = registry_of(&["a", "b"]);
    let pool = pool_of(vec![
        MockLedger::new("a").with_event(matching_event("a", 5)),
        MockLedger::new("b").with_query_error(LedgerError::Unreachable("down".into())),
    ]);

    let verifier = verifier_over(registry, pool, TrustWeights::default());
    verifier.verify(test_commitment_hash(), &test_expected()).await;
    verifier.verify(test_commitment_hash(), &test_expected()).await;

    let metrics = verifier.metrics().await;
    assert_eq!(metrics.total_verifications, 2);
    assert_eq!(metrics.consensus_reached, 2); // 1 of 2 meets ceil(2/2)=1
    assert_eq!(metrics.failed_ledger_calls, 2);
}
