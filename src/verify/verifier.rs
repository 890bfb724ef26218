use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{ConfidenceScorer, TrustWeights, VerificationResult};
use crate::ledger::{
    with_retry, ClientPool, ClientState, CrossChainEvent, ExpectedPayload, HeadBlock, LedgerError,
    LedgerId, LedgerRegistry, RetryConfig,
};

/// Outcome of one ledger branch within a single attempt
pub type LedgerOutcome = Result<CrossChainEvent, LedgerError>;

/// Verifier tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// How many recent blocks each ledger is asked to scan
    pub lookback_blocks: u64,
    /// Hard bound on one ledger branch, so a single unreachable ledger
    /// cannot stall the fan-in
    pub branch_timeout: Duration,
    /// Backoff policy for transient read failures
    pub retry: RetryConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            lookback_blocks: crate::ledger::DEFAULT_LOOKBACK_BLOCKS,
            branch_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

/// Basic verification metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierMetrics {
    /// Total verification attempts
    pub total_verifications: u64,
    /// Attempts that reached consensus
    pub consensus_reached: u64,
    /// Transport-class branch failures across all attempts
    pub failed_ledger_calls: u64,
    /// Average wall-clock time of a verification attempt
    pub avg_verify_time_secs: f64,
}

/// Ledger health as reported to dashboard/monitoring collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerHealth {
    /// Head readable, fee estimate available, writable
    Healthy,
    /// Head readable but the ledger is not accepting submissions
    ReadOnly,
    /// Head readable, fee estimate missing
    Degraded,
    /// Head unreadable or client unavailable
    Unreachable,
}

/// Per-ledger status snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStatus {
    pub health: LedgerHealth,
    pub head_block: Option<u64>,
    pub fee_estimate: Option<u64>,
}

/// Cross-ledger consensus verifier.
///
/// `verify` fans out to every registered ledger concurrently; each branch is
/// failure-isolated and individually time-bounded, so the call always
/// resolves with a complete [`VerificationResult`] reflecting whichever
/// branches settled successfully.
pub struct ConsensusVerifier {
    registry: LedgerRegistry,
    pool: ClientPool,
    weights: TrustWeights,
    config: VerifierConfig,
    metrics: Arc<RwLock<VerifierMetrics>>,
}

impl ConsensusVerifier {
    pub fn new(registry: LedgerRegistry, pool: ClientPool, weights: TrustWeights) -> Self {
        Self::with_config(registry, pool, weights, VerifierConfig::default())
    }

    pub fn with_config(
        registry: LedgerRegistry,
        pool: ClientPool,
        weights: TrustWeights,
        config: VerifierConfig,
    ) -> Self {
        Self {
            registry,
            pool,
            weights,
            config,
            metrics: Arc::new(RwLock::new(VerifierMetrics::default())),
        }
    }

    pub fn registry(&self) -> &LedgerRegistry {
        &self.registry
    }

    /// Verify a commitment against every registered ledger and reduce the
    /// branch outcomes into a single verdict.
    pub async fn verify(
        &self,
        commitment_hash: &str,
        expected: &ExpectedPayload,
    ) -> VerificationResult {
        let start = Instant::now();
        let total = self.registry.len();

        if total == 0 {
            warn!("verification requested with zero registered ledgers");
            self.update_metrics(start, false, 0).await;
            return VerificationResult::negative(BTreeSet::new());
        }

        let branches = self.registry.all().iter().map(|config| {
            let id = config.id.clone();
            async move { (id.clone(), self.query_ledger(&id, commitment_hash, expected).await) }
        });
        let outcomes: Vec<(LedgerId, LedgerOutcome)> = join_all(branches).await;

        let mut verified_ledgers = BTreeSet::new();
        let mut conflicting_ledgers = BTreeSet::new();
        let mut verified_events = Vec::new();
        let mut faults: u64 = 0;

        for (id, outcome) in outcomes {
            match outcome {
                Ok(event) => {
                    debug!(ledger = %id, block = event.block_number, "ledger verified commitment");
                    verified_ledgers.insert(id);
                    verified_events.push(event);
                }
                Err(error) => {
                    if error.is_fault() {
                        faults += 1;
                    }
                    warn!(ledger = %id, %error, "ledger did not verify");
                    conflicting_ledgers.insert(id);
                }
            }
        }

        let confidence = ConfidenceScorer::score(&verified_events, &self.weights);
        let consensus_reached = verified_ledgers.len() >= VerificationResult::quorum(total);

        info!(
            commitment = commitment_hash,
            verified = verified_ledgers.len(),
            conflicting = conflicting_ledgers.len(),
            confidence,
            consensus_reached,
            "verification settled"
        );
        self.update_metrics(start, consensus_reached, faults).await;

        VerificationResult {
            is_valid: consensus_reached,
            confidence,
            verified_ledgers,
            conflicting_ledgers,
            consensus_reached,
        }
    }

    /// One isolated ledger branch: timed, retried on transient failures,
    /// and reduced to the most recent matching event.
    async fn query_ledger(
        &self,
        id: &LedgerId,
        commitment_hash: &str,
        expected: &ExpectedPayload,
    ) -> LedgerOutcome {
        let client = match self.pool.get(id) {
            Some(ClientState::Ready(client)) => client.clone(),
            Some(ClientState::Unavailable(error)) => return Err(error.clone()),
            None => return Err(LedgerError::UnknownLedger(id.clone())),
        };

        let branch_timeout = self.config.branch_timeout;
        let lookback = self.config.lookback_blocks;
        let events = with_retry(&self.config.retry, || {
            let client = client.clone();
            let hash = commitment_hash.to_string();
            async move {
                match timeout(branch_timeout, client.query_recent_matching(&hash, lookback)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(LedgerError::Timeout(branch_timeout)),
                }
            }
        })
        .await?;

        // Most recent matching event wins; earlier attempts are superseded.
        let mut event = events
            .into_iter()
            .max_by_key(|e| (e.block_number, e.timestamp_secs))
            .ok_or_else(|| LedgerError::NoMatchingEvent(id.clone()))?;

        if let Some(field) = expected.mismatch(&event.payload) {
            return Err(LedgerError::PayloadMismatch {
                ledger: id.clone(),
                field: field.to_string(),
            });
        }
        event.verified = true;
        Ok(event)
    }

    /// Per-ledger health/head/fee snapshot for dashboard collaborators.
    /// Branches run concurrently and a broken ledger only degrades its own
    /// entry.
    pub async fn network_status(&self) -> HashMap<LedgerId, LedgerStatus> {
        let branches = self.registry.all().iter().map(|config| {
            let id = config.id.clone();
            let writable = config.is_writable();
            async move {
                let status = match self.pool.get(&id) {
                    Some(ClientState::Ready(client)) => {
                        match timeout(self.config.branch_timeout, client.head_block()).await {
                            Ok(Ok(HeadBlock { number, fee_estimate })) => {
                                let health = match (writable, fee_estimate) {
                                    (false, _) => LedgerHealth::ReadOnly,
                                    (true, Some(_)) => LedgerHealth::Healthy,
                                    (true, None) => LedgerHealth::Degraded,
                                };
                                LedgerStatus {
                                    health,
                                    head_block: Some(number),
                                    fee_estimate,
                                }
                            }
                            _ => LedgerStatus {
                                health: LedgerHealth::Unreachable,
                                head_block: None,
                                fee_estimate: None,
                            },
                        }
                    }
                    _ => LedgerStatus {
                        health: LedgerHealth::Unreachable,
                        head_block: None,
                        fee_estimate: None,
                    },
                };
                (id, status)
            }
        });
        join_all(branches).await.into_iter().collect()
    }

    /// Get current verification metrics
    pub async fn metrics(&self) -> VerifierMetrics {
        self.metrics.read().await.clone()
    }

    async fn update_metrics(&self, start: Instant, consensus: bool, faults: u64) {
        let mut metrics = self.metrics.write().await;
        metrics.total_verifications += 1;
        if consensus {
            metrics.consensus_reached += 1;
        }
        metrics.failed_ledger_calls += faults;

        let elapsed = start.elapsed().as_secs_f64();
        metrics.avg_verify_time_secs = (metrics.avg_verify_time_secs
            * (metrics.total_verifications - 1) as f64
            + elapsed)
            / metrics.total_verifications as f64;
    }
}
