use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{FeeStrategy, SignedCommitment, SigningKey};
use crate::ledger::{CrossChainEvent, LedgerError, LedgerId, LedgerRegistry, PayloadMap};
use crate::ledger::{ClientPool, ClientState};

/// Settled outcome of one broadcast across all writable ledgers.
///
/// Failures are carried alongside the confirmations rather than dropped, so
/// callers (and tests) can assert on the per-ledger failure reason.
/// Read-only ledgers are never targeted; they land in `skipped`, not
/// `failed`.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    /// Inclusion events from ledgers that accepted the commitment
    pub confirmed: Vec<CrossChainEvent>,
    /// Per-ledger failures among the targeted ledgers
    pub failed: BTreeMap<LedgerId, LedgerError>,
    /// Read-only ledgers left out of the broadcast
    pub skipped: BTreeSet<LedgerId>,
}

impl SubmissionReport {
    /// Whether every targeted ledger confirmed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn confirmed_ledgers(&self) -> impl Iterator<Item = &LedgerId> {
        self.confirmed.iter().map(|e| &e.ledger_id)
    }
}

/// Parallel commitment broadcaster.
///
/// Every writable ledger gets its own isolated branch: fee estimate, sign,
/// broadcast, await inclusion. One ledger's failure never aborts or delays
/// the others; `submit_all` resolves once all branches have settled.
pub struct Submitter {
    registry: LedgerRegistry,
    pool: ClientPool,
    fees: FeeStrategy,
    branch_timeout: Duration,
}

impl Submitter {
    pub fn new(registry: LedgerRegistry, pool: ClientPool, fees: FeeStrategy) -> Self {
        Self {
            registry,
            pool,
            fees,
            branch_timeout: Duration::from_secs(30),
        }
    }

    /// Bound on one ledger's fee-read + broadcast + inclusion wait
    pub fn with_branch_timeout(mut self, branch_timeout: Duration) -> Self {
        self.branch_timeout = branch_timeout;
        self
    }

    /// Sign and broadcast the payload to every writable ledger in parallel.
    /// The signing key is used within this call only.
    pub async fn submit_all(&self, payload: PayloadMap, key: &SigningKey) -> SubmissionReport {
        let mut skipped = BTreeSet::new();
        let branches: Vec<_> = self
            .registry
            .all()
            .iter()
            .filter(|config| {
                if config.is_writable() {
                    true
                } else {
                    debug!(ledger = %config.id, "skipping read-only ledger");
                    skipped.insert(config.id.clone());
                    false
                }
            })
            .map(|config| {
                let id = config.id.clone();
                let payload = payload.clone();
                async move {
                    let outcome = self.submit_one(&id, payload, key).await;
                    (id, outcome)
                }
            })
            .collect();

        let mut confirmed = Vec::new();
        let mut failed = BTreeMap::new();
        for (id, outcome) in join_all(branches).await {
            match outcome {
                Ok(event) => {
                    info!(
                        ledger = %id,
                        tx = %event.transaction_hash,
                        block = event.block_number,
                        "commitment included"
                    );
                    confirmed.push(event);
                }
                Err(error) => {
                    warn!(ledger = %id, %error, "submission branch failed");
                    failed.insert(id, error);
                }
            }
        }

        info!(
            confirmed = confirmed.len(),
            failed = failed.len(),
            skipped = skipped.len(),
            "broadcast settled"
        );
        SubmissionReport {
            confirmed,
            failed,
            skipped,
        }
    }

    async fn submit_one(
        &self,
        id: &LedgerId,
        payload: PayloadMap,
        key: &SigningKey,
    ) -> Result<CrossChainEvent, LedgerError> {
        let client = match self.pool.get(id) {
            Some(ClientState::Ready(client)) => client.clone(),
            Some(ClientState::Unavailable(error)) => return Err(error.clone()),
            None => return Err(LedgerError::UnknownLedger(id.clone())),
        };

        // A failed base-fee read falls back to the fixed fee instead of
        // failing the branch.
        let base_fee = match timeout(self.branch_timeout, client.head_block()).await {
            Ok(Ok(head)) => head.fee_estimate,
            Ok(Err(error)) => {
                warn!(ledger = %id, %error, "base fee read failed, using fallback");
                None
            }
            Err(_) => {
                warn!(ledger = %id, "base fee read timed out, using fallback");
                None
            }
        };
        let fee = self.fees.estimate(id, base_fee);
        let commitment = SignedCommitment::seal(payload, key, fee);
        debug!(ledger = %id, fee, "broadcasting commitment");

        match timeout(self.branch_timeout, client.submit(&commitment)).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::Timeout(self.branch_timeout)),
        }
    }
}
