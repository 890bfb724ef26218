use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ledger::LedgerId;

/// Reduced verdict of one verification attempt across all ledgers.
///
/// Derived and stateless; recomputed on every call and never persisted by
/// this subsystem. `verified_ledgers` and `conflicting_ledgers` are always
/// disjoint, and `confidence` is clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the commitment is considered valid (quorum reached)
    pub is_valid: bool,
    /// Trust-weighted confidence among verifying ledgers, 0–100
    pub confidence: f64,
    /// Ledgers that produced a verified matching event
    pub verified_ledgers: BTreeSet<LedgerId>,
    /// Ledgers that produced no event, a non-matching event, or an error
    pub conflicting_ledgers: BTreeSet<LedgerId>,
    /// Whether a majority of configured ledgers verified
    pub consensus_reached: bool,
}

impl VerificationResult {
    /// Number of verifying ledgers required for consensus: `ceil(total / 2)`
    pub fn quorum(total_ledgers: usize) -> usize {
        total_ledgers.div_ceil(2)
    }

    /// Definitive negative result, used when no ledgers are registered or
    /// every branch failed
    pub fn negative(conflicting_ledgers: BTreeSet<LedgerId>) -> Self {
        Self {
            is_valid: false,
            confidence: 0.0,
            verified_ledgers: BTreeSet::new(),
            conflicting_ledgers,
            consensus_reached: false,
        }
    }
}
