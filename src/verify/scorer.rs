use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::{CrossChainEvent, LedgerId};

/// Trust weight assumed for ledgers absent from the table
pub const DEFAULT_TRUST_WEIGHT: f64 = 0.5;

/// Static trust-weight table, ledger id → weight in `0.0..=1.0`.
///
/// Fixed at configuration time; weights outside the range are clamped on
/// insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustWeights {
    weights: HashMap<LedgerId, f64>,
    default_weight: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            weights: HashMap::new(),
            default_weight: DEFAULT_TRUST_WEIGHT,
        }
    }
}

impl TrustWeights {
    pub fn new(weights: HashMap<LedgerId, f64>) -> Self {
        let mut table = Self::default();
        for (id, weight) in weights {
            table.insert(id, weight);
        }
        table
    }

    pub fn with_weight(mut self, id: impl Into<LedgerId>, weight: f64) -> Self {
        self.insert(id.into(), weight);
        self
    }

    pub fn insert(&mut self, id: LedgerId, weight: f64) {
        self.weights.insert(id, weight.clamp(0.0, 1.0));
    }

    pub fn weight(&self, id: &LedgerId) -> f64 {
        self.weights.get(id).copied().unwrap_or(self.default_weight)
    }
}

/// Weighted consensus confidence over a set of per-ledger outcomes.
///
/// Pure and stateless: `Σ(w_i · 100) / Σ(w_i)` over verified events only,
/// 0 when nothing verified or the verifying weights sum to zero. Confidence
/// reflects certainty among the ledgers that answered; quorum is a separate
/// signal carried by the verification result.
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn score(events: &[CrossChainEvent], weights: &TrustWeights) -> f64 {
        let mut numerator = 0.0;
        let mut total_weight = 0.0;
        for event in events.iter().filter(|e| e.verified) {
            let weight = weights.weight(&event.ledger_id);
            numerator += weight * 100.0;
            total_weight += weight;
        }
        if total_weight <= 0.0 {
            return 0.0;
        }
        (numerator / total_weight).clamp(0.0, 100.0)
    }
}
