use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::LedgerId;

/// Multiplier applied when a ledger has no specific entry
pub const DEFAULT_FEE_MULTIPLIER: f64 = 1.2;

/// Fee used when the base-fee read fails
pub const DEFAULT_FALLBACK_FEE: u64 = 10_000;

/// Per-ledger fee/priority computation used before submission.
///
/// A higher-value or slower ledger gets a larger buffer on top of its base
/// fee to prioritize inclusion; a fast, cheap ledger gets a smaller one.
/// When the base-fee read fails the strategy falls back to a fixed fee
/// rather than failing the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStrategy {
    multipliers: HashMap<LedgerId, f64>,
    default_multiplier: f64,
    fallback_fee: u64,
}

impl Default for FeeStrategy {
    fn default() -> Self {
        Self {
            multipliers: HashMap::new(),
            default_multiplier: DEFAULT_FEE_MULTIPLIER,
            fallback_fee: DEFAULT_FALLBACK_FEE,
        }
    }
}

impl FeeStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multiplier(mut self, id: impl Into<LedgerId>, multiplier: f64) -> Self {
        self.multipliers.insert(id.into(), multiplier);
        self
    }

    pub fn with_fallback_fee(mut self, fee: u64) -> Self {
        self.fallback_fee = fee;
        self
    }

    pub fn multiplier(&self, id: &LedgerId) -> f64 {
        self.multipliers
            .get(id)
            .copied()
            .unwrap_or(self.default_multiplier)
    }

    /// Fee to use for a submission. Rounds up so the buffer never
    /// undershoots the base fee.
    pub fn estimate(&self, id: &LedgerId, base_fee: Option<u64>) -> u64 {
        match base_fee {
            Some(base) => (base as f64 * self.multiplier(id)).ceil() as u64,
            None => self.fallback_fee,
        }
    }
}
