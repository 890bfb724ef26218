use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::LedgerId;

/// Opaque event payload, keyed by ledger-side field names
pub type PayloadMap = serde_json::Map<String, Value>;

/// One registration event as observed on (or submitted to) a single ledger.
///
/// Exactly one instance exists per (ledger, attempt); a new verification or
/// submission attempt always produces a new instance, never an update in
/// place. Aggregation across ledgers happens only in
/// [`VerificationResult`](crate::verify::VerificationResult).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChainEvent {
    /// Ledger the event belongs to
    pub ledger_id: LedgerId,
    /// Inclusion block number
    pub block_number: u64,
    /// Inclusion block hash
    pub block_hash: String,
    /// Transaction hash
    pub transaction_hash: String,
    /// Ledger-reported timestamp, seconds since epoch
    pub timestamp_secs: u64,
    /// Opaque event payload
    pub payload: PayloadMap,
    /// Whether the payload matched the expected commitment
    pub verified: bool,
    /// Verification/submission attempt this event belongs to
    pub attempt: Uuid,
}

impl CrossChainEvent {
    pub fn new(
        ledger_id: LedgerId,
        block_number: u64,
        block_hash: impl Into<String>,
        transaction_hash: impl Into<String>,
        timestamp_secs: u64,
        payload: PayloadMap,
    ) -> Self {
        Self {
            ledger_id,
            block_number,
            block_hash: block_hash.into(),
            transaction_hash: transaction_hash.into(),
            timestamp_secs,
            payload,
            verified: false,
            attempt: Uuid::new_v4(),
        }
    }
}

/// Payload fields a ledger event must reproduce exactly for the event to
/// count as verified. The key set is fixed: commitment hash, zk-commitment
/// value, and the trust score attached by the policy-validation
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedPayload {
    pub hash: String,
    pub commitment: String,
    pub trust_score: u64,
}

impl ExpectedPayload {
    pub const KEY_HASH: &'static str = "hash";
    pub const KEY_COMMITMENT: &'static str = "commitment";
    pub const KEY_TRUST_SCORE: &'static str = "trust_score";

    pub fn new(
        hash: impl Into<String>,
        commitment: impl Into<String>,
        trust_score: u64,
    ) -> Self {
        Self {
            hash: hash.into(),
            commitment: commitment.into(),
            trust_score,
        }
    }

    /// Exact-match comparison over the fixed key set. Returns the first
    /// field that differs, or `None` when the payload matches.
    pub fn mismatch(&self, payload: &PayloadMap) -> Option<&'static str> {
        if payload.get(Self::KEY_HASH).and_then(Value::as_str) != Some(self.hash.as_str()) {
            return Some(Self::KEY_HASH);
        }
        if payload.get(Self::KEY_COMMITMENT).and_then(Value::as_str)
            != Some(self.commitment.as_str())
        {
            return Some(Self::KEY_COMMITMENT);
        }
        if payload.get(Self::KEY_TRUST_SCORE).and_then(Value::as_u64) != Some(self.trust_score) {
            return Some(Self::KEY_TRUST_SCORE);
        }
        None
    }

    /// Render the expected fields as an event payload, used when
    /// broadcasting a new commitment.
    pub fn to_payload(&self) -> PayloadMap {
        let mut map = PayloadMap::new();
        map.insert(Self::KEY_HASH.into(), Value::String(self.hash.clone()));
        map.insert(
            Self::KEY_COMMITMENT.into(),
            Value::String(self.commitment.clone()),
        );
        map.insert(Self::KEY_TRUST_SCORE.into(), Value::from(self.trust_score));
        map
    }
}
