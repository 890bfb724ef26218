//! # Consensus Verification
//!
//! Fan-out/fan-in verification of a commitment across every registered
//! ledger, reduction into a single deterministic verdict, and continuous
//! monitoring until consensus settles.
//!
//! ## Components
//!
//! - [`ConsensusVerifier`]: fans `query_recent_matching` out to every
//!   ledger concurrently with per-branch isolation and timeout, compares
//!   payloads, and reduces the tagged branch outcomes into one
//!   [`VerificationResult`]. Also answers [`network_status`] queries for
//!   dashboard collaborators.
//! - [`ConfidenceScorer`]: the pure trust-weighted confidence formula,
//!   extracted so it is independently unit-testable.
//! - [`ConsensusMonitor`]: a cancellable polling task that re-runs
//!   verification at a fixed interval until the consensus threshold is met
//!   or the caller stops it.
//!
//! Confidence reflects certainty among the ledgers that verified, weighted
//! by trust; `consensus_reached` reflects quorum over all configured
//! ledgers. The two signals are independent.
//!
//! [`network_status`]: ConsensusVerifier::network_status

mod monitor;
mod result;
mod scorer;
mod verifier;

pub use monitor::{ConsensusMonitor, MonitorConfig, MonitorHandle, MonitorState};
pub use result::VerificationResult;
pub use scorer::{ConfidenceScorer, TrustWeights, DEFAULT_TRUST_WEIGHT};
pub use verifier::{
    ConsensusVerifier, LedgerHealth, LedgerOutcome, LedgerStatus, VerifierConfig, VerifierMetrics,
};
