//! # ledger-quorum
//!
//! Cross-ledger consensus verification engine. A policy-registration
//! commitment is cross-checked against several independent distributed
//! ledgers, each with its own finality speed, fee model, and trust weight.
//! Per-ledger results are collected independently and reduced into a single
//! deterministic [`VerificationResult`] carrying a weighted confidence score.
//! New commitments can be broadcast to all writable ledgers in parallel.
//!
//! The crate is a pure orchestration layer: it owns no wire protocol and no
//! persistence. Ledgers are reached through the [`LedgerClient`] trait; a
//! JSON-RPC implementation is provided, and new ledgers are added by
//! implementing the trait, never by branching on a chain id inside the
//! verifier.
//!
//! ```rust
//! use ledger_quorum::{
//!     ledger::{ClientPool, LedgerConfig, LedgerRegistry},
//!     verify::{ConsensusVerifier, TrustWeights},
//! };
//!
//! # fn example() {
//! let registry = LedgerRegistry::from_configs(vec![
//!     LedgerConfig::new("alpha", "Alpha Net", "https://rpc.alpha.example"),
//!     LedgerConfig::new("beta", "Beta Net", "https://rpc.beta.example"),
//! ]);
//! let pool = ClientPool::connect(&registry, &Default::default());
//! let verifier = ConsensusVerifier::new(registry, pool, TrustWeights::default());
//! # let _ = verifier;
//! # }
//! ```

pub mod error;
pub mod ledger;
pub mod submit;
pub mod verify;

// Re-exports
pub use ledger::{
    CrossChainEvent, ExpectedPayload, LedgerClient, LedgerConfig, LedgerError, LedgerId,
    LedgerRegistry,
};
pub use submit::{FeeStrategy, SignedCommitment, SigningKey, SubmissionReport, Submitter};
pub use verify::{
    ConfidenceScorer, ConsensusMonitor, ConsensusVerifier, MonitorHandle, TrustWeights,
    VerificationResult,
};

// Core types
pub type Result<T> = std::result::Result<T, Error>;
pub use error::Error;
