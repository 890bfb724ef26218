//! # Commitment Submission
//!
//! Signing and parallel broadcast of a commitment to every writable ledger.
//! Each ledger branch estimates its own fee through the [`FeeStrategy`],
//! signs the payload, broadcasts, and awaits inclusion, fully isolated from
//! the other branches; the call resolves once all branches have settled.
//! Signing keys are borrowed per call and never retained.

mod fees;
mod signer;
mod submitter;

pub use fees::{FeeStrategy, DEFAULT_FALLBACK_FEE, DEFAULT_FEE_MULTIPLIER};
pub use signer::{SignedCommitment, SigningKey};
pub use submitter::{SubmissionReport, Submitter};
