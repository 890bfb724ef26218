use std::time::Duration;
use thiserror::Error;

use super::LedgerId;

/// Ledger-level errors
///
/// Every variant is caught at the client boundary and converted into a
/// "this ledger did not verify / did not submit" outcome by the layers
/// above; none of them aborts an overall verification or submission call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Network or RPC failure
    #[error("Ledger unreachable: {0}")]
    Unreachable(String),

    /// Per-branch timeout expired
    #[error("Ledger call timed out after {0:?}")]
    Timeout(Duration),

    /// Ledger has no contract binding configured for submission
    #[error("Ledger misconfigured: {0}")]
    Misconfigured(String),

    /// Valid response, no matching record found. Not a fault; a
    /// non-verifying outcome for the ledger.
    #[error("No matching event on ledger {0}")]
    NoMatchingEvent(LedgerId),

    /// An event was found but its payload differs from the expected one
    #[error("Payload mismatch on ledger {ledger}: field `{field}` differs")]
    PayloadMismatch { ledger: LedgerId, field: String },

    /// Broadcast or inclusion failure
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Response parsed but did not match the expected shape
    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),

    /// Referenced ledger id is not registered
    #[error("Unknown ledger: {0}")]
    UnknownLedger(LedgerId),
}

impl LedgerError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::Unreachable(_) | LedgerError::Timeout(_)
        )
    }

    /// Transport-class faults, as opposed to non-verifying outcomes such as
    /// [`LedgerError::NoMatchingEvent`] or [`LedgerError::PayloadMismatch`]
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            LedgerError::Unreachable(_)
                | LedgerError::Timeout(_)
                | LedgerError::MalformedResponse(_)
                | LedgerError::SubmissionFailed(_)
        )
    }
}
