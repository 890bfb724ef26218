use thiserror::Error;

/// Core crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// Ledger-level error
    #[error("Ledger error: {0}")]
    Ledger(#[from] crate::ledger::LedgerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Ledger(e) => e.is_retryable(),
            Error::Config(_) => false,
            Error::Serialization(_) => false,
        }
    }
}
