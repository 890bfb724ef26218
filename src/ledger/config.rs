use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique ledger identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(String);

impl LedgerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LedgerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LedgerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Static configuration for one supported ledger.
///
/// Loaded once at startup into the [`LedgerRegistry`](super::LedgerRegistry)
/// and never mutated; there is no hidden global chain table or environment
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Chain identifier
    pub id: LedgerId,
    /// Human-readable name for dashboards and logs
    pub display_name: String,
    /// RPC endpoint
    pub endpoint_url: String,
    /// Registration contract/program address; `None` means the ledger is
    /// read-only and skipped by the submitter
    #[serde(default)]
    pub contract_address: Option<String>,
    /// Block explorer base URL
    #[serde(default)]
    pub explorer_url: Option<String>,
    /// Expected block interval, used for dashboard staleness hints
    #[serde(default = "default_block_interval")]
    pub avg_block_interval_secs: u64,
}

fn default_block_interval() -> u64 {
    12
}

impl LedgerConfig {
    pub fn new(
        id: impl Into<LedgerId>,
        display_name: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            endpoint_url: endpoint_url.into(),
            contract_address: None,
            explorer_url: None,
            avg_block_interval_secs: default_block_interval(),
        }
    }

    pub fn with_contract(mut self, address: impl Into<String>) -> Self {
        self.contract_address = Some(address.into());
        self
    }

    pub fn with_explorer(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = Some(url.into());
        self
    }

    pub fn with_block_interval(mut self, secs: u64) -> Self {
        self.avg_block_interval_secs = secs;
        self
    }

    /// Whether the ledger accepts commitment submissions
    pub fn is_writable(&self) -> bool {
        self.contract_address.is_some()
    }

    /// Explorer link for a transaction, when an explorer is configured
    pub fn explorer_link(&self, tx_hash: &str) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}
