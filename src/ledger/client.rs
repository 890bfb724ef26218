use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CrossChainEvent, LedgerError, LedgerId};
use crate::submit::SignedCommitment;

/// Default lookback window for event queries, roughly the last ~1000 blocks
pub const DEFAULT_LOOKBACK_BLOCKS: u64 = 1000;

/// Default per-call RPC timeout
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Chain head snapshot used for status reporting and fee computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadBlock {
    /// Current block number
    pub number: u64,
    /// Base fee estimate in the ledger's native unit, when the ledger
    /// reports one
    pub fee_estimate: Option<u64>,
}

/// Client-side tuning shared by all ledger bindings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// How many recent blocks to scan for matching events
    pub lookback_blocks: u64,
    /// Hard bound on any single RPC call
    pub rpc_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lookback_blocks: DEFAULT_LOOKBACK_BLOCKS,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

/// Uniform capability set for one ledger binding.
///
/// Each ledger's SDK surface (query logs, read head, broadcast tx) is
/// expressed through this one interface so the verifier and submitter stay
/// chain-agnostic; a new ledger is added by implementing the trait. Every
/// RPC, network, timeout, or malformed-response failure must be caught
/// inside the implementation and surfaced as a typed [`LedgerError`].
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Ledger this client is bound to
    fn ledger_id(&self) -> &LedgerId;

    /// Query registration events matching the commitment hash within the
    /// last `lookback_blocks` blocks. An empty list is a valid outcome, not
    /// an error.
    async fn query_recent_matching(
        &self,
        commitment_hash: &str,
        lookback_blocks: u64,
    ) -> Result<Vec<CrossChainEvent>, LedgerError>;

    /// Read the chain head and current fee estimate
    async fn head_block(&self) -> Result<HeadBlock, LedgerError>;

    /// Broadcast a signed commitment and wait for inclusion
    async fn submit(&self, commitment: &SignedCommitment) -> Result<CrossChainEvent, LedgerError>;
}
