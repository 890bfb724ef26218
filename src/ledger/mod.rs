//! # Ledger Layer
//!
//! Per-ledger configuration, clients, and the error taxonomy shared by the
//! verification and submission layers.
//!
//! ## Core Components
//!
//! - [`LedgerConfig`] / [`LedgerRegistry`]: the static table of supported
//!   ledgers, loaded once from process configuration at startup and
//!   read-only afterwards.
//! - [`LedgerClient`]: the uniform capability set every ledger binding
//!   exposes: query recent matching events, read the chain head, submit a
//!   signed commitment. [`JsonRpcLedgerClient`] is the stock HTTP JSON-RPC
//!   implementation.
//! - [`CrossChainEvent`]: one immutable record per (ledger, attempt).
//! - [`LedgerError`]: the typed failure surface. Every RPC, timeout, or
//!   malformed-response failure is caught at this layer; nothing propagates
//!   past the verifier or submitter un-wrapped.
//!
//! ## Failure Isolation
//!
//! Callers above this layer treat each ledger as an independent branch: a
//! failing ledger resolves to a typed error for that ledger only and never
//! aborts the fan-in.

mod client;
mod config;
mod error;
mod event;
mod pool;
mod registry;
mod retry;
mod rpc;

pub use client::{
    ClientConfig, HeadBlock, LedgerClient, DEFAULT_LOOKBACK_BLOCKS, DEFAULT_RPC_TIMEOUT,
};
pub use config::{LedgerConfig, LedgerId};
pub use error::LedgerError;
pub use event::{CrossChainEvent, ExpectedPayload, PayloadMap};
pub use pool::{ClientPool, ClientState};
pub use registry::LedgerRegistry;
pub use retry::{with_retry, RetryConfig};
pub use rpc::JsonRpcLedgerClient;
