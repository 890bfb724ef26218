use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::{ClientConfig, JsonRpcLedgerClient, LedgerClient, LedgerError, LedgerId, LedgerRegistry};

/// Per-ledger client slot.
///
/// A client whose construction failed at startup stays `Unavailable` and is
/// treated as permanently conflicting for every verification call.
#[derive(Clone)]
pub enum ClientState {
    Ready(Arc<dyn LedgerClient>),
    Unavailable(LedgerError),
}

/// Startup-built map of ledger clients, shared by the verifier and the
/// submitter
#[derive(Clone, Default)]
pub struct ClientPool {
    clients: HashMap<LedgerId, ClientState>,
}

impl ClientPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a JSON-RPC client for every registered ledger, keeping
    /// construction failures as unavailable slots instead of aborting
    pub fn connect(registry: &LedgerRegistry, client_config: &ClientConfig) -> Self {
        let mut pool = Self::new();
        for config in registry.all() {
            let state = match JsonRpcLedgerClient::new(config.clone(), client_config.clone()) {
                Ok(client) => ClientState::Ready(Arc::new(client)),
                Err(error) => {
                    warn!(ledger = %config.id, %error, "ledger client construction failed");
                    ClientState::Unavailable(error)
                }
            };
            pool.insert(config.id.clone(), state);
        }
        pool
    }

    pub fn insert(&mut self, id: LedgerId, state: ClientState) {
        self.clients.insert(id, state);
    }

    /// Register a ready client, typically a custom [`LedgerClient`]
    /// implementation
    pub fn insert_client(&mut self, id: LedgerId, client: Arc<dyn LedgerClient>) {
        self.clients.insert(id, ClientState::Ready(client));
    }

    pub fn get(&self, id: &LedgerId) -> Option<&ClientState> {
        self.clients.get(id)
    }
}
