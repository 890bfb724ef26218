use serde::{Deserialize, Serialize};
use tracing::info;

use super::{LedgerConfig, LedgerError, LedgerId};

/// Static table of supported ledger configurations.
///
/// Populated once at process start from explicit configuration and read-only
/// afterwards; it may be freely shared and read concurrently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerRegistry {
    configs: Vec<LedgerConfig>,
}

impl LedgerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a configuration list
    pub fn from_configs(configs: Vec<LedgerConfig>) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.register(config);
        }
        registry
    }

    /// Build a registry from a JSON configuration document
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        let configs: Vec<LedgerConfig> = serde_json::from_str(raw)?;
        for config in &configs {
            if config.id.as_str().is_empty() {
                return Err(crate::Error::Config(
                    "ledger config with an empty id".into(),
                ));
            }
            if config.endpoint_url.is_empty() {
                return Err(crate::Error::Config(format!(
                    "ledger {} has an empty endpoint_url",
                    config.id
                )));
            }
        }
        Ok(Self::from_configs(configs))
    }

    /// Register a ledger. Re-registering an existing id replaces its
    /// configuration (last write wins).
    pub fn register(&mut self, config: LedgerConfig) {
        info!(ledger = %config.id, writable = config.is_writable(), "registering ledger");
        if let Some(existing) = self.configs.iter_mut().find(|c| c.id == config.id) {
            *existing = config;
        } else {
            self.configs.push(config);
        }
    }

    /// All registered ledgers, in registration order
    pub fn all(&self) -> &[LedgerConfig] {
        &self.configs
    }

    /// Look up a ledger by id
    pub fn get(&self, id: &LedgerId) -> Result<&LedgerConfig, LedgerError> {
        self.configs
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| LedgerError::UnknownLedger(id.clone()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &LedgerId> {
        self.configs.iter().map(|c| &c.id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
