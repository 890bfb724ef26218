use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{
    ClientConfig, CrossChainEvent, HeadBlock, LedgerClient, LedgerConfig, LedgerError, LedgerId,
    PayloadMap,
};
use crate::submit::SignedCommitment;

/// Event record as returned by the registration endpoint
#[derive(Debug, Deserialize)]
struct RpcEvent {
    block_number: u64,
    block_hash: String,
    transaction_hash: String,
    timestamp_secs: u64,
    #[serde(default)]
    payload: PayloadMap,
}

impl RpcEvent {
    fn into_event(self, ledger_id: LedgerId) -> CrossChainEvent {
        CrossChainEvent::new(
            ledger_id,
            self.block_number,
            self.block_hash,
            self.transaction_hash,
            self.timestamp_secs,
            self.payload,
        )
    }
}

/// HTTP JSON-RPC ledger binding.
///
/// Every call is bounded by the configured RPC timeout; transport failures
/// map to [`LedgerError::Unreachable`], response-shape failures to
/// [`LedgerError::MalformedResponse`]. A client without a configured
/// contract address refuses submission with [`LedgerError::Misconfigured`].
pub struct JsonRpcLedgerClient {
    config: LedgerConfig,
    client_config: ClientConfig,
    http: reqwest::Client,
}

impl JsonRpcLedgerClient {
    pub fn new(config: LedgerConfig, client_config: ClientConfig) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(client_config.rpc_timeout)
            .build()
            .map_err(|e| LedgerError::Unreachable(e.to_string()))?;
        Ok(Self {
            config,
            client_config,
            http,
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(ledger = %self.config.id, method, "rpc call");

        let response = timeout(
            self.client_config.rpc_timeout,
            self.http.post(&self.config.endpoint_url).json(&body).send(),
        )
        .await
        .map_err(|_| LedgerError::Timeout(self.client_config.rpc_timeout))?
        .map_err(|e| LedgerError::Unreachable(e.to_string()))?;

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;

        if let Some(err) = envelope.get("error") {
            if !err.is_null() {
                warn!(ledger = %self.config.id, method, %err, "rpc error response");
                return Err(LedgerError::Unreachable(err.to_string()));
            }
        }
        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| LedgerError::MalformedResponse("missing `result` field".into()))
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    fn ledger_id(&self) -> &LedgerId {
        &self.config.id
    }

    async fn query_recent_matching(
        &self,
        commitment_hash: &str,
        lookback_blocks: u64,
    ) -> Result<Vec<CrossChainEvent>, LedgerError> {
        let result = self
            .call(
                "ledger_getCommitmentEvents",
                json!({
                    "commitment_hash": commitment_hash,
                    "contract_address": self.config.contract_address,
                    "lookback_blocks": lookback_blocks,
                }),
            )
            .await?;

        let events: Vec<RpcEvent> = serde_json::from_value(result)
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;
        Ok(events
            .into_iter()
            .map(|e| e.into_event(self.config.id.clone()))
            .collect())
    }

    async fn head_block(&self) -> Result<HeadBlock, LedgerError> {
        let result = self.call("ledger_head", json!([])).await?;
        serde_json::from_value(result).map_err(|e| LedgerError::MalformedResponse(e.to_string()))
    }

    async fn submit(&self, commitment: &SignedCommitment) -> Result<CrossChainEvent, LedgerError> {
        let contract = self.config.contract_address.as_ref().ok_or_else(|| {
            LedgerError::Misconfigured(format!(
                "ledger {} has no contract address configured",
                self.config.id
            ))
        })?;

        let result = self
            .call(
                "ledger_submitCommitment",
                json!({
                    "contract_address": contract,
                    "commitment": commitment,
                }),
            )
            .await
            .map_err(|e| match e {
                LedgerError::Unreachable(msg) => LedgerError::SubmissionFailed(msg),
                other => other,
            })?;

        let event: RpcEvent = serde_json::from_value(result)
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;
        Ok(event.into_event(self.config.id.clone()))
    }
}
