use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::{ConsensusVerifier, VerificationResult};
use crate::ledger::ExpectedPayload;

/// Monitor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorState {
    /// Still polling
    Polling,
    /// Consensus threshold met, polling stopped
    Settled,
    /// Explicitly cancelled by the caller
    Stopped,
}

/// Monitor tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Interval between verification ticks
    pub poll_interval: Duration,
    /// Confidence the result must exceed, together with consensus, for the
    /// monitor to settle
    pub confidence_threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            confidence_threshold: 95.0,
        }
    }
}

/// Repeating verification poller.
///
/// One tick at a time: a tick runs `verify` to completion before the next
/// interval fires, so ticks never overlap. The task settles on its own when
/// `consensus_reached && confidence > threshold`, and the caller can cancel
/// it at any point through the returned [`MonitorHandle`].
pub struct ConsensusMonitor {
    verifier: Arc<ConsensusVerifier>,
    config: MonitorConfig,
}

impl ConsensusMonitor {
    pub fn new(verifier: Arc<ConsensusVerifier>) -> Self {
        Self::with_config(verifier, MonitorConfig::default())
    }

    pub fn with_config(verifier: Arc<ConsensusVerifier>, config: MonitorConfig) -> Self {
        Self { verifier, config }
    }

    /// Begin polling. The first tick fires immediately; `on_update` is
    /// invoked with every tick's result until settlement or cancellation.
    pub fn start<F>(
        &self,
        commitment_hash: impl Into<String>,
        expected: ExpectedPayload,
        mut on_update: F,
    ) -> MonitorHandle
    where
        F: FnMut(VerificationResult) + Send + 'static,
    {
        let commitment_hash = commitment_hash.into();
        let verifier = self.verifier.clone();
        let config = self.config.clone();
        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel_rx.changed() => {
                        info!(commitment = %commitment_hash, "consensus monitor cancelled");
                        return MonitorState::Stopped;
                    }
                    _ = ticker.tick() => {
                        let result = verifier.verify(&commitment_hash, &expected).await;
                        // Cancellation may have landed mid-tick; honor it
                        // before surfacing the result.
                        if *cancel_rx.borrow() {
                            info!(commitment = %commitment_hash, "consensus monitor cancelled");
                            return MonitorState::Stopped;
                        }
                        let settled = result.consensus_reached
                            && result.confidence > config.confidence_threshold;
                        on_update(result);
                        if settled {
                            info!(commitment = %commitment_hash, "consensus monitor settled");
                            return MonitorState::Settled;
                        }
                    }
                }
            }
        });

        MonitorHandle {
            cancel: cancel_tx,
            task,
        }
    }
}

/// Handle to a running monitor task
pub struct MonitorHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<MonitorState>,
}

impl MonitorHandle {
    /// Cancel the monitor and wait for the task to wind down. Safe to call
    /// at any time, including mid-tick; once it returns, no further
    /// `on_update` calls will occur.
    pub async fn stop(self) -> MonitorState {
        let _ = self.cancel.send(true);
        self.join().await
    }

    /// Wait for the monitor to finish on its own (settlement or an earlier
    /// cancellation)
    pub async fn join(self) -> MonitorState {
        match self.task.await {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "monitor task aborted");
                MonitorState::Stopped
            }
        }
    }

    /// Whether the underlying task has already finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
