use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use super::LedgerError;

/// Bounded exponential backoff for transient ledger failures.
///
/// Applied only to errors reporting `is_retryable()`; a ledger that keeps
/// failing past the retry budget is marked conflicting for the attempt.
/// `max_retries = 0` disables retrying entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (0-based), with jitter
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64();
        let max = self.max_delay.as_secs_f64();
        let backoff = base * self.backoff_factor.powi(attempt as i32);

        let jitter_range = backoff * self.jitter_factor;
        let delay = if jitter_range > 0.0 {
            backoff + rand::thread_rng().gen_range(-jitter_range..jitter_range)
        } else {
            backoff
        };

        Duration::from_secs_f64(delay.clamp(0.0, max))
    }
}

/// Run a ledger operation, retrying transient failures per the config
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, LedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LedgerError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < config.max_retries => {
                let delay = config.delay_for(attempt);
                debug!(%error, attempt, ?delay, "retrying ledger call");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
