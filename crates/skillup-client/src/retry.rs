//! Retry policy for idempotent reads

use crate::error::ApiResult;
use skillup_core::RetryConfig;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// How many times to try a read and how long to wait in between
///
/// Attempt `n` that fails with a retryable error waits `n * backoff` before
/// attempt `n + 1`. Errors that are not retryable return immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(500))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.backoff_ms))
    }
}

impl RetryPolicy {
    /// Policy with `max_attempts` total attempts (at least one)
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            backoff,
        }
    }

    /// Single attempt, no retries
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Total attempts
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait after failed attempt `attempt` (1-based)
    #[must_use]
    pub const fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }

    /// Run `call` until it succeeds, fails permanently or runs out of attempts
    ///
    /// The last error is returned when every attempt fails.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation, attempt, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?delay,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    if attempt > 1 {
                        error!(operation, attempts = attempt, error = %e, "all attempts failed");
                    }
                    return Err(e);
                }
            }
        }
    }
}
