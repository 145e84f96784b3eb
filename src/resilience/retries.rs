//! Retry logic.
//!
//! # Responsibilities
//! - Re-run an operation while it fails with a transient error
//! - Cap the number of attempts; the cap is a count, not a deadline
//! - Log every retry
//!
//! # Design Decisions
//! - Fixed delay between attempts, no backoff growth
//! - Only `ErrorKind::Transient` failures are retried
//! - Only the last error reaches the caller; earlier ones are in the log

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::classify::Retryable;

/// Component tag carried by retry log events.
pub const RETRY_COMPONENT: &str = "execution_context";

/// Bounded retry with a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; zero is treated as one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of attempts.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    tracing::warn!(
                        component = RETRY_COMPONENT,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Retrying after temporary connection problem"
                    );
                    metrics::record_retry();
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
