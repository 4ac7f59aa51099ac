//! Retry Policy
//!
//! Policy-based retries for delivery requests. Delays come from an
//! exponential backoff with jitter; the number of retries comes from the
//! client options.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use tokio::time::sleep;

use crate::config::DEFAULT_MAX_RETRY_ATTEMPTS;
use crate::error::{DeliveryError, Result};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt; values below zero disable retries
    pub max_retry_attempts: i32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
    /// Randomization factor applied to each delay (0.0 to 1.0)
    pub jitter_factor: f64,
    /// Custom retry condition function
    pub retry_condition: Option<fn(&DeliveryError) -> bool>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            retry_condition: None,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set retry attempts
    pub const fn with_max_retry_attempts(mut self, attempts: i32) -> Self {
        self.max_retry_attempts = attempts;
        self
    }

    /// Set initial delay
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set backoff multiplier
    pub const fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Set jitter factor
    pub const fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Set custom retry condition
    pub fn with_retry_condition(mut self, condition: fn(&DeliveryError) -> bool) -> Self {
        self.retry_condition = Some(condition);
        self
    }

    /// Total number of attempts, including the first one.
    pub fn total_attempts(&self) -> u32 {
        u32::try_from(self.max_retry_attempts).unwrap_or(0) + 1
    }

    /// Check if an error should be retried
    pub fn should_retry(&self, error: &DeliveryError) -> bool {
        if let Some(condition) = self.retry_condition {
            condition(error)
        } else {
            error.is_retryable()
        }
    }

    fn backoff(&self) -> backoff::ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_max_interval(self.max_delay)
            .with_multiplier(self.backoff_multiplier)
            .with_randomization_factor(self.jitter_factor)
            .with_max_elapsed_time(None)
            .build()
    }

    /// Execute an operation, retrying retryable failures.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = self.backoff();
        let total = self.total_attempts();
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if attempt >= total || !self.should_retry(&error) {
                        return Err(error);
                    }

                    let delay = backoff.next_backoff().unwrap_or(self.max_delay);
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying delivery request"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
