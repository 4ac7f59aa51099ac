//! Default resilience policy provider

use crate::retry::RetryPolicy;
use crate::traits::ResiliencePolicyProvider;

/// Exponential backoff retries with a fixed number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultResiliencePolicyProvider {
    max_retry_attempts: i32,
}

impl DefaultResiliencePolicyProvider {
    pub const fn new(max_retry_attempts: i32) -> Self {
        Self { max_retry_attempts }
    }

    pub const fn max_retry_attempts(&self) -> i32 {
        self.max_retry_attempts
    }
}

impl ResiliencePolicyProvider for DefaultResiliencePolicyProvider {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy::new().with_max_retry_attempts(self.max_retry_attempts)
    }
}
