//! Resilience policy trait

use crate::retry::RetryPolicy;

/// Supplies the retry policy that wraps API requests.
pub trait ResiliencePolicyProvider: Send + Sync {
    fn policy(&self) -> RetryPolicy;
}
