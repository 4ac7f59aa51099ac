//! Request execution through the resilience policy.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use delivery_client::prelude::*;

use support::PROJECT_ID;

struct FastRetries(i32);

impl ResiliencePolicyProvider for FastRetries {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retry_attempts(self.0)
            .with_initial_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(2))
    }
}

fn client(resilient: bool, retries: i32) -> DeliveryClient {
    DeliveryClientBuilder::new()
        .with_delivery_options(|options| {
            let options = options.with_project_id(PROJECT_ID)?;
            Ok(if resilient {
                options.enable_resilience_logic()
            } else {
                options
            })
        })
        .unwrap()
        .with_resilience_policy_provider(Arc::new(FastRetries(retries)) as Arc<dyn ResiliencePolicyProvider>)
        .build()
        .unwrap()
}

async fn run_failing(client: &DeliveryClient, fail_until: u32) -> (Result<&'static str>, u32) {
    let attempts = Arc::new(AtomicU32::new(0));
    let result = client
        .execute_with_resilience(|| {
            let attempts = attempts.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= fail_until {
                    Err(DeliveryError::http(Some(500), format!("forced failure attempt {n}")))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;
    (result, attempts.load(Ordering::SeqCst))
}

#[tokio::test]
async fn resilient_client_retries_until_success() {
    let (result, attempts) = run_failing(&client(true, 3), 2).await;
    assert_eq!(result.unwrap(), "ok");
    assert_eq!(attempts, 3);
}

#[tokio::test]
async fn resilient_client_gives_up_after_max_retries() {
    let (result, attempts) = run_failing(&client(true, 2), 10).await;
    assert!(matches!(result, Err(DeliveryError::Http { status: Some(500), .. })));
    assert_eq!(attempts, 3);
}

#[tokio::test]
async fn negative_retries_mean_a_single_attempt() {
    let (result, attempts) = run_failing(&client(true, -4), 10).await;
    assert!(result.is_err());
    assert_eq!(attempts, 1);
}

#[tokio::test]
async fn resilience_disabled_runs_once() {
    let (result, attempts) = run_failing(&client(false, 5), 1).await;
    assert!(result.is_err());
    assert_eq!(attempts, 1);
}

#[tokio::test]
async fn invalid_request_is_not_retried() {
    let client = client(true, 3);
    let attempts = Arc::new(AtomicU32::new(0));
    let result: Result<()> = client
        .execute_with_resilience(|| {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                let err = reqwest::Client::new().get("not a url").build().unwrap_err();
                Err(DeliveryError::from(err))
            }
        })
        .await;

    assert!(matches!(result, Err(DeliveryError::Http { status: None, .. })));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connection_failures_are_retried() {
    let client = client(true, 2);
    let attempts = Arc::new(AtomicU32::new(0));
    let result: Result<()> = client
        .execute_with_resilience(|| {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(DeliveryError::Connection("connection refused".into()))
            }
        })
        .await;

    assert!(matches!(result, Err(DeliveryError::Connection(_))));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}
