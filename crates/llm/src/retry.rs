use async_trait::async_trait;
use newsdesk_common::{NewsdeskError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::{LlmClient, LlmRequest, LlmResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Retries transient failures of the wrapped client with exponential backoff.
///
/// Only errors for which [`NewsdeskError::is_retryable`] holds are retried;
/// an upstream `Retry-After` takes precedence over the computed delay.
pub struct RetryingClient<T: LlmClient> {
    inner: T,
    config: RetryConfig,
}

impl<T: LlmClient> RetryingClient<T> {
    pub fn new(inner: T, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    fn compute_delay(&self, attempt: u32) -> u64 {
        let base = self.config.initial_delay_ms as f64
            * self.config.backoff_multiplier.powi(attempt as i32);
        let jitter = (base * 0.1 * jitter_fraction(attempt)) as u64;
        let delay = (base as u64).saturating_add(jitter);
        delay.min(self.config.max_delay_ms)
    }
}

/// Deterministic jitter in `[0, 1)` derived from the attempt number.
fn jitter_fraction(attempt: u32) -> f64 {
    let x = attempt.wrapping_mul(2654435761);
    (x % 100) as f64 / 100.0
}

#[async_trait]
impl<T: LlmClient> LlmClient for RetryingClient<T> {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let mut attempt = 0;
        loop {
            let err: NewsdeskError = match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if attempt >= self.config.max_retries || !err.is_retryable() {
                return Err(err);
            }

            let delay = err
                .retry_after_ms()
                .map(|ms| ms.min(self.config.max_delay_ms))
                .unwrap_or_else(|| self.compute_delay(attempt));

            warn!(
                attempt = attempt + 1,
                max_retries = self.config.max_retries,
                delay_ms = delay,
                error = %err,
                "Retrying LLM request"
            );

            tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
            attempt += 1;
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Fails with the given error until `failures` calls have been made.
    struct FlakyClient {
        calls: Arc<AtomicU32>,
        failures: u32,
        status: u16,
    }

    #[async_trait]
    impl LlmClient for FlakyClient {
        async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(NewsdeskError::Upstream {
                    status: self.status,
                    message: "flaky".into(),
                    retry_after: None,
                });
            }
            Ok(LlmResponse::text("flaky", "ok"))
        }
        fn model_name(&self) -> &str {
            "flaky"
        }
    }

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 30_000);
        assert!((config.backoff_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_delay_respects_max() {
        let client = RetryingClient::new(
            FlakyClient {
                calls: Arc::new(AtomicU32::new(0)),
                failures: 0,
                status: 500,
            },
            RetryConfig {
                max_retries: 5,
                initial_delay_ms: 500,
                max_delay_ms: 2000,
                backoff_multiplier: 10.0,
            },
        );
        assert!(client.compute_delay(5) <= 2000);
        assert!(client.compute_delay(0) >= 500);
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let client = RetryingClient::new(
            FlakyClient {
                calls: calls.clone(),
                failures: 2,
                status: 503,
            },
            fast_config(3),
        );

        let response = client.complete(LlmRequest::default()).await.unwrap();
        assert_eq!(response.content, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let client = RetryingClient::new(
            FlakyClient {
                calls: calls.clone(),
                failures: 10,
                status: 429,
            },
            fast_config(2),
        );

        assert!(client.complete(LlmRequest::default()).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let client = RetryingClient::new(
            FlakyClient {
                calls: calls.clone(),
                failures: 10,
                status: 401,
            },
            fast_config(3),
        );

        assert!(client.complete(LlmRequest::default()).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
