//! Retry policy wrapper for media processing services.

use crate::RetryConfig;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialFactorBackoff, strategy::jitter};
use tracing::{instrument, warn};
use vitrine_core::{MediaArtifact, TransformOperation};
use vitrine_error::{MediaServiceResult, RetryableError};
use vitrine_interface::{BatchItemOutcome, Health, MediaProcessingService, ServiceStatus};

/// Service wrapper that retries transient failures with exponential backoff.
///
/// Only errors whose [`RetryableError::is_retryable`] returns true are
/// retried. The transform client stays unaware of retries; it sees one
/// call that either succeeds or fails after the policy gives up.
#[derive(Debug, Clone)]
pub struct RetryingService<S> {
    inner: S,
    policy: RetryConfig,
}

impl<S> RetryingService<S> {
    /// Wraps `inner` with a retry policy.
    pub fn new(inner: S, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }

    /// The wrapped service.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Delays before each retry: the initial backoff, doubling, capped at the max delay.
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        let max_delay = Duration::from_secs(*self.policy.max_delay_secs());
        ExponentialFactorBackoff::from_millis(*self.policy.initial_backoff_ms(), 2.0)
            .map(move |delay| delay.min(max_delay))
            .take(*self.policy.max_retries())
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> {
        self.backoff().map(jitter)
    }

    async fn run<T, F, Fut>(&self, mut attempt: F) -> MediaServiceResult<T>
    where
        F: FnMut() -> Fut + Send + Sync,
        Fut: Future<Output = MediaServiceResult<T>>,
    {
        Retry::spawn(self.strategy(), || {
            let call = attempt();
            async move {
                match call.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, "Media service call failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await
    }
}

#[async_trait]
impl<S> MediaProcessingService for RetryingService<S>
where
    S: MediaProcessingService,
{
    #[instrument(skip(self, artifact), fields(filename = %artifact.filename()))]
    async fn transform(
        &self,
        operation: TransformOperation,
        artifact: &MediaArtifact,
    ) -> MediaServiceResult<Vec<u8>> {
        self.run(|| self.inner.transform(operation, artifact)).await
    }

    #[instrument(skip_all, fields(count = artifacts.len()))]
    async fn remove_background_batch(
        &self,
        artifacts: &[MediaArtifact],
    ) -> MediaServiceResult<Vec<BatchItemOutcome>> {
        self.run(|| self.inner.remove_background_batch(artifacts))
            .await
    }

    fn service_name(&self) -> &str {
        self.inner.service_name()
    }
}

#[async_trait]
impl<S> Health for RetryingService<S>
where
    S: Health,
{
    async fn health(&self) -> MediaServiceResult<ServiceStatus> {
        self.inner.health().await
    }
}
