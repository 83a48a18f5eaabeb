//! Batch transformation client.

use crate::TransformMetrics;
use crate::reconcile::reconcile;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use vitrine_core::{
    BatchReport, DispatchStrategy, MediaArtifact, TransformOperation, TransformRequest,
    TransformResult,
};
use vitrine_error::{MediaServiceError, MediaServiceResult};
use vitrine_interface::MediaProcessingService;

/// Default total budget for one outbound call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Turns transformation requests into complete, ordered batch reports.
///
/// The client never returns an error from a transformation. Transport
/// failures, service failures, timeouts and malformed responses are all
/// converted into the fallback result for the affected item, so a report
/// always holds exactly one usable result per input, in input order.
///
/// The client holds no state between calls and performs no retries; wrap
/// the service in [`RetryingService`](crate::RetryingService) for that.
///
/// # Example
///
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use vitrine_core::{MediaArtifact, TransformOperation, TransformRequest};
/// use vitrine_transform::{HttpMediaService, ServiceConfig, TransformClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = HttpMediaService::new(&ServiceConfig::default())?;
/// let client = TransformClient::new(service);
///
/// let artifact = MediaArtifact::from_path("pastilha.png").await?;
/// let request = TransformRequest::new(TransformOperation::RemoveBackground, vec![artifact])?;
/// let report = client.transform(request, &CancellationToken::new()).await;
///
/// for result in &report {
///     println!("{}: succeeded={}", result.filename(), result.succeeded());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TransformClient<S> {
    service: S,
    call_timeout: Duration,
}

impl<S> TransformClient<S>
where
    S: MediaProcessingService,
{
    /// Creates a client over a media processing service.
    pub fn new(service: S) -> Self {
        Self {
            service,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Sets the total time allowed for each outbound call.
    ///
    /// A call still pending when its timeout elapses is abandoned and
    /// treated as a transport failure.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Total time allowed for each outbound call.
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Transforms every artifact of a request, choosing the dispatch strategy
    /// from its operation.
    #[instrument(skip_all, fields(operation = %request.operation(), count = request.len()))]
    pub async fn transform(
        &self,
        request: TransformRequest,
        cancel: &CancellationToken,
    ) -> BatchReport {
        let (operation, artifacts) = request.into_parts();

        match operation.dispatch_strategy() {
            DispatchStrategy::Batched => {
                self.transform_batch_remove_background(&artifacts, cancel)
                    .await
            }
            DispatchStrategy::Sequential => {
                self.transform_batch_sequential(&artifacts, operation, cancel)
                    .await
            }
        }
    }

    /// Transforms a single artifact with one outbound call.
    ///
    /// On any failure the result carries the original artifact.
    #[instrument(skip(self, artifact), fields(filename = %artifact.filename()))]
    pub async fn transform_single(
        &self,
        artifact: &MediaArtifact,
        operation: TransformOperation,
    ) -> TransformResult {
        let outcome = self
            .timed_call(
                operation,
                DispatchStrategy::Sequential,
                self.service.transform(operation, artifact),
            )
            .await;

        settle(artifact, operation, outcome)
    }

    /// Removes backgrounds from all artifacts with a single outbound call.
    ///
    /// Outcomes are re-associated with the inputs by filename. An input the
    /// response does not confirm, or every input when the call itself
    /// fails, gets the fallback result.
    #[instrument(skip_all, fields(count = artifacts.len()))]
    pub async fn transform_batch_remove_background(
        &self,
        artifacts: &[MediaArtifact],
        cancel: &CancellationToken,
    ) -> BatchReport {
        let operation = TransformOperation::RemoveBackground;

        if artifacts.is_empty() {
            return BatchReport::new(Vec::new());
        }
        if cancel.is_cancelled() {
            info!("Batch cancelled before dispatch, returning originals");
            return cancelled_report(artifacts, operation);
        }

        let outcome = self
            .timed_call(
                operation,
                DispatchStrategy::Batched,
                self.service.remove_background_batch(artifacts),
            )
            .await;

        let results = match outcome {
            Ok(outcomes) => reconcile(artifacts, outcomes)
                .into_iter()
                .zip(artifacts)
                .map(|(item, artifact)| settle(artifact, operation, item))
                .collect(),
            Err(e) => {
                warn!(
                    error = %e,
                    failure = e.kind.failure_class(),
                    "Batch background removal failed, returning originals"
                );
                artifacts
                    .iter()
                    .map(|artifact| fall_back(artifact, operation, e.kind.failure_class()))
                    .collect()
            }
        };

        let report = BatchReport::new(results);
        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "Batch background removal finished"
        );
        report
    }

    /// Applies the combined treatment to each artifact, one call at a time.
    #[instrument(skip_all, fields(count = artifacts.len()))]
    pub async fn transform_batch_combined_treatment(
        &self,
        artifacts: &[MediaArtifact],
        cancel: &CancellationToken,
    ) -> BatchReport {
        self.transform_batch_sequential(artifacts, TransformOperation::CombinedTreatment, cancel)
            .await
    }

    /// Applies `operation` to each artifact with one call per artifact.
    ///
    /// Each call is awaited before the next is issued, so at most one call
    /// is in flight. A failure affects only its own item. Cancellation is
    /// checked before each call; items not yet started when it is observed
    /// get the fallback result, while the call in flight runs to completion.
    #[instrument(skip(self, artifacts, cancel), fields(count = artifacts.len()))]
    pub async fn transform_batch_sequential(
        &self,
        artifacts: &[MediaArtifact],
        operation: TransformOperation,
        cancel: &CancellationToken,
    ) -> BatchReport {
        let mut slots: Vec<Option<TransformResult>> = vec![None; artifacts.len()];

        for (index, artifact) in artifacts.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    remaining = artifacts.len() - index,
                    "Batch cancelled, returning originals for remaining items"
                );
                break;
            }
            slots[index] = Some(self.transform_single(artifact, operation).await);
        }

        let results: Vec<TransformResult> = slots
            .into_iter()
            .zip(artifacts)
            .map(|(slot, artifact)| {
                slot.unwrap_or_else(|| fall_back(artifact, operation, "cancelled"))
            })
            .collect();

        let report = BatchReport::new(results);
        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "Sequential batch finished"
        );
        report
    }

    async fn timed_call<T, F>(
        &self,
        operation: TransformOperation,
        strategy: DispatchStrategy,
        call: F,
    ) -> MediaServiceResult<T>
    where
        F: Future<Output = MediaServiceResult<T>>,
    {
        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(MediaServiceError::transport(format!(
                "No response from {} within {:?}",
                self.service.service_name(),
                self.call_timeout
            ))),
        };

        TransformMetrics::get().record_call(operation, strategy, start.elapsed().as_secs_f64());
        outcome
    }
}

/// Converts one call outcome into a result, falling back on any failure.
fn settle(
    artifact: &MediaArtifact,
    operation: TransformOperation,
    outcome: MediaServiceResult<Vec<u8>>,
) -> TransformResult {
    let error = match outcome {
        Ok(bytes) => match TransformResult::success(artifact, bytes) {
            Some(result) => {
                debug!(
                    filename = %artifact.filename(),
                    operation = %operation,
                    original_size = result.original_size(),
                    final_size = result.final_size(),
                    quality_ratio = result.quality_ratio(),
                    "Artifact transformed"
                );
                TransformMetrics::get().record_success(
                    operation,
                    *result.original_size(),
                    *result.final_size(),
                );
                return result;
            }
            None => MediaServiceError::malformed("service returned an empty payload"),
        },
        Err(e) => e,
    };

    warn!(
        filename = %artifact.filename(),
        operation = %operation,
        failure = error.kind.failure_class(),
        error = %error,
        "Transform failed, returning original"
    );
    fall_back(artifact, operation, error.kind.failure_class())
}

fn fall_back(
    artifact: &MediaArtifact,
    operation: TransformOperation,
    failure_class: &'static str,
) -> TransformResult {
    TransformMetrics::get().record_fallback(operation, failure_class);
    TransformResult::fallback(artifact)
}

fn cancelled_report(artifacts: &[MediaArtifact], operation: TransformOperation) -> BatchReport {
    BatchReport::new(
        artifacts
            .iter()
            .map(|artifact| fall_back(artifact, operation, "cancelled"))
            .collect(),
    )
}
