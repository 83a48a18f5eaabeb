//! Trait definitions for media processing backends.

use crate::{BatchItemOutcome, ServiceStatus};
use async_trait::async_trait;
use std::sync::Arc;
use vitrine_core::{MediaArtifact, TransformOperation};
use vitrine_error::MediaServiceResult;

/// Request/response capability exposed by the remote media processing service.
///
/// Implementations report every failure as an error value. They never
/// retry on their own; retry policies wrap a service from the outside.
#[async_trait]
pub trait MediaProcessingService: Send + Sync {
    /// Apply one operation to one artifact, returning the output payload.
    async fn transform(
        &self,
        operation: TransformOperation,
        artifact: &MediaArtifact,
    ) -> MediaServiceResult<Vec<u8>>;

    /// Remove the background from many artifacts in one call.
    ///
    /// The outcomes name the artifact they belong to by filename. They may
    /// arrive in any order and may omit artifacts.
    async fn remove_background_batch(
        &self,
        artifacts: &[MediaArtifact],
    ) -> MediaServiceResult<Vec<BatchItemOutcome>>;

    /// Service name for logs and metrics (e.g., "http").
    fn service_name(&self) -> &str;
}

/// Trait for services that can report their availability.
#[async_trait]
pub trait Health: MediaProcessingService {
    /// Check if the service is reachable and functioning.
    async fn health(&self) -> MediaServiceResult<ServiceStatus>;
}

#[async_trait]
impl<S> MediaProcessingService for Arc<S>
where
    S: MediaProcessingService + ?Sized,
{
    async fn transform(
        &self,
        operation: TransformOperation,
        artifact: &MediaArtifact,
    ) -> MediaServiceResult<Vec<u8>> {
        (**self).transform(operation, artifact).await
    }

    async fn remove_background_batch(
        &self,
        artifacts: &[MediaArtifact],
    ) -> MediaServiceResult<Vec<BatchItemOutcome>> {
        (**self).remove_background_batch(artifacts).await
    }

    fn service_name(&self) -> &str {
        (**self).service_name()
    }
}
