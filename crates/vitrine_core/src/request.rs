//! Transformation requests.

use crate::{MediaArtifact, TransformOperation};
use derive_getters::Getters;
use vitrine_error::{BuilderError, BuilderErrorKind};

/// One operation applied to an ordered, non-empty sequence of artifacts.
///
/// Artifact order is significant: the report produced for this request
/// lists one result per artifact in exactly this order.
///
/// # Examples
///
/// ```
/// use vitrine_core::{MediaArtifact, TransformOperation, TransformRequest};
///
/// let request = TransformRequest::builder()
///     .operation(TransformOperation::Upscale)
///     .artifacts(vec![MediaArtifact::new("a.png", vec![1, 2, 3]).unwrap()])
///     .build()
///     .unwrap();
/// assert_eq!(request.len(), 1);
///
/// let empty = TransformRequest::builder()
///     .operation(TransformOperation::Upscale)
///     .artifacts(Vec::new())
///     .build();
/// assert!(empty.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct TransformRequest {
    /// Operation to apply to every artifact
    operation: TransformOperation,
    /// Artifacts in caller order
    artifacts: Vec<MediaArtifact>,
}

impl TransformRequest {
    /// Creates a new builder for `TransformRequest`.
    pub fn builder() -> TransformRequestBuilder {
        TransformRequestBuilder::default()
    }

    /// Creates a request directly.
    ///
    /// # Errors
    ///
    /// Returns an error if `artifacts` is empty.
    #[track_caller]
    pub fn new(
        operation: TransformOperation,
        artifacts: Vec<MediaArtifact>,
    ) -> Result<Self, BuilderError> {
        if artifacts.is_empty() {
            return Err(BuilderError::new(BuilderErrorKind::EmptyField(
                "artifacts".to_string(),
            )));
        }
        Ok(Self {
            operation,
            artifacts,
        })
    }

    /// Number of artifacts in the request.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Always false for a constructed request; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Splits the request into its operation and artifacts.
    pub fn into_parts(self) -> (TransformOperation, Vec<MediaArtifact>) {
        (self.operation, self.artifacts)
    }
}

impl TransformRequestBuilder {
    /// Build the TransformRequest.
    ///
    /// # Errors
    ///
    /// Returns error if a field is missing or no artifacts were given.
    pub fn build(&self) -> Result<TransformRequest, BuilderError> {
        let request = self.build_internal().map_err(|e| match e {
            TransformRequestBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            TransformRequestBuilderError::ValidationError(message) => BuilderError::from(message),
        })?;
        TransformRequest::new(request.operation, request.artifacts)
    }
}
