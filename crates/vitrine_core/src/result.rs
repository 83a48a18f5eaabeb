//! Per-artifact transformation results.

use crate::{MediaArtifact, quality_ratio};
use derive_getters::Getters;
use serde::Serialize;

/// Outcome of transforming one artifact.
///
/// A result always carries a usable output. When `succeeded` is false the
/// output is the original input artifact, `final_size` equals
/// `original_size` and `quality_ratio` is the sentinel 0. Results can only
/// be built through [`TransformResult::success`] and
/// [`TransformResult::fallback`], which keep these fields consistent.
///
/// Serialization omits the output payload.
///
/// # Examples
///
/// ```
/// use vitrine_core::{MediaArtifact, TransformResult};
///
/// let input = MediaArtifact::new("disc.png", vec![0u8; 1000]).unwrap();
///
/// let upscaled = TransformResult::success(&input, vec![0u8; 1800]).unwrap();
/// assert!(*upscaled.succeeded());
/// assert_eq!(*upscaled.quality_ratio(), 180);
///
/// let failed = TransformResult::fallback(&input);
/// assert!(!*failed.succeeded());
/// assert_eq!(failed.output(), &input);
/// assert_eq!(*failed.quality_ratio(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct TransformResult {
    /// Filename copied from the input artifact
    filename: String,
    /// Whether the remote transformation succeeded
    succeeded: bool,
    /// Transformed artifact, or the original on failure
    #[serde(skip)]
    output: MediaArtifact,
    /// Input size in bytes
    original_size: u64,
    /// Output size in bytes
    final_size: u64,
    /// Output size as a rounded percentage of input size; 0 on failure
    quality_ratio: u64,
}

impl TransformResult {
    /// Builds a successful result from the service's response payload.
    ///
    /// The output keeps the input's filename. Returns `None` when the
    /// payload is empty, which callers treat as a malformed response.
    pub fn success(input: &MediaArtifact, output_bytes: Vec<u8>) -> Option<Self> {
        let output = MediaArtifact::new(input.filename().clone(), output_bytes).ok()?;
        let original_size = input.size();
        let final_size = output.size();

        Some(Self {
            filename: input.filename().clone(),
            succeeded: true,
            output,
            original_size,
            final_size,
            quality_ratio: quality_ratio(original_size, final_size),
        })
    }

    /// Builds the failure fallback: the input artifact returned unchanged.
    pub fn fallback(input: &MediaArtifact) -> Self {
        Self {
            filename: input.filename().clone(),
            succeeded: false,
            output: input.clone(),
            original_size: input.size(),
            final_size: input.size(),
            quality_ratio: 0,
        }
    }

    /// Consumes the result, returning the output artifact.
    pub fn into_output(self) -> MediaArtifact {
        self.output
    }
}
