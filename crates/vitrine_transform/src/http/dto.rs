//! Wire types of the media processing service.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use vitrine_interface::{BatchItemOutcome, ServiceStatus};

/// Body returned by the multi-item background-removal endpoint.
///
/// ```json
/// {"resultados": [
///   {"filename": "a.png", "success": true, "content": "iVBORw0KGgo..."},
///   {"filename": "b.png", "success": false, "error": "unsupported format"}
/// ]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BatchResponseDto {
    #[serde(alias = "results")]
    pub(crate) resultados: Vec<BatchItemDto>,
}

/// One entry of [`BatchResponseDto`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BatchItemDto {
    pub(crate) filename: String,
    pub(crate) success: bool,
    /// Base64-encoded output payload, present on success
    #[serde(default)]
    pub(crate) content: Option<String>,
    /// Error marker, present on failure
    #[serde(default)]
    pub(crate) error: Option<String>,
}

impl BatchItemDto {
    /// Converts the entry into an outcome, treating undecodable content as a failure.
    pub(crate) fn into_outcome(self) -> BatchItemOutcome {
        if !self.success {
            let reason = self
                .error
                .unwrap_or_else(|| "service reported failure".to_string());
            return BatchItemOutcome::failed(self.filename, reason);
        }

        match self.content {
            Some(content) => match STANDARD.decode(content.trim()) {
                Ok(bytes) => BatchItemOutcome::succeeded(self.filename, bytes),
                Err(e) => BatchItemOutcome::failed(
                    self.filename,
                    format!("content is not valid base64: {}", e),
                ),
            },
            None => BatchItemOutcome::failed(self.filename, "success without content"),
        }
    }
}

/// Body returned by the status endpoint. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StatusDto {
    #[serde(default)]
    pub(crate) success: Option<bool>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl StatusDto {
    pub(crate) fn into_status(self) -> ServiceStatus {
        match self.success {
            Some(false) => ServiceStatus::Degraded {
                message: self
                    .message
                    .unwrap_or_else(|| "service reported it is not ready".to_string()),
            },
            _ => ServiceStatus::Available,
        }
    }
}
