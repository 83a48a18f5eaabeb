//! reqwest-backed media processing service.

use crate::config::{EndpointConfig, ServiceConfig};
use crate::http::{BatchItemDto, BatchResponseDto, StatusDto};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use tracing::{debug, instrument, warn};
use vitrine_core::{MediaArtifact, TransformOperation};
use vitrine_error::{
    ConfigError, ConfigErrorKind, MediaServiceError, MediaServiceErrorKind, MediaServiceResult,
};
use vitrine_interface::{BatchItemOutcome, Health, MediaProcessingService, ServiceStatus};

/// Media processing service reached over HTTP.
///
/// Single-item calls post a multipart form with one `file` part and read
/// the transformed image from the response body. The multi-item call
/// posts one `files` part per artifact and reads a JSON summary.
#[derive(Debug, Clone)]
pub struct HttpMediaService {
    client: Client,
    base_url: Url,
    endpoints: EndpointConfig,
}

impl HttpMediaService {
    /// Creates a service from its connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let base_url = config.parsed_base_url()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::HttpClient(e.to_string())))?;

        debug!("Created HTTP media service");

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints().clone(),
        })
    }

    /// Base URL endpoint paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> MediaServiceResult<Url> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            MediaServiceError::transport(format!("Invalid endpoint path '{}': {}", path, e))
        })
    }

    fn artifact_part(artifact: &MediaArtifact) -> MediaServiceResult<Part> {
        Part::bytes(artifact.bytes().clone())
            .file_name(artifact.filename().clone())
            .mime_str(artifact.content_type())
            .map_err(|e| {
                MediaServiceError::transport(format!(
                    "Failed to build multipart part for '{}': {}",
                    artifact.filename(),
                    e
                ))
            })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> MediaServiceResult<Response> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaServiceError::new(MediaServiceErrorKind::Status {
                status_code: status.as_u16(),
                message,
            }));
        }

        Ok(response)
    }

    async fn read_body(response: Response) -> MediaServiceResult<Vec<u8>> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

fn transport_error(err: reqwest::Error) -> MediaServiceError {
    if err.is_timeout() {
        MediaServiceError::transport(format!("Request timed out: {}", err))
    } else {
        MediaServiceError::transport(format!("Request failed: {}", err))
    }
}

#[async_trait]
impl MediaProcessingService for HttpMediaService {
    #[instrument(skip(self, artifact), fields(filename = %artifact.filename(), size = artifact.size()))]
    async fn transform(
        &self,
        operation: TransformOperation,
        artifact: &MediaArtifact,
    ) -> MediaServiceResult<Vec<u8>> {
        let url = self.endpoint_url(self.endpoints.for_operation(operation))?;
        debug!(url = %url, "Sending single-item transform request");

        let form = Form::new().part("file", Self::artifact_part(artifact)?);
        let response = self.send(self.client.post(url).multipart(form)).await?;

        Self::read_body(response).await
    }

    #[instrument(skip(self, artifacts), fields(count = artifacts.len()))]
    async fn remove_background_batch(
        &self,
        artifacts: &[MediaArtifact],
    ) -> MediaServiceResult<Vec<BatchItemOutcome>> {
        let url = self.endpoint_url(self.endpoints.remove_background_batch())?;
        debug!(url = %url, "Sending multi-item background removal request");

        let mut form = Form::new();
        for artifact in artifacts {
            form = form.part("files", Self::artifact_part(artifact)?);
        }

        let response = self.send(self.client.post(url).multipart(form)).await?;
        let body = Self::read_body(response).await?;

        let parsed: BatchResponseDto = serde_json::from_slice(&body).map_err(|e| {
            MediaServiceError::malformed(format!("Failed to parse batch response: {}", e))
        })?;

        Ok(parsed
            .resultados
            .into_iter()
            .map(BatchItemDto::into_outcome)
            .collect())
    }

    fn service_name(&self) -> &str {
        "http"
    }
}

#[async_trait]
impl Health for HttpMediaService {
    #[instrument(skip(self))]
    async fn health(&self) -> MediaServiceResult<ServiceStatus> {
        let url = self.endpoint_url(self.endpoints.status())?;

        let body = match self.send(self.client.get(url)).await {
            Ok(response) => Self::read_body(response).await,
            Err(e) => Err(e),
        };

        let body = match body {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Media service status check failed");
                return Ok(ServiceStatus::Unavailable {
                    message: e.kind.to_string(),
                });
            }
        };

        let status = serde_json::from_slice::<StatusDto>(&body)
            .unwrap_or_default()
            .into_status();

        Ok(status)
    }
}
