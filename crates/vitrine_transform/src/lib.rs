//! Batch media transformation client for Vitrine.
//!
//! This crate sends product photos to the remote AI media service for
//! background removal, upscaling, or the combined treatment, and turns the
//! independent, fallible remote calls into one ordered [`BatchReport`] with
//! a usable result for every input.
//!
//! # Dispatch strategies
//!
//! - **Batched** (background removal): one call carries every artifact;
//!   outcomes are re-associated with inputs by filename.
//! - **Sequential** (upscaling, combined treatment): one call per artifact,
//!   each awaited before the next, so at most one call is in flight.
//!
//! # Example
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use vitrine_core::{MediaArtifact, TransformOperation, TransformRequest};
//! use vitrine_transform::{VitrineConfig, build_client};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VitrineConfig::load()?;
//! let client = build_client(&config)?;
//!
//! let artifacts = vec![
//!     MediaArtifact::from_path("filtro-oleo.png").await?,
//!     MediaArtifact::from_path("vela-ignicao.png").await?,
//! ];
//! let request = TransformRequest::new(TransformOperation::CombinedTreatment, artifacts)?;
//! let report = client.transform(request, &CancellationToken::new()).await;
//!
//! assert_eq!(report.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! [`BatchReport`]: vitrine_core::BatchReport

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod http;
mod metrics;
mod reconcile;
mod retry;

pub use client::{DEFAULT_CALL_TIMEOUT, TransformClient};
pub use config::{EndpointConfig, RetryConfig, ServiceConfig, VitrineConfig};
pub use http::HttpMediaService;
pub use metrics::TransformMetrics;
pub use retry::RetryingService;

use std::sync::Arc;
use tracing::{info, instrument};
use vitrine_error::VitrineResult;
use vitrine_interface::Health;

/// Type-erased service handle produced by [`build_client`].
pub type SharedService = Arc<dyn Health>;

/// Builds a transform client over the HTTP service described by `config`.
///
/// The retry wrapper is applied only when `config.retry()` enables it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be built.
#[instrument(skip_all, fields(base_url = %config.service().base_url()))]
pub fn build_client(config: &VitrineConfig) -> VitrineResult<TransformClient<SharedService>> {
    config.validate()?;

    let http = HttpMediaService::new(config.service())?;
    let service: SharedService = if config.retry().is_enabled() {
        info!(max_retries = config.retry().max_retries(), "Retry policy enabled");
        Arc::new(RetryingService::new(http, *config.retry()))
    } else {
        Arc::new(http)
    };

    Ok(TransformClient::new(service).with_call_timeout(config.service().call_timeout()))
}
