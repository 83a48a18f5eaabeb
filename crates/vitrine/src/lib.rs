//! Vitrine - batch media transformation for product listings
//!
//! Vitrine sends product photos to a remote AI media service for
//! background removal, resolution upscaling, or both combined, and hands
//! back one ordered report with a usable image for every input. When the
//! service fails for an item, the original photo is returned in its place.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use vitrine::{MediaArtifact, TransformOperation, TransformRequest, VitrineConfig, build_client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = build_client(&VitrineConfig::load()?)?;
//!
//!     let request = TransformRequest::new(
//!         TransformOperation::RemoveBackground,
//!         vec![MediaArtifact::from_path("amortecedor.png").await?],
//!     )?;
//!
//!     let report = client.transform(request, &CancellationToken::new()).await;
//!     println!("{} of {} succeeded", report.succeeded_count(), report.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Vitrine is organized as a workspace with focused crates:
//!
//! - `vitrine_error` - Error types
//! - `vitrine_core` - Artifacts, operations, results and batch reports
//! - `vitrine_interface` - The media processing service trait
//! - `vitrine_transform` - Transform client, HTTP service, configuration
//!
//! This crate (`vitrine`) re-exports everything for convenience.

pub use vitrine_core::*;
pub use vitrine_error::*;
pub use vitrine_interface::*;
pub use vitrine_transform::*;

pub mod telemetry;
