//! Interface between the Vitrine transform client and the remote media service.
//!
//! The remote AI model is opaque. Everything the client knows about it is
//! captured by [`MediaProcessingService`]: a single-item endpoint per
//! operation and a multi-item background-removal endpoint.
//!
//! # Capability Traits
//!
//! - [`MediaProcessingService`] - Core trait every service backend implements
//! - [`Health`] - Service availability check

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{Health, MediaProcessingService};
pub use types::{BatchItemOutcome, ItemOutcome, ServiceStatus};
