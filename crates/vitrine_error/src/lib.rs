//! Error types for the Vitrine library.
//!
//! This crate provides the foundation error types used throughout the Vitrine workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Transformation calls never surface these errors to their callers. A
//! [`MediaServiceError`] is produced at the service seam and converted into
//! a fallback result by the transform client; the other kinds come from
//! setup work such as reading artifacts or loading configuration.
//!
//! # Examples
//!
//! ```
//! use vitrine_error::{ConfigError, VitrineResult};
//!
//! fn load() -> VitrineResult<String> {
//!     Err(ConfigError::zero("service.timeout_secs"))?
//! }
//!
//! match load() {
//!     Ok(url) => println!("Got: {}", url),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod builder;
mod config;
mod error;
mod media_service;

pub use artifact::{ArtifactError, ArtifactErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{VitrineError, VitrineErrorKind, VitrineResult};
pub use media_service::{
    MediaServiceError, MediaServiceErrorKind, MediaServiceResult, RetryableError,
};
