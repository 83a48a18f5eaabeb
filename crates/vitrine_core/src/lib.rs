//! Core data types for the Vitrine media transformation client.
//!
//! This crate provides the data model shared by every Vitrine crate: the
//! artifacts handed to the remote service, the operations that can be
//! applied to them, and the per-item results and batch reports handed back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod operation;
mod quality;
mod report;
mod request;
mod result;

pub use artifact::MediaArtifact;
pub use operation::{DispatchStrategy, TransformOperation};
pub use quality::quality_ratio;
pub use report::BatchReport;
pub use request::{TransformRequest, TransformRequestBuilder};
pub use result::TransformResult;
