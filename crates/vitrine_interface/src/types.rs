//! Shared types for service responses.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Per-artifact outcome reported by the multi-item endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemOutcome {
    /// Service transformed the artifact; holds the output payload
    Succeeded(Vec<u8>),
    /// Service reported an error marker for the artifact
    Failed(String),
}

/// One sub-result of a multi-item call, keyed by the input filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct BatchItemOutcome {
    /// Filename of the input artifact this outcome belongs to
    filename: String,
    /// What happened to it
    outcome: ItemOutcome,
}

impl BatchItemOutcome {
    /// Outcome for an artifact the service transformed.
    pub fn succeeded(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            outcome: ItemOutcome::Succeeded(bytes),
        }
    }

    /// Outcome for an artifact the service failed on.
    pub fn failed(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            outcome: ItemOutcome::Failed(reason.into()),
        }
    }

    /// Splits the outcome into filename and result.
    pub fn into_parts(self) -> (String, ItemOutcome) {
        (self.filename, self.outcome)
    }
}

/// Availability of the media processing service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Service is fully operational
    Available,
    /// Service answered but reported a problem
    Degraded {
        /// Description of the degradation
        message: String,
    },
    /// Service could not be reached or refused the status check
    Unavailable {
        /// Description of the problem
        message: String,
    },
}
