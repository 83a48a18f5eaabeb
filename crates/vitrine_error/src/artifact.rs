//! Artifact construction and file I/O errors.

/// Kinds of artifact errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ArtifactErrorKind {
    /// Artifact was given an empty filename
    #[display("Artifact filename must not be empty")]
    EmptyFilename,
    /// Artifact payload holds no bytes
    #[display("Artifact '{}' has an empty payload", _0)]
    EmptyPayload(String),
    /// Failed to read an artifact from disk
    #[display("Failed to read '{}': {}", path, message)]
    Read {
        /// Path that could not be read
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Failed to write a transformed artifact to disk
    #[display("Failed to write '{}': {}", path, message)]
    Write {
        /// Path that could not be written
        path: String,
        /// Underlying I/O message
        message: String,
    },
}

/// Artifact error with location tracking.
///
/// # Examples
///
/// ```
/// use vitrine_error::{ArtifactError, ArtifactErrorKind};
///
/// let err = ArtifactError::new(ArtifactErrorKind::EmptyPayload("a.png".to_string()));
/// assert!(format!("{}", err).contains("a.png"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Artifact Error: {} at line {} in {}", kind, line, file)]
pub struct ArtifactError {
    /// The kind of error that occurred
    pub kind: ArtifactErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ArtifactError {
    /// Create a new ArtifactError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ArtifactErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
