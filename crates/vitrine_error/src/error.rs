//! Top-level error wrapper types.

use crate::{ArtifactError, BuilderError, ConfigError, MediaServiceError};

/// Every error kind the Vitrine crates can produce.
///
/// # Examples
///
/// ```
/// use vitrine_error::{VitrineError, ConfigError};
///
/// let config_err = ConfigError::zero("service.connect_timeout_secs");
/// let err: VitrineError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VitrineErrorKind {
    /// Media processing service error
    #[from(MediaServiceError)]
    MediaService(MediaServiceError),
    /// Artifact construction or file I/O error
    #[from(ArtifactError)]
    Artifact(ArtifactError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Vitrine error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vitrine_error::{VitrineResult, ConfigError};
///
/// fn might_fail() -> VitrineResult<()> {
///     Err(ConfigError::zero("retry.max_delay_secs"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vitrine Error: {}", _0)]
pub struct VitrineError(Box<VitrineErrorKind>);

impl VitrineError {
    /// Create a new error from a kind.
    pub fn new(kind: VitrineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VitrineErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VitrineErrorKind
impl<T> From<T> for VitrineError
where
    T: Into<VitrineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vitrine operations.
pub type VitrineResult<T> = std::result::Result<T, VitrineError>;
