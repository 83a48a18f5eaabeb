//! Media processing service errors and retry classification.

/// Media processing service error conditions.
///
/// Each variant belongs to one failure class (see [`failure_class`]):
/// the request never completed, the service refused the request or an
/// item, or the service answered with something that could not be read.
///
/// [`failure_class`]: MediaServiceErrorKind::failure_class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaServiceErrorKind {
    /// Request could not reach the service or no response arrived in time
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Service answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Error message or response body
        message: String,
    },
    /// Service marked one item of a multi-item call as failed
    #[display("Item rejected by service: {}", _0)]
    ItemFailed(String),
    /// Service answered successfully but the payload was unusable
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

impl MediaServiceErrorKind {
    /// Label used when reporting this failure in logs and metrics.
    ///
    /// Returns one of `"transport"`, `"service"` or `"malformed"`.
    pub fn failure_class(&self) -> &'static str {
        match self {
            MediaServiceErrorKind::Transport(_) => "transport",
            MediaServiceErrorKind::Status { .. } | MediaServiceErrorKind::ItemFailed(_) => {
                "service"
            }
            MediaServiceErrorKind::MalformedResponse(_) => "malformed",
        }
    }

    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            MediaServiceErrorKind::Transport(_) => true,
            MediaServiceErrorKind::Status { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            MediaServiceErrorKind::ItemFailed(_) | MediaServiceErrorKind::MalformedResponse(_) => {
                false
            }
        }
    }
}

/// Media processing service error with source location tracking.
///
/// # Examples
///
/// ```
/// use vitrine_error::{MediaServiceError, MediaServiceErrorKind};
///
/// let err = MediaServiceError::new(MediaServiceErrorKind::Status {
///     status_code: 502,
///     message: "bad gateway".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 502"));
/// assert_eq!(err.kind.failure_class(), "service");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Service Error: {} at line {} in {}", kind, line, file)]
pub struct MediaServiceError {
    /// The kind of error that occurred
    pub kind: MediaServiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaServiceError {
    /// Create a new MediaServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(MediaServiceErrorKind::Transport(message.into()))
    }

    /// Shorthand for an item the service marked as failed.
    #[track_caller]
    pub fn item_failed(message: impl Into<String>) -> Self {
        Self::new(MediaServiceErrorKind::ItemFailed(message.into()))
    }

    /// Shorthand for a malformed response.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(MediaServiceErrorKind::MalformedResponse(message.into()))
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use vitrine_error::{MediaServiceError, MediaServiceErrorKind, RetryableError};
///
/// let err = MediaServiceError::new(MediaServiceErrorKind::Status {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or transport failures return true.
    /// Permanent errors like 400 or a malformed body return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for MediaServiceError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for media service operations.
pub type MediaServiceResult<T> = Result<T, MediaServiceError>;
