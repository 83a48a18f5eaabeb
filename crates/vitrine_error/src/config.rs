//! Configuration and client setup errors.

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// Media service base URL is unusable
    #[display("Invalid base_url '{}': {}", url, reason)]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },
    /// A setting holds a value the client cannot work with
    #[display("Invalid value for {}: {}", key, reason)]
    InvalidValue {
        /// Dotted key, e.g. `service.timeout_secs`
        key: String,
        /// Why it was rejected
        reason: String,
    },
    /// Layered sources could not be read or deserialized
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// HTTP client could not be built from the settings
    #[display("Failed to build HTTP client: {}", _0)]
    HttpClient(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use vitrine_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::InvalidValue {
///     key: "service.call_timeout_secs".to_string(),
///     reason: "must be greater than zero".to_string(),
/// });
/// assert!(format!("{}", err).contains("service.call_timeout_secs"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a setting that must be positive but is zero.
    #[track_caller]
    pub fn zero(key: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidValue {
            key: key.into(),
            reason: "must be greater than zero".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_names_the_key() {
        let err = ConfigError::zero("service.timeout_secs");
        assert_eq!(
            err.kind,
            ConfigErrorKind::InvalidValue {
                key: "service.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            }
        );
        assert!(err.file.ends_with("config.rs"));
    }
}
