//! Configuration for the transform client and its HTTP service.
//!
//! Configuration is TOML-based and layered:
//! - Bundled defaults (include_str! from vitrine.toml)
//! - User overrides (~/.config/vitrine/vitrine.toml, then ./vitrine.toml)
//! - Environment variables prefixed `VITRINE__` (e.g. `VITRINE__SERVICE__BASE_URL`)
//!
//! Later sources take precedence.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use vitrine_core::TransformOperation;
use vitrine_error::{ConfigError, ConfigErrorKind, VitrineResult};

const DEFAULT_CONFIG: &str = include_str!("../vitrine.toml");

/// Relative endpoint paths of the media processing service.
///
/// # Example
///
/// ```toml
/// [service.endpoints]
/// upscale = "ia/escalar-imagem"
/// remove_background_batch = "ia/remover-fundo-multiplas"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct EndpointConfig {
    /// Single-item upscaling
    upscale: String,
    /// Single-item background removal
    remove_background: String,
    /// Single-item combined treatment
    combined_treatment: String,
    /// Multi-item background removal
    remove_background_batch: String,
    /// Availability check
    status: String,
}

impl EndpointConfig {
    /// Single-item endpoint for an operation.
    pub fn for_operation(&self, operation: TransformOperation) -> &str {
        match operation {
            TransformOperation::Upscale => &self.upscale,
            TransformOperation::RemoveBackground => &self.remove_background,
            TransformOperation::CombinedTreatment => &self.combined_treatment,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            upscale: "ia/escalar-imagem".to_string(),
            remove_background: "ia/remover-fundo".to_string(),
            combined_treatment: "ia/tratar-imagem".to_string(),
            remove_background_batch: "ia/remover-fundo-multiplas".to_string(),
            status: "ia/status".to_string(),
        }
    }
}

/// Connection settings for the media processing service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ServiceConfig {
    /// Base URL every endpoint path is resolved against
    base_url: String,
    /// Timeout for one HTTP attempt, in seconds
    timeout_secs: u64,
    /// TCP connect timeout, in seconds
    connect_timeout_secs: u64,
    /// Total budget for one outbound call including retries, in seconds
    call_timeout_secs: u64,
    /// Endpoint paths
    #[serde(default)]
    endpoints: EndpointConfig,
}

impl ServiceConfig {
    /// Copy of this configuration pointing at another base URL.
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..self.clone()
        }
    }

    /// Copy of this configuration with different per-attempt and total timeouts.
    pub fn with_timeouts(&self, timeout: Duration, call_timeout: Duration) -> Self {
        Self {
            timeout_secs: timeout.as_secs().max(1),
            call_timeout_secs: call_timeout.as_secs().max(1),
            ..self.clone()
        }
    }

    /// Per-attempt HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// TCP connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Total budget for one outbound call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Parses the base URL, ensuring a trailing slash so endpoint paths join under it.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| {
            ConfigError::new(ConfigErrorKind::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: e.to_string(),
            })
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::new(ConfigErrorKind::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("scheme must be http or https, got '{}'", url.scheme()),
            }));
        }
        Ok(url)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
            call_timeout_secs: 300,
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Retry policy applied around the service, outside the transform client.
///
/// ```toml
/// [retry]
/// max_retries = 3
/// initial_backoff_ms = 500
/// max_delay_secs = 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    max_retries: usize,
    /// Backoff before the first retry, in milliseconds
    initial_backoff_ms: u64,
    /// Upper bound on any single backoff delay, in seconds
    max_delay_secs: u64,
}

impl RetryConfig {
    /// Creates a retry policy.
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_delay_secs: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_delay_secs,
        }
    }

    /// Whether the policy performs any retries.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(0, 1000, 30)
    }
}

/// Top-level Vitrine configuration.
///
/// # Example
///
/// ```no_run
/// use vitrine_transform::VitrineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = VitrineConfig::load()?;
/// println!("Service at {}", config.service().base_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default, Getters)]
pub struct VitrineConfig {
    /// Media processing service connection
    #[serde(default)]
    service: ServiceConfig,
    /// Retry policy
    #[serde(default)]
    retry: RetryConfig,
}

impl VitrineConfig {
    /// Creates a configuration from its sections.
    pub fn new(service: ServiceConfig, retry: RetryConfig) -> Self {
        Self { service, retry }
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> VitrineResult<Self> {
        debug!("Loading configuration from file");

        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed or validation fails.
    #[instrument]
    pub fn load() -> VitrineResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/vitrine/vitrine.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("vitrine").required(false))
            .add_source(
                Environment::with_prefix("VITRINE")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Checks values the service cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.parsed_base_url()?;
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::zero("service.timeout_secs"));
        }
        if self.service.call_timeout_secs == 0 {
            return Err(ConfigError::zero("service.call_timeout_secs"));
        }
        if self.service.connect_timeout_secs == 0 {
            return Err(ConfigError::zero("service.connect_timeout_secs"));
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> VitrineResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?;

        config.validate()?;
        Ok(config)
    }
}
