//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the vitrine binary.

mod commands;
mod status;
mod transform;

pub use commands::Cli;
pub use status::show_status;
pub use transform::run_transform;

use tracing::debug;
use vitrine::{VitrineConfig, VitrineResult};

/// Resolve configuration from `--config` or the layered sources, then apply `--base-url`.
pub fn load_config(cli: &Cli) -> VitrineResult<VitrineConfig> {
    let config = match &cli.config {
        Some(path) => VitrineConfig::from_file(path)?,
        None => VitrineConfig::load()?,
    };

    let config = match &cli.base_url {
        Some(base_url) => {
            debug!(base_url = %base_url, "Overriding media service base URL");
            VitrineConfig::new(config.service().with_base_url(base_url), *config.retry())
        }
        None => config,
    };

    config.validate()?;
    Ok(config)
}
