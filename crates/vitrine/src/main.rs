//! Vitrine CLI binary.
//!
//! This binary sends product photos through the remote media service:
//! - Upscale, remove backgrounds, or apply the combined treatment
//! - Write transformed images and print a per-item report
//! - Check service availability

use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use vitrine::VitrineResult;

mod cli;

use cli::{Cli, load_config, run_transform, show_status};

/// Exit code for configuration, input, or output errors.
const EXIT_SETUP: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = vitrine::telemetry::init_console_telemetry(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(EXIT_SETUP);
    }

    match execute(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "vitrine failed");
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_SETUP)
        }
    }
}

async fn execute(cli: &Cli) -> VitrineResult<u8> {
    let config = load_config(cli)?;

    match cli.command.transform() {
        Some((operation, files)) => {
            run_transform(&config, operation, files, &cli.output_dir, cli.json).await
        }
        None => show_status(&config, cli.json).await,
    }
}
