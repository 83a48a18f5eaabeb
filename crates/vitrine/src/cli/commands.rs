//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vitrine::TransformOperation;

/// Vitrine - background removal and upscaling for product photos
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Background removal and upscaling for product photos", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Media service base URL, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory transformed images are written to
    #[arg(long, global = true, default_value = "vitrine-out")]
    pub output_dir: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upscale each image
    Upscale(FileArgs),

    /// Remove the background of every image in one batch
    RemoveBackground(FileArgs),

    /// Remove the background and upscale each image
    Treat(FileArgs),

    /// Check whether the media service is available
    Status,
}

impl Commands {
    /// Operation and input files of a transform command, or `None` for `status`.
    pub fn transform(&self) -> Option<(TransformOperation, &[PathBuf])> {
        match self {
            Commands::Upscale(args) => Some((TransformOperation::Upscale, args.files.as_slice())),
            Commands::RemoveBackground(args) => {
                Some((TransformOperation::RemoveBackground, args.files.as_slice()))
            }
            Commands::Treat(args) => Some((TransformOperation::CombinedTreatment, args.files.as_slice())),
            Commands::Status => None,
        }
    }
}

/// Input images of a transform command
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Image files to transform
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
