//! Transform command handler.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use vitrine::{
    ArtifactError, ArtifactErrorKind, BatchReport, MediaArtifact, TransformOperation,
    TransformRequest, VitrineConfig, VitrineResult, build_client,
};

/// Exit code when at least one item fell back to its original.
pub const EXIT_PARTIAL: u8 = 2;

/// Transform every file with `operation` and write the succeeded outputs.
///
/// Ctrl-C cancels the batch; items not yet started keep their originals.
#[instrument(skip(config, files), fields(operation = %operation, count = files.len()))]
pub async fn run_transform(
    config: &VitrineConfig,
    operation: TransformOperation,
    files: &[PathBuf],
    output_dir: &Path,
    json: bool,
) -> VitrineResult<u8> {
    let client = build_client(config)?;

    let mut artifacts = Vec::with_capacity(files.len());
    for path in files {
        artifacts.push(MediaArtifact::from_path(path).await?);
    }
    let request = TransformRequest::new(operation, artifacts)?;

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
    let report = client.transform(request, &cancel).await;
    interrupt.abort();

    let written = write_outputs(&report, operation, output_dir).await?;
    info!(
        written = written.len(),
        output_dir = %output_dir.display(),
        "Wrote transformed images"
    );

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| {
            ArtifactError::new(ArtifactErrorKind::Write {
                path: "<stdout>".to_string(),
                message: e.to_string(),
            })
        })?;
        println!("{}", rendered);
    } else {
        print_report(&report);
    }

    Ok(exit_status(&report))
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("Interrupt received, remaining items keep their originals");
        cancel.cancel();
    }
}

/// Where the transformed output of `filename` is written.
///
/// Paths already in `taken` get a numeric suffix (`-2`, `-3`, ...) so
/// inputs sharing a filename keep separate outputs.
pub fn output_path(
    output_dir: &Path,
    filename: &str,
    operation: TransformOperation,
    taken: &HashSet<PathBuf>,
) -> PathBuf {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let mut path = output_dir.join(format!("{}-{}.png", stem, operation));
    let mut suffix = 2;
    while taken.contains(&path) {
        path = output_dir.join(format!("{}-{}-{}.png", stem, operation, suffix));
        suffix += 1;
    }
    path
}

/// Write every succeeded output, returning the paths written.
///
/// Fallback results are skipped since the original is already on disk.
pub async fn write_outputs(
    report: &BatchReport,
    operation: TransformOperation,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ArtifactError> {
    let mut written = Vec::new();
    let mut taken = HashSet::new();
    if report.succeeded_count() == 0 {
        return Ok(written);
    }

    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        ArtifactError::new(ArtifactErrorKind::Write {
            path: output_dir.display().to_string(),
            message: e.to_string(),
        })
    })?;

    for result in report.iter().filter(|r| *r.succeeded()) {
        let path = output_path(output_dir, result.filename(), operation, &taken);
        tokio::fs::write(&path, result.output().bytes())
            .await
            .map_err(|e| {
                ArtifactError::new(ArtifactErrorKind::Write {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            })?;
        taken.insert(path.clone());
        written.push(path);
    }

    Ok(written)
}

fn print_report(report: &BatchReport) {
    for result in report {
        if *result.succeeded() {
            println!(
                "ok       {}  {} -> {} bytes  (ratio {})",
                result.filename(),
                result.original_size(),
                result.final_size(),
                result.quality_ratio()
            );
        } else {
            println!(
                "fallback {}  {} bytes  (original kept)",
                result.filename(),
                result.original_size()
            );
        }
    }
    println!(
        "{} succeeded, {} fell back",
        report.succeeded_count(),
        report.failed_count()
    );
}

/// 0 when every item succeeded, [`EXIT_PARTIAL`] otherwise.
pub fn exit_status(report: &BatchReport) -> u8 {
    if report.all_succeeded() { 0 } else { EXIT_PARTIAL }
}
