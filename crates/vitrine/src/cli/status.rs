//! Service status command handler.

use super::transform::EXIT_PARTIAL;
use tracing::instrument;
use vitrine::{ServiceStatus, VitrineConfig, VitrineResult, build_client};

/// Check the media service and print its availability.
///
/// Returns 0 when the service is available and [`EXIT_PARTIAL`] otherwise.
#[instrument(skip_all)]
pub async fn show_status(config: &VitrineConfig, json: bool) -> VitrineResult<u8> {
    let client = build_client(config)?;
    let status = client.service().health().await?;

    if json {
        println!("{}", serde_json::json!(status));
    } else {
        match &status {
            ServiceStatus::Available => {
                println!("available  {}", config.service().base_url())
            }
            ServiceStatus::Degraded { message } => {
                println!("degraded   {}  {}", config.service().base_url(), message)
            }
            ServiceStatus::Unavailable { message } => {
                println!("unavailable  {}  {}", config.service().base_url(), message)
            }
        }
    }

    Ok(match status {
        ServiceStatus::Available => 0,
        _ => EXIT_PARTIAL,
    })
}
