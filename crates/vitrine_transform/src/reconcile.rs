//! Re-association of multi-item outcomes with their inputs.

use std::collections::{HashMap, VecDeque};
use tracing::warn;
use vitrine_core::MediaArtifact;
use vitrine_error::{MediaServiceError, MediaServiceResult};
use vitrine_interface::{BatchItemOutcome, ItemOutcome};

/// Pairs each input artifact with the outcome the service reported for it.
///
/// The returned vector is index-aligned with `artifacts`. Outcomes are
/// matched by filename; when several inputs share a filename they claim
/// that filename's outcomes in the order the service listed them. An
/// input with no outcome gets a malformed-response error, a reported
/// failure becomes an item error, and outcomes naming no input are logged
/// and dropped.
pub(crate) fn reconcile(
    artifacts: &[MediaArtifact],
    outcomes: Vec<BatchItemOutcome>,
) -> Vec<MediaServiceResult<Vec<u8>>> {
    let mut by_filename: HashMap<String, VecDeque<ItemOutcome>> = HashMap::new();
    for outcome in outcomes {
        let (filename, outcome) = outcome.into_parts();
        by_filename.entry(filename).or_default().push_back(outcome);
    }

    let aligned = artifacts
        .iter()
        .map(|artifact| {
            let claimed = by_filename
                .get_mut(artifact.filename())
                .and_then(VecDeque::pop_front);

            match claimed {
                Some(ItemOutcome::Succeeded(bytes)) => Ok(bytes),
                Some(ItemOutcome::Failed(reason)) => Err(MediaServiceError::item_failed(reason)),
                None => Err(MediaServiceError::malformed(format!(
                    "response has no result for '{}'",
                    artifact.filename()
                ))),
            }
        })
        .collect();

    for (filename, leftover) in by_filename {
        if !leftover.is_empty() {
            warn!(
                filename = %filename,
                count = leftover.len(),
                "Ignoring batch results that match no input artifact"
            );
        }
    }

    aligned
}
