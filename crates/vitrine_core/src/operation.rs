//! Transformation operations and their dispatch strategies.

use serde::{Deserialize, Serialize};

/// A transformation the remote media processing service can apply.
///
/// Operations only change how the outbound request is built. Every
/// operation yields the same [`TransformResult`](crate::TransformResult) shape.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use vitrine_core::{DispatchStrategy, TransformOperation};
///
/// let op = TransformOperation::from_str("remove-background").unwrap();
/// assert_eq!(op, TransformOperation::RemoveBackground);
/// assert_eq!(op.dispatch_strategy(), DispatchStrategy::Batched);
/// assert_eq!(TransformOperation::CombinedTreatment.to_string(), "combined-treatment");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TransformOperation {
    /// Resolution upscaling
    Upscale,
    /// Background removal
    RemoveBackground,
    /// Background removal followed by upscaling, as one remote treatment
    CombinedTreatment,
}

impl TransformOperation {
    /// How a batch of artifacts for this operation is sent to the service.
    ///
    /// Background removal has a multi-item endpoint and is batched into a
    /// single call. Upscaling and the combined treatment are issued one
    /// artifact at a time, each awaited before the next starts.
    pub fn dispatch_strategy(&self) -> DispatchStrategy {
        match self {
            TransformOperation::RemoveBackground => DispatchStrategy::Batched,
            TransformOperation::Upscale | TransformOperation::CombinedTreatment => {
                DispatchStrategy::Sequential
            }
        }
    }
}

/// Physical dispatch of a logical batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DispatchStrategy {
    /// One outbound call carrying every artifact
    Batched,
    /// One outbound call per artifact, strictly in order, at most one in flight
    Sequential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_background_removal_is_batched() {
        let batched: Vec<_> = TransformOperation::iter()
            .filter(|op| op.dispatch_strategy() == DispatchStrategy::Batched)
            .collect();
        assert_eq!(batched, vec![TransformOperation::RemoveBackground]);
    }

    #[test]
    fn serde_and_strum_agree_on_names() {
        for op in TransformOperation::iter() {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op));
        }
    }
}
