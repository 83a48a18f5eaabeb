//! Ordered batch reports.

use crate::TransformResult;
use serde::Serialize;

/// One result per input artifact, in input order.
///
/// The report for a request of N artifacts always holds N results,
/// whatever mix of successes and fallbacks it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    results: Vec<TransformResult>,
}

impl BatchReport {
    /// Wraps results that are already in input order.
    pub fn new(results: Vec<TransformResult>) -> Self {
        Self { results }
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for the input at `index`.
    pub fn get(&self, index: usize) -> Option<&TransformResult> {
        self.results.get(index)
    }

    /// Iterates results in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransformResult> {
        self.results.iter()
    }

    /// Results as a slice.
    pub fn results(&self) -> &[TransformResult] {
        &self.results
    }

    /// Number of items the service transformed.
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| *r.succeeded()).count()
    }

    /// Number of items that fell back to their original artifact.
    pub fn failed_count(&self) -> usize {
        self.len() - self.succeeded_count()
    }

    /// Whether every item succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }

    /// Consumes the report, returning the results.
    pub fn into_results(self) -> Vec<TransformResult> {
        self.results
    }
}

impl IntoIterator for BatchReport {
    type Item = TransformResult;
    type IntoIter = std::vec::IntoIter<TransformResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a TransformResult;
    type IntoIter = std::slice::Iter<'a, TransformResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
