//! Test utilities for transform client tests.
//!
//! This module provides a scriptable media processing service and helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vitrine_core::{MediaArtifact, TransformOperation};
use vitrine_error::{MediaServiceError, MediaServiceErrorKind, MediaServiceResult};
use vitrine_interface::{BatchItemOutcome, MediaProcessingService};

/// What the mock does for one filename.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this many output bytes
    Succeed(usize),
    /// Fail the call with this error kind
    Fail(MediaServiceErrorKind),
    /// Answer successfully with an empty payload
    EmptyPayload,
    /// Never answer
    Hang,
}

/// How the multi-item endpoint answers.
#[derive(Debug, Clone)]
pub enum BatchScript {
    /// One outcome per input in input order, following the per-file behaviors
    PerItem,
    /// Like `PerItem`, but listed in reverse order
    Reversed,
    /// Like `PerItem`, but without outcomes for these filenames
    Omit(Vec<String>),
    /// The whole call fails
    Fail(MediaServiceErrorKind),
}

/// Scriptable in-memory media processing service.
pub struct MockMediaService {
    behaviors: HashMap<String, MockBehavior>,
    default_behavior: MockBehavior,
    batch_script: BatchScript,
    delay: Option<Duration>,
    cancel_after: Option<(usize, CancellationToken)>,
    calls: AtomicUsize,
    batch_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    call_log: Mutex<Vec<(TransformOperation, String)>>,
}

impl MockMediaService {
    /// Every artifact succeeds with output twice the input size.
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            default_behavior: MockBehavior::Succeed(0),
            batch_script: BatchScript::PerItem,
            delay: None,
            cancel_after: None,
            calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            call_log: Mutex::new(Vec::new()),
        }
    }

    /// Script the behavior for one filename.
    pub fn with_behavior(mut self, filename: &str, behavior: MockBehavior) -> Self {
        self.behaviors.insert(filename.to_string(), behavior);
        self
    }

    /// Script the multi-item endpoint.
    pub fn with_batch_script(mut self, script: BatchScript) -> Self {
        self.batch_script = script;
        self
    }

    /// Delay every single-item call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cancel `token` once `calls` single-item calls have completed.
    pub fn cancel_after(mut self, calls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }

    /// Number of single-item calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of multi-item calls received.
    pub fn batch_call_count(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Highest number of single-item calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Filenames of single-item calls, in the order they were issued.
    pub fn called_filenames(&self) -> Vec<String> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Operations of single-item calls, in the order they were issued.
    pub fn called_operations(&self) -> Vec<TransformOperation> {
        self.call_log.lock().unwrap().iter().map(|(op, _)| *op).collect()
    }

    fn behavior_for(&self, filename: &str) -> MockBehavior {
        self.behaviors
            .get(filename)
            .cloned()
            .unwrap_or_else(|| self.default_behavior.clone())
    }

    fn output_for(artifact: &MediaArtifact, size: usize) -> Vec<u8> {
        let len = if size == 0 {
            artifact.bytes().len() * 2
        } else {
            size
        };
        vec![0xAB; len]
    }
}

#[async_trait]
impl MediaProcessingService for MockMediaService {
    async fn transform(
        &self,
        operation: TransformOperation,
        artifact: &MediaArtifact,
    ) -> MediaServiceResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_log
            .lock()
            .unwrap()
            .push((operation, artifact.filename().clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = match self.behavior_for(artifact.filename()) {
            MockBehavior::Succeed(size) => Ok(Self::output_for(artifact, size)),
            MockBehavior::Fail(kind) => Err(MediaServiceError::new(kind)),
            MockBehavior::EmptyPayload => Ok(Vec::new()),
            MockBehavior::Hang => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some((after, token)) = &self.cancel_after {
            if self.call_count() >= *after {
                token.cancel();
            }
        }

        result
    }

    async fn remove_background_batch(
        &self,
        artifacts: &[MediaArtifact],
    ) -> MediaServiceResult<Vec<BatchItemOutcome>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        let per_item = |artifact: &MediaArtifact| match self.behavior_for(artifact.filename()) {
            MockBehavior::Succeed(size) => {
                BatchItemOutcome::succeeded(artifact.filename().clone(), Self::output_for(artifact, size))
            }
            MockBehavior::EmptyPayload => {
                BatchItemOutcome::succeeded(artifact.filename().clone(), Vec::new())
            }
            MockBehavior::Fail(kind) => {
                BatchItemOutcome::failed(artifact.filename().clone(), kind.to_string())
            }
            MockBehavior::Hang => BatchItemOutcome::failed(artifact.filename().clone(), "hung"),
        };

        match &self.batch_script {
            BatchScript::PerItem => Ok(artifacts.iter().map(per_item).collect()),
            BatchScript::Reversed => Ok(artifacts.iter().rev().map(per_item).collect()),
            BatchScript::Omit(omitted) => Ok(artifacts
                .iter()
                .filter(|a| !omitted.contains(a.filename()))
                .map(per_item)
                .collect()),
            BatchScript::Fail(kind) => Err(MediaServiceError::new(kind.clone())),
        }
    }

    fn service_name(&self) -> &str {
        "mock"
    }
}

/// Artifact named `filename` holding `size` bytes of `fill`.
pub fn artifact(filename: &str, size: usize, fill: u8) -> MediaArtifact {
    MediaArtifact::new(filename, vec![fill; size]).expect("valid test artifact")
}

/// Three distinct artifacts named a.png, b.png, c.png.
pub fn three_artifacts() -> Vec<MediaArtifact> {
    vec![
        artifact("a.png", 100, 1),
        artifact("b.png", 200, 2),
        artifact("c.png", 300, 3),
    ]
}

/// Transport failure kind used across tests.
pub fn transport_failure() -> MediaServiceErrorKind {
    MediaServiceErrorKind::Transport("connection reset by peer".to_string())
}
