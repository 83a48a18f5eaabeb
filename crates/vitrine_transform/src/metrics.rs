//! Metrics for media transformation calls.
//!
//! Provides OpenTelemetry-based metrics for tracking transformed items,
//! fallbacks, call latency and payload volume.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;
use vitrine_core::{DispatchStrategy, TransformOperation};

static METRICS: OnceLock<TransformMetrics> = OnceLock::new();

/// Metrics for transform client activity.
///
/// Labeled with the operation, and for failures with the failure class
/// (`transport`, `service`, `malformed`, or `cancelled`).
#[derive(Clone)]
pub struct TransformMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Items that produced a result (success or fallback)
    pub items: Counter<u64>,
    /// Items that fell back to their original artifact
    pub failures: Counter<u64>,
    /// Outbound call duration in seconds
    pub duration: Histogram<f64>,
    /// Input bytes of successfully transformed items
    pub bytes_in: Counter<u64>,
    /// Output bytes of successfully transformed items
    pub bytes_out: Counter<u64>,
}

impl TransformMetrics {
    fn init() -> Self {
        let meter = global::meter("vitrine_transform");

        Self {
            _meter: meter.clone(),
            items: meter
                .u64_counter("transform.items")
                .with_description("Items processed by the transform client")
                .build(),
            failures: meter
                .u64_counter("transform.failures")
                .with_description("Items that fell back to the original artifact")
                .build(),
            duration: meter
                .f64_histogram("transform.duration")
                .with_unit("seconds")
                .with_description("Outbound media service call duration")
                .build(),
            bytes_in: meter
                .u64_counter("transform.bytes.in")
                .with_unit("bytes")
                .with_description("Input bytes of transformed items")
                .build(),
            bytes_out: meter
                .u64_counter("transform.bytes.out")
                .with_unit("bytes")
                .with_description("Output bytes of transformed items")
                .build(),
        }
    }

    /// Get the global transform metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record one outbound call.
    pub fn record_call(
        &self,
        operation: TransformOperation,
        strategy: DispatchStrategy,
        duration_secs: f64,
    ) {
        let labels = &[
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("strategy", strategy.to_string()),
        ];
        self.duration.record(duration_secs, labels);
    }

    /// Record a successfully transformed item.
    pub fn record_success(&self, operation: TransformOperation, original_size: u64, final_size: u64) {
        let labels = &[KeyValue::new("operation", operation.to_string())];
        self.items.add(1, labels);
        self.bytes_in.add(original_size, labels);
        self.bytes_out.add(final_size, labels);
    }

    /// Record an item that fell back to its original artifact.
    pub fn record_fallback(&self, operation: TransformOperation, failure_class: &'static str) {
        let labels = &[KeyValue::new("operation", operation.to_string())];
        self.items.add(1, labels);

        let failure_labels = &[
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("failure_class", failure_class),
        ];
        self.failures.add(1, failure_labels);
    }
}

impl Default for TransformMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
