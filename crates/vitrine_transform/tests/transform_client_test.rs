// Tests for TransformClient dispatch, fallback and ordering behavior.
//
// These tests drive the client with MockMediaService so every failure
// mode can be injected deterministically.

mod test_utils;

use std::time::Duration;
use test_utils::{
    BatchScript, MockBehavior, MockMediaService, artifact, three_artifacts, transport_failure,
};
use tokio_util::sync::CancellationToken;
use vitrine_core::{BatchReport, MediaArtifact, TransformOperation, TransformRequest};
use vitrine_error::MediaServiceErrorKind;
use vitrine_transform::TransformClient;

/// Checks the invariants every report must satisfy for its inputs.
fn assert_report_invariants(inputs: &[MediaArtifact], report: &BatchReport) {
    assert_eq!(report.len(), inputs.len());

    for (input, result) in inputs.iter().zip(report.iter()) {
        assert_eq!(result.filename(), input.filename());
        assert!(!result.output().bytes().is_empty());
        assert_eq!(*result.original_size(), input.size());
        assert_eq!(*result.final_size(), result.output().size());

        if *result.succeeded() {
            let expected = vitrine_core::quality_ratio(input.size(), result.output().size());
            assert_eq!(*result.quality_ratio(), expected);
        } else {
            assert_eq!(result.output().bytes(), input.bytes());
            assert_eq!(*result.quality_ratio(), 0);
        }
    }
}

#[tokio::test]
async fn test_single_upscale_success_reports_ratio() {
    let service = MockMediaService::new().with_behavior("disc.png", MockBehavior::Succeed(1800));
    let client = TransformClient::new(service);
    let input = artifact("disc.png", 1000, 7);

    let result = client
        .transform_single(&input, TransformOperation::Upscale)
        .await;

    assert!(*result.succeeded());
    assert_eq!(*result.original_size(), 1000);
    assert_eq!(*result.final_size(), 1800);
    assert_eq!(*result.quality_ratio(), 180);
    assert_eq!(result.output().filename(), "disc.png");
    assert_eq!(
        client.service().called_operations(),
        vec![TransformOperation::Upscale]
    );
}

#[tokio::test]
async fn test_single_http_error_falls_back() {
    let service = MockMediaService::new().with_behavior(
        "disc.png",
        MockBehavior::Fail(MediaServiceErrorKind::Status {
            status_code: 500,
            message: "model crashed".to_string(),
        }),
    );
    let client = TransformClient::new(service);
    let input = artifact("disc.png", 1000, 7);

    let result = client
        .transform_single(&input, TransformOperation::Upscale)
        .await;

    assert!(!*result.succeeded());
    assert_eq!(result.output(), &input);
    assert_eq!(*result.final_size(), *result.original_size());
    assert_eq!(*result.quality_ratio(), 0);
}

#[tokio::test]
async fn test_single_empty_payload_falls_back() {
    let service = MockMediaService::new().with_behavior("a.png", MockBehavior::EmptyPayload);
    let client = TransformClient::new(service);
    let input = artifact("a.png", 10, 1);

    let result = client
        .transform_single(&input, TransformOperation::RemoveBackground)
        .await;

    assert!(!*result.succeeded());
    assert_eq!(result.output(), &input);
}

#[tokio::test]
async fn test_single_timeout_is_a_failure() {
    let service = MockMediaService::new().with_behavior("slow.png", MockBehavior::Hang);
    let client = TransformClient::new(service).with_call_timeout(Duration::from_millis(50));
    let input = artifact("slow.png", 10, 1);

    let result = client
        .transform_single(&input, TransformOperation::CombinedTreatment)
        .await;

    assert!(!*result.succeeded());
    assert_eq!(result.output(), &input);
    assert_eq!(*result.quality_ratio(), 0);
}

#[tokio::test]
async fn test_batch_remove_background_partial_failure() {
    let service = MockMediaService::new().with_behavior(
        "b.png",
        MockBehavior::Fail(MediaServiceErrorKind::ItemFailed("corrupt".to_string())),
    );
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    let outcomes: Vec<bool> = report.iter().map(|r| *r.succeeded()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert_eq!(client.service().batch_call_count(), 1);
    assert_eq!(client.service().call_count(), 0);
}

#[tokio::test]
async fn test_batch_remove_background_reorders_by_filename() {
    let service = MockMediaService::new()
        .with_behavior("a.png", MockBehavior::Succeed(11))
        .with_behavior("b.png", MockBehavior::Succeed(22))
        .with_behavior("c.png", MockBehavior::Succeed(33))
        .with_batch_script(BatchScript::Reversed);
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    let sizes: Vec<u64> = report.iter().map(|r| *r.final_size()).collect();
    assert_eq!(sizes, vec![11, 22, 33]);
}

#[tokio::test]
async fn test_batch_remove_background_omitted_item_falls_back() {
    let service =
        MockMediaService::new().with_batch_script(BatchScript::Omit(vec!["c.png".to_string()]));
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    assert!(*report.get(0).unwrap().succeeded());
    assert!(*report.get(1).unwrap().succeeded());
    assert!(!*report.get(2).unwrap().succeeded());
}

#[tokio::test]
async fn test_batch_remove_background_call_failure_keeps_every_item() {
    let service = MockMediaService::new().with_batch_script(BatchScript::Fail(transport_failure()));
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(report.failed_count(), 3);
}

#[tokio::test]
async fn test_batch_remove_background_cancelled_before_dispatch() {
    let service = MockMediaService::new();
    let client = TransformClient::new(service);
    let inputs = three_artifacts();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = client
        .transform_batch_remove_background(&inputs, &cancel)
        .await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(report.failed_count(), 3);
    assert_eq!(client.service().batch_call_count(), 0);
}

#[tokio::test]
async fn test_combined_treatment_isolates_transport_failure() {
    let service = MockMediaService::new()
        .with_behavior("b.png", MockBehavior::Fail(transport_failure()));
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_combined_treatment(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    let outcomes: Vec<bool> = report.iter().map(|r| *r.succeeded()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert_eq!(
        client.service().called_filenames(),
        vec!["a.png", "b.png", "c.png"]
    );
    assert!(
        client
            .service()
            .called_operations()
            .iter()
            .all(|op| *op == TransformOperation::CombinedTreatment)
    );
}

#[tokio::test]
async fn test_combined_treatment_failure_does_not_change_other_outcomes() {
    let inputs = three_artifacts();

    let baseline = TransformClient::new(MockMediaService::new())
        .transform_batch_combined_treatment(&inputs, &CancellationToken::new())
        .await;

    for failing in ["a.png", "b.png", "c.png"] {
        let service = MockMediaService::new().with_behavior(
            failing,
            MockBehavior::Fail(MediaServiceErrorKind::Status {
                status_code: 503,
                message: "busy".to_string(),
            }),
        );
        let report = TransformClient::new(service)
            .transform_batch_combined_treatment(&inputs, &CancellationToken::new())
            .await;

        assert_report_invariants(&inputs, &report);
        for (with_failure, without) in report.iter().zip(baseline.iter()) {
            if with_failure.filename() == failing {
                assert!(!*with_failure.succeeded());
            } else {
                assert_eq!(with_failure.succeeded(), without.succeeded());
            }
        }
    }
}

#[tokio::test]
async fn test_sequential_dispatch_keeps_one_call_in_flight() {
    let service = MockMediaService::new().with_delay(Duration::from_millis(10));
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_combined_treatment(&inputs, &CancellationToken::new())
        .await;

    assert!(report.all_succeeded());
    assert_eq!(client.service().call_count(), 3);
    assert_eq!(client.service().max_in_flight(), 1);
}

#[tokio::test]
async fn test_sequential_timeout_does_not_block_later_items() {
    let service = MockMediaService::new().with_behavior("a.png", MockBehavior::Hang);
    let client = TransformClient::new(service).with_call_timeout(Duration::from_millis(50));
    let inputs = three_artifacts();

    let report = client
        .transform_batch_combined_treatment(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    let outcomes: Vec<bool> = report.iter().map(|r| *r.succeeded()).collect();
    assert_eq!(outcomes, vec![false, true, true]);
}

#[tokio::test]
async fn test_cancellation_stops_issuing_sequential_calls() {
    let cancel = CancellationToken::new();
    let service = MockMediaService::new().cancel_after(1, cancel.clone());
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_combined_treatment(&inputs, &cancel)
        .await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(client.service().call_count(), 1);
    let outcomes: Vec<bool> = report.iter().map(|r| *r.succeeded()).collect();
    assert_eq!(outcomes, vec![true, false, false]);
}

#[tokio::test]
async fn test_transform_dispatches_background_removal_as_one_call() -> anyhow::Result<()> {
    let client = TransformClient::new(MockMediaService::new());
    let inputs = three_artifacts();
    let request = TransformRequest::new(TransformOperation::RemoveBackground, inputs.clone())?;

    let report = client.transform(request, &CancellationToken::new()).await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(client.service().batch_call_count(), 1);
    assert_eq!(client.service().call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_transform_dispatches_upscale_sequentially() -> anyhow::Result<()> {
    let client = TransformClient::new(MockMediaService::new());
    let inputs = three_artifacts();
    let request = TransformRequest::new(TransformOperation::Upscale, inputs.clone())?;

    let report = client.transform(request, &CancellationToken::new()).await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(client.service().batch_call_count(), 0);
    assert_eq!(
        client.service().called_operations(),
        vec![TransformOperation::Upscale; 3]
    );
    Ok(())
}

#[tokio::test]
async fn test_duplicate_filenames_keep_their_own_fallbacks() {
    let service = MockMediaService::new().with_batch_script(BatchScript::Fail(transport_failure()));
    let client = TransformClient::new(service);
    let inputs = vec![artifact("same.png", 10, 1), artifact("same.png", 20, 2)];

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    assert_eq!(report.get(0).unwrap().output().bytes(), &vec![1u8; 10]);
    assert_eq!(report.get(1).unwrap().output().bytes(), &vec![2u8; 20]);
}

#[tokio::test]
async fn test_batch_empty_payload_falls_back() {
    let service = MockMediaService::new().with_behavior("b.png", MockBehavior::EmptyPayload);
    let client = TransformClient::new(service);
    let inputs = three_artifacts();

    let report = client
        .transform_batch_remove_background(&inputs, &CancellationToken::new())
        .await;

    assert_report_invariants(&inputs, &report);
    let outcomes: Vec<bool> = report.iter().map(|r| *r.succeeded()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert_eq!(report.get(1).unwrap().output(), &inputs[1]);
    assert_eq!(client.service().batch_call_count(), 1);
}
