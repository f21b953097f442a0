// End-to-end generation scenarios
//
// Tests the full select -> generate -> watermark -> publish flow:
// - Output keeps the generator's dimensions and carries the badge
// - Generator failures end in Failed with the generic message, inputs kept
// - Retry reuses the held inputs
// - Reset after completion clears everything

use super::test_harness::*;
use tifomaster::constants::GENERIC_FAILURE_MESSAGE;
use tifomaster::generator::{GenerationError, MockGenerator};
use tifomaster::orchestrator::{GenerationOutcome, GenerationStatus, TriggerRejected, WizardStep};
use tifomaster::watermark::BadgeGeometry;

#[tokio::test]
async fn test_full_hd_generation_is_watermarked() {
    // Test: 1920x1080 result for Sénégal keeps its size and gets the badge
    let mock = MockGenerator::succeeding(png(1920, 1080));
    let orch = ready_orchestrator(&mock, "senegal");

    let outcome = orch.generate().await.unwrap();
    let result = match outcome {
        GenerationOutcome::Completed(image) => image,
        other => panic!("expected completion, got {:?}", other),
    };
    assert_eq!(result.dimensions(), (1920, 1080));

    let decoded = image::load_from_memory(result.png()).unwrap().to_rgba8();
    let g = BadgeGeometry::for_dimensions(1920, 1080);
    assert_eq!(g.x.round() as u32, 1517);

    // Inside the pill, left of the icon: darkened
    let inside = decoded.get_pixel(g.x as u32 - 5, (g.y + g.badge_height / 2.0) as u32);
    assert_ne!(*inside, STADIUM_GREEN);
    // Just left of the pill: untouched
    let outside = decoded.get_pixel(g.background().x as u32 - 2, (g.y + g.badge_height / 2.0) as u32);
    assert_eq!(*outside, STADIUM_GREEN);
    // Top-left corner: untouched
    assert_eq!(*decoded.get_pixel(0, 0), STADIUM_GREEN);

    let state = orch.snapshot();
    assert_eq!(state.status(), GenerationStatus::Completed);
    assert_eq!(state.step(), WizardStep::Result);
    assert_eq!(mock.calls()[0].team_name, "Sénégal");
}

#[tokio::test]
async fn test_generator_error_then_retry() {
    // Test: Processing -> Failed keeps inputs; retry dispatches with the same inputs
    let mock = MockGenerator::succeeding(png(640, 360)).gated();
    mock.push_response(Err(GenerationError::Quota("daily limit".to_string())));
    let orch = ready_orchestrator(&mock, "cameroon");
    let image_before = orch.snapshot().image().cloned().unwrap();

    let first = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.generate().await })
    };
    mock.wait_for_call().await;
    assert_eq!(orch.status(), GenerationStatus::Processing);
    mock.release(1);

    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, GenerationOutcome::Failed(msg) if msg == GENERIC_FAILURE_MESSAGE));

    let failed = orch.snapshot();
    assert_eq!(failed.status(), GenerationStatus::Failed);
    assert_eq!(failed.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(failed.team().unwrap().id, "cameroon");
    assert!(std::sync::Arc::ptr_eq(failed.image().unwrap(), &image_before));
    assert!(failed.result().is_none());

    // Retry
    let retry = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.generate().await })
    };
    mock.wait_for_call().await;
    assert_eq!(orch.status(), GenerationStatus::Processing);
    assert_eq!(orch.snapshot().error_message(), None);
    mock.release(1);

    let outcome = retry.await.unwrap().unwrap();
    assert!(matches!(outcome, GenerationOutcome::Completed(_)));

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_every_generator_error_shows_same_message() {
    let errors = vec![
        GenerationError::Network("connection reset".to_string()),
        GenerationError::Auth("bad key".to_string()),
        GenerationError::EmptyResult,
        GenerationError::Api {
            status: 500,
            message: "internal".to_string(),
        },
    ];

    for error in errors {
        let mock = MockGenerator::failing(error);
        let orch = ready_orchestrator(&mock, "france");
        let outcome = orch.generate().await.unwrap();
        assert!(matches!(outcome, GenerationOutcome::Failed(msg) if msg == GENERIC_FAILURE_MESSAGE));
    }
}

#[tokio::test]
async fn test_watermark_failure_is_reported_like_generation_failure() {
    // Generator "succeeds" with bytes that are not an image
    let mock = MockGenerator::succeeding(vec![0xde, 0xad, 0xbe, 0xef]);
    let orch = ready_orchestrator(&mock, "brazil");

    let outcome = orch.generate().await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Failed(msg) if msg == GENERIC_FAILURE_MESSAGE));
    assert_eq!(orch.status(), GenerationStatus::Failed);
    assert!(orch.snapshot().image().is_some());
}

#[tokio::test]
async fn test_reset_after_completion() {
    // Test: Completed -> reset -> Idle with nothing held
    let mock = MockGenerator::succeeding(png(320, 180));
    let orch = ready_orchestrator(&mock, "psg");
    let mut rx = orch.subscribe();

    orch.generate().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), GenerationStatus::Completed);

    orch.reset().unwrap();

    let state = orch.snapshot();
    assert_eq!(state.status(), GenerationStatus::Idle);
    assert_eq!(state.step(), WizardStep::Upload);
    assert!(state.image().is_none());
    assert!(state.team().is_none());
    assert!(state.result().is_none());
    assert!(state.error_message().is_none());
    assert_eq!(*rx.borrow_and_update(), GenerationStatus::Idle);

    // A fresh run needs fresh inputs
    assert_eq!(orch.generate().await.unwrap_err(), TriggerRejected::MissingInputs);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_selection_rejected_after_completion_until_reset() {
    let mock = MockGenerator::succeeding(png(64, 64));
    let orch = ready_orchestrator(&mock, "juventus");
    orch.generate().await.unwrap();

    assert_eq!(
        orch.select_team(team("acmilan")).unwrap_err(),
        TriggerRejected::AlreadyCompleted
    );
    orch.reset().unwrap();
    assert_eq!(orch.select_team(team("acmilan")), Ok(GenerationStatus::Idle));
}

#[tokio::test]
async fn test_small_generated_image_still_composites() {
    // Badge overflows tiny images but compositing still succeeds
    let mock = MockGenerator::succeeding(png(40, 20));
    let orch = ready_orchestrator(&mock, "dortmund");

    match orch.generate().await.unwrap() {
        GenerationOutcome::Completed(image) => assert_eq!(image.dimensions(), (40, 20)),
        other => panic!("expected completion, got {:?}", other),
    }
}
