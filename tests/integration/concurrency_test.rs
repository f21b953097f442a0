// Single-flight generation tests
//
// Tests that at most one generation request is ever dispatched:
// - A trigger while Processing is rejected and dispatches nothing
// - Many simultaneous triggers from different tasks yield one dispatch
// - Inputs cannot change under an in-flight request

use super::test_harness::*;
use tifomaster::generator::MockGenerator;
use tifomaster::orchestrator::{GenerationOutcome, GenerationStatus, TriggerRejected};
use tokio::task::JoinSet;

#[tokio::test]
async fn test_trigger_while_processing_is_rejected() {
    // Test: second generate() during Processing returns AlreadyProcessing
    let mock = MockGenerator::succeeding(png(320, 180)).gated();
    let orch = ready_orchestrator(&mock, "senegal");

    let first = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.generate().await })
    };
    mock.wait_for_call().await;

    assert_eq!(
        orch.generate().await.unwrap_err(),
        TriggerRejected::AlreadyProcessing
    );
    assert_eq!(orch.status(), GenerationStatus::Processing);
    assert_eq!(mock.call_count(), 1);

    mock.release(1);
    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, GenerationOutcome::Completed(_)));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_triggers_dispatch_once() {
    // Test: 16 racing tasks, exactly one wins
    let mock = MockGenerator::succeeding(png(320, 180)).gated();
    let orch = ready_orchestrator(&mock, "morocco");

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let orch = orch.clone();
        tasks.spawn(async move { orch.generate().await });
    }

    // The winner is parked on the gate, so the 15 losers finish first
    for _ in 0..15 {
        let result = tasks.join_next().await.unwrap().unwrap();
        assert_eq!(result.unwrap_err(), TriggerRejected::AlreadyProcessing);
    }
    assert_eq!(mock.call_count(), 1);

    mock.release(1);
    let winner = tasks.join_next().await.unwrap().unwrap().unwrap();
    assert!(matches!(winner, GenerationOutcome::Completed(_)));
    assert!(tasks.join_next().await.is_none());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_inputs_frozen_while_processing() {
    let mock = MockGenerator::succeeding(png(64, 64)).gated();
    let orch = ready_orchestrator(&mock, "algeria");

    let first = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.generate().await })
    };
    mock.wait_for_call().await;

    assert_eq!(
        orch.select_image(selfie()).unwrap_err(),
        TriggerRejected::AlreadyProcessing
    );
    assert_eq!(
        orch.select_team(team("france")).unwrap_err(),
        TriggerRejected::AlreadyProcessing
    );
    assert_eq!(orch.reset().unwrap_err(), TriggerRejected::AlreadyProcessing);

    mock.release(1);
    first.await.unwrap().unwrap();
    assert_eq!(orch.snapshot().team().unwrap().id, "algeria");
}

#[tokio::test]
async fn test_status_stream_during_generation() {
    let mock = MockGenerator::succeeding(png(64, 64)).gated();
    let orch = ready_orchestrator(&mock, "liverpool");
    let mut rx = orch.subscribe();

    let task = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.generate().await })
    };

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), GenerationStatus::Processing);

    mock.release(1);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), GenerationStatus::Completed);
    task.await.unwrap().unwrap();
}
