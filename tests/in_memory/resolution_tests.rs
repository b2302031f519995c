//! Cascade resolution end to end.

use std::time::Duration;

use super::helpers::{Stack, settings, stack, stack_with};
use rstest::rstest;
use serde_json::json;
use switchyard::{
    cascade::domain::{CREATION_ENGINE_ID, CascadeRequest},
    config::SwitchyardSettings,
    creation::domain::ArtifactKind,
    failure::FailureKind,
    routing::ports::ForwardError,
};
use tokio::time::Instant;

#[rstest]
#[tokio::test]
async fn echo_scenario_falls_through_to_the_default_chain(stack: Stack) {
    stack.register("echo", &["echo"]).await;
    let echo = stack
        .coordinator
        .registry()
        .lookup("echo")
        .await
        .expect("echo is registered");
    assert!(echo.capabilities().contains("echo"));
    let request = CascadeRequest::new("echo", stack.coordinator.default_deadline())
        .with_parameter("intent", "hello there");

    let response = stack.coordinator.resolve("unknown-category", &request).await;

    let created = response.as_created().expect("creation engine served");
    assert!(created.is_success());
    assert_eq!(created.artifact_kind(), Some(ArtifactKind::Document));
    assert_eq!(response.served_by(), Some(CREATION_ENGINE_ID));
}

#[rstest]
#[tokio::test]
async fn capability_chain_prefers_the_healthy_provider(mut settings: SwitchyardSettings) {
    settings
        .cascade
        .chains
        .insert("ocr".to_owned(), vec!["capability:ocr".to_owned()]);
    let stack = stack_with(&settings);
    stack.register("ocr-a", &["ocr"]).await;
    stack.register("ocr-b", &["ocr"]).await;
    stack.transport.respond("ocr-a", Ok(json!("a")));
    stack.transport.respond("ocr-b", Ok(json!("b")));
    stack.prober.set_outcome(
        switchyard::registry::domain::ServiceId::new("ocr-a").expect("valid id"),
        switchyard::health::domain::ProbeOutcome::unhealthy("HTTP 500"),
    );
    stack
        .coordinator
        .run_health_cycle()
        .await
        .expect("cycle should succeed");
    let request = CascadeRequest::new("scan", stack.coordinator.default_deadline());

    let response = stack.coordinator.resolve("ocr", &request).await;

    assert_eq!(response.served_by(), Some("ocr-b"));
    assert_eq!(stack.transport.call_count("ocr-a"), 0);
}

#[rstest]
#[tokio::test]
async fn failing_chain_still_produces_an_artifact(mut settings: SwitchyardSettings) {
    settings.cascade.chains.insert(
        "development".to_owned(),
        vec!["a".to_owned(), "b".to_owned()],
    );
    let stack = stack_with(&settings);
    stack.register("a", &[]).await;
    stack
        .transport
        .respond("a", Err(ForwardError::Target("no".to_owned())));
    let request = CascadeRequest::new("build", stack.coordinator.default_deadline())
        .with_parameter("intent", "implement a retry function");

    let response = stack.coordinator.resolve("development", &request).await;

    let created = response.as_created().expect("creation engine served");
    assert!(created.is_success());
    assert_eq!(created.artifact_kind(), Some(ArtifactKind::Code));
    assert!(created.content().is_some_and(|code| code.contains("pub fn implement_a_retry_function")));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unreachable_candidate_with_expired_deadline_times_out(mut settings: SwitchyardSettings) {
    settings
        .cascade
        .chains
        .insert("echo".to_owned(), vec!["a".to_owned()]);
    let stack = stack_with(&settings);
    stack.register("a", &[]).await;
    stack.prober.set_outcome(
        switchyard::registry::domain::ServiceId::new("a").expect("valid id"),
        switchyard::health::domain::ProbeOutcome::unreachable("refused"),
    );
    stack
        .coordinator
        .run_health_cycle()
        .await
        .expect("cycle should succeed");
    let request = CascadeRequest::new("echo", Instant::now());
    tokio::time::advance(Duration::from_millis(1)).await;

    let response = stack.coordinator.resolve("echo", &request).await;

    assert!(response.as_created().is_none());
    assert_eq!(response.error_kind(), Some(FailureKind::Timeout));
}
