//! Forwarding through the coordinator's router.

use super::helpers::{Stack, settings, stack, stack_with};
use rstest::rstest;
use serde_json::{Map, json};
use std::time::Duration;
use switchyard::{
    cascade::domain::CascadeRequest,
    config::SwitchyardSettings,
    coordinator::MAX_DEFAULT_DEADLINE,
    creation::{adapters::GENERATE_ACTION, domain::GenerationMethod},
    failure::FailureKind,
};
use tokio::time::Instant;

#[rstest]
#[tokio::test]
async fn forwarding_to_an_unregistered_id_makes_no_call(stack: Stack) {
    let result = stack
        .coordinator
        .forward("ghost", "echo", Map::new(), None)
        .await;

    assert_eq!(result.error_kind(), Some(FailureKind::UnknownTarget));
    assert!(stack.transport.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn forwarding_returns_the_target_payload(stack: Stack) {
    stack.register("echo", &["echo"]).await;
    stack.transport.respond("echo", Ok(json!({"text": "hi"})));
    let mut parameters = Map::new();
    parameters.insert("text".to_owned(), json!("hi"));

    let result = stack
        .coordinator
        .forward("echo", "echo", parameters, None)
        .await;

    assert!(result.is_success());
    assert_eq!(result.served_by(), Some("echo"));
    assert_eq!(result.payload(), Some(&json!({"text": "hi"})));
}

#[rstest]
#[tokio::test]
async fn ai_assist_calls_travel_through_the_router(mut settings: SwitchyardSettings) {
    settings.creation.ai_enabled = true;
    settings.creation.primary_ai = Some("writer".to_owned());
    let stack = stack_with(&settings);
    stack.register("writer", &["generate"]).await;
    stack.transport.respond(
        "writer",
        Ok(json!({"success": true, "content": "# Incident summary\n\nAll systems nominal."})),
    );
    let request = CascadeRequest::new("create", stack.coordinator.default_deadline())
        .with_parameter("intent", "write up the incident");

    let response = stack.coordinator.resolve("documentation", &request).await;

    let created = response.as_created().expect("creation engine served");
    let metadata = created.metadata().expect("metadata present");
    assert_eq!(metadata.generation_method, GenerationMethod::AiPrimary);
    assert_eq!(metadata.provider.as_deref(), Some("writer"));
    let calls = stack.transport.calls();
    let call = calls.first().expect("router recorded the assist call");
    assert_eq!(call.target_id, "writer");
    assert_eq!(call.action, GENERATE_ACTION);
    assert_eq!(call.parameters.get("contentType"), Some(&json!("document")));
    assert!(call.parameters.contains_key("prompt"));
}

#[rstest]
#[tokio::test]
async fn unregistered_ai_provider_degrades_to_template(mut settings: SwitchyardSettings) {
    settings.creation.ai_enabled = true;
    settings.creation.primary_ai = Some("writer".to_owned());
    settings.creation.secondary_ai = Some("backup-writer".to_owned());
    let stack = stack_with(&settings);
    let request = CascadeRequest::new("create", stack.coordinator.default_deadline())
        .with_parameter("intent", "write up the incident");

    let response = stack.coordinator.resolve("documentation", &request).await;

    let metadata = response
        .as_created()
        .and_then(|created| created.metadata())
        .expect("metadata present");
    assert!(response.is_success());
    assert_eq!(metadata.generation_method, GenerationMethod::Template);
    assert_eq!(metadata.ai_failures.len(), 2);
    assert!(stack.transport.calls().is_empty());
}

#[rstest]
#[case(u64::MAX)]
#[case(u64::MAX / 2)]
#[tokio::test(start_paused = true)]
async fn oversized_default_deadline_is_capped(
    mut settings: SwitchyardSettings,
    #[case] budget_ms: u64,
) {
    settings.routing.default_deadline_ms = budget_ms;
    let stack = stack_with(&settings);
    let before = Instant::now();

    let deadline = stack.coordinator.default_deadline();

    assert_eq!(deadline.duration_since(before), MAX_DEFAULT_DEADLINE);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn default_deadline_uses_configured_budget(mut settings: SwitchyardSettings) {
    settings.routing.default_deadline_ms = 1_500;
    let stack = stack_with(&settings);
    let before = Instant::now();

    let deadline = stack.coordinator.default_deadline();

    assert_eq!(deadline.duration_since(before), Duration::from_millis(1_500));
}
