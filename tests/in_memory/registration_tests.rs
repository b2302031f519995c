//! Registration lifecycle through the coordinator.

use super::helpers::{Stack, stack};
use rstest::rstest;
use switchyard::health::domain::ProbeOutcome;
use switchyard::registry::{
    domain::{ServiceId, ServiceStatus},
    services::{RegisterServiceRequest, ServiceRegistryServiceError},
};

#[rstest]
#[tokio::test]
async fn re_registration_keeps_one_descriptor_with_latest_data(stack: Stack) {
    for endpoint in ["http://x", "http://y:8080"] {
        stack
            .coordinator
            .register(RegisterServiceRequest::new("echo", endpoint).with_capabilities(["echo"]))
            .await
            .expect("registration should succeed");
    }

    let all = stack
        .coordinator
        .registry()
        .list_all()
        .await
        .expect("list should succeed");
    let found = stack
        .coordinator
        .registry()
        .lookup("echo")
        .await
        .expect("lookup should succeed");

    assert_eq!(all.len(), 1);
    assert_eq!(found.endpoint().as_str(), "http://y:8080");
}

#[rstest]
#[case(RegisterServiceRequest::new("", "http://x"))]
#[case(RegisterServiceRequest::new("echo", ""))]
#[case(RegisterServiceRequest::new("echo", "ftp://x"))]
#[tokio::test]
async fn malformed_registrations_are_rejected(stack: Stack, #[case] request: RegisterServiceRequest) {
    let result = stack.coordinator.register(request).await;

    assert!(matches!(result, Err(ServiceRegistryServiceError::Domain(_))));
    assert!(
        stack
            .coordinator
            .registry()
            .list_all()
            .await
            .expect("list should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn heartbeat_restores_an_unreachable_component(stack: Stack) {
    stack.register("echo", &["echo"]).await;
    stack.prober.set_outcome(
        ServiceId::new("echo").expect("valid id"),
        ProbeOutcome::unreachable("refused"),
    );
    stack
        .coordinator
        .run_health_cycle()
        .await
        .expect("cycle should succeed");

    let restored = stack
        .coordinator
        .heartbeat("echo")
        .await
        .expect("heartbeat should succeed");

    assert_eq!(restored.status(), ServiceStatus::Healthy);
}

#[rstest]
#[tokio::test]
async fn deregistered_components_are_unknown(stack: Stack) {
    stack.register("echo", &[]).await;

    stack
        .coordinator
        .deregister("echo")
        .await
        .expect("deregistration should succeed");
    let again = stack.coordinator.deregister("echo").await;

    assert!(matches!(again, Err(ServiceRegistryServiceError::NotFound(_))));
}
