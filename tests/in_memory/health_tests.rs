//! Probe cycles, stale heartbeats, and the background monitor.

use std::time::Duration;

use super::helpers::{Stack, stack};
use rstest::rstest;
use switchyard::{
    health::domain::ProbeOutcome,
    registry::domain::{ServiceId, ServiceStatus},
};

fn id(value: &str) -> ServiceId {
    ServiceId::new(value).expect("valid id")
}

async fn status_of(stack: &Stack, value: &str) -> ServiceStatus {
    stack
        .coordinator
        .registry()
        .lookup(value)
        .await
        .expect("component registered")
        .status()
}

#[rstest]
#[tokio::test]
async fn stale_heartbeat_becomes_unreachable_within_one_cycle(stack: Stack) {
    stack.register("quiet", &[]).await;
    stack.register("chatty", &[]).await;
    stack
        .prober
        .set_outcome(id("quiet"), ProbeOutcome::unhealthy("HTTP 503"));
    stack.clock.advance(chrono::Duration::seconds(31));

    let report = stack
        .coordinator
        .run_health_cycle()
        .await
        .expect("cycle should succeed");

    assert_eq!(report.probed, 2);
    assert_eq!(report.stale, 1);
    assert_eq!(status_of(&stack, "quiet").await, ServiceStatus::Unreachable);
    assert_eq!(status_of(&stack, "chatty").await, ServiceStatus::Healthy);
}

#[rstest]
#[tokio::test]
async fn probe_failures_never_deregister(stack: Stack) {
    stack.register("flaky", &[]).await;
    stack
        .prober
        .set_outcome(id("flaky"), ProbeOutcome::unreachable("refused"));

    for _ in 0..3 {
        stack
            .coordinator
            .run_health_cycle()
            .await
            .expect("cycle should succeed");
    }

    assert_eq!(status_of(&stack, "flaky").await, ServiceStatus::Unreachable);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn background_monitor_runs_until_shutdown(stack: Stack) {
    stack.register("echo", &[]).await;
    let (shutdown, signal) = tokio::sync::watch::channel(false);
    let handle = stack.coordinator.spawn_health_monitor(signal);

    tokio::time::sleep(Duration::from_secs(25)).await;
    shutdown.send(true).expect("monitor still listening");
    handle.await.expect("monitor task exits cleanly");

    assert!(stack.prober.probe_count(&id("echo")) >= 2);
    assert_eq!(status_of(&stack, "echo").await, ServiceStatus::Healthy);
}
