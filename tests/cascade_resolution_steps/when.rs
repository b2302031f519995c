//! When steps for cascade resolution BDD scenarios.

use std::sync::Arc;

use super::world::{CascadeWorld, TestCoordinator, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use switchyard::{
    cascade::domain::CascadeRequest,
    clock::ManualClock,
    health::domain::ProbeOutcome,
    registry::{domain::ServiceId, services::RegisterServiceRequest},
};
use tokio::time::Instant;

fn assemble(world: &CascadeWorld) -> Result<TestCoordinator, eyre::Report> {
    let coordinator = TestCoordinator::assemble(
        &world.settings,
        Arc::clone(&world.transport),
        Arc::clone(&world.prober),
        Arc::new(ManualClock::default()),
    )
    .wrap_err("assemble coordinator")?;

    for pending in &world.pending {
        let request = RegisterServiceRequest::new(
            pending.id.as_str(),
            format!("http://{}.internal", pending.id),
        )
        .with_capabilities(pending.capabilities.iter().map(String::as_str));
        run_async(coordinator.register(request)).wrap_err("register component")?;
        if pending.unreachable {
            let id = ServiceId::new(pending.id.as_str()).wrap_err("valid service id")?;
            world
                .prober
                .set_outcome(id, ProbeOutcome::unreachable("connection refused"));
        }
    }
    run_async(coordinator.run_health_cycle()).wrap_err("run probe cycle")?;
    Ok(coordinator)
}

fn resolve(world: &mut CascadeWorld, category: &str, expired: bool) -> Result<(), eyre::Report> {
    let coordinator = assemble(world)?;
    let deadline = if expired {
        Instant::now()
    } else {
        coordinator.default_deadline()
    };
    let request = CascadeRequest::new("echo", deadline)
        .with_parameter("intent", "summarise the incident for the team");
    world.response = Some(run_async(coordinator.resolve(category, &request)));
    world.coordinator = Some(coordinator);
    Ok(())
}

#[when(r#"the "{category}" intent is resolved"#)]
fn intent_resolved(world: &mut CascadeWorld, category: String) -> Result<(), eyre::Report> {
    resolve(world, &category, false)
}

#[when(r#"the "{category}" intent is resolved with an expired deadline"#)]
fn intent_resolved_expired(world: &mut CascadeWorld, category: String) -> Result<(), eyre::Report> {
    resolve(world, &category, true)
}
