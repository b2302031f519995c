//! Then steps for cascade resolution BDD scenarios.

use super::world::{CascadeWorld, run_async};
use rstest_bdd_macros::then;

#[then(r#"the response is served by "{id}""#)]
fn served_by(world: &CascadeWorld, id: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if response.served_by() != Some(id.as_str()) {
        return Err(eyre::eyre!("expected '{id}' to serve, got {response:?}"));
    }
    Ok(())
}

#[then("the response carries no error kind")]
fn no_error_kind(world: &CascadeWorld) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if let Some(kind) = response.error_kind() {
        return Err(eyre::eyre!("expected no error kind, got {kind}"));
    }
    Ok(())
}

#[then(r#"the created artifact kind is "{kind}""#)]
fn created_kind(world: &CascadeWorld, kind: String) -> Result<(), eyre::Report> {
    let created = world
        .response()?
        .as_created()
        .ok_or_else(|| eyre::eyre!("creation engine did not serve"))?;
    if !created.is_success() {
        return Err(eyre::eyre!("creation failed: {created:?}"));
    }
    let actual = created.artifact_kind().map(|artifact| artifact.as_str());
    if actual != Some(kind.as_str()) {
        return Err(eyre::eyre!("expected artifact kind '{kind}', got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the response fails with "{kind}""#)]
fn fails_with(world: &CascadeWorld, kind: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if response.as_created().is_some() {
        return Err(eyre::eyre!("creation engine was reached: {response:?}"));
    }
    let actual = response.error_kind().map(|failure| failure.as_str());
    if actual != Some(kind.as_str()) {
        return Err(eyre::eyre!("expected '{kind}', got {actual:?}"));
    }
    Ok(())
}

#[then(r#"no network call reached "{id}""#)]
fn no_call_reached(world: &CascadeWorld, id: String) -> Result<(), eyre::Report> {
    let calls = world.transport.call_count(&id);
    if calls != 0 {
        return Err(eyre::eyre!("expected no calls to '{id}', saw {calls}"));
    }
    Ok(())
}

#[then(r#"the component "{id}" can be looked up"#)]
fn component_looked_up(world: &CascadeWorld, id: String) -> Result<(), eyre::Report> {
    let coordinator = world.coordinator()?;
    let descriptor = run_async(coordinator.registry().lookup(&id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if descriptor.id().as_str() != id {
        return Err(eyre::eyre!("lookup returned {descriptor:?}"));
    }
    Ok(())
}
