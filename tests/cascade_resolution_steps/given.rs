//! Given steps for cascade resolution BDD scenarios.

use super::world::{CascadeWorld, PendingComponent};
use rstest_bdd_macros::given;
use serde_json::json;
use switchyard::routing::ports::ForwardError;

fn queue(world: &mut CascadeWorld, id: &str, capabilities: Vec<String>, unreachable: bool) {
    world.pending.push(PendingComponent {
        id: id.to_owned(),
        capabilities,
        unreachable,
    });
}

#[given(r#"the "{category}" chain is "{specs}""#)]
fn chain_is(world: &mut CascadeWorld, category: String, specs: String) {
    let candidates = specs
        .split(',')
        .map(|spec| spec.trim().to_owned())
        .filter(|spec| !spec.is_empty())
        .collect();
    world.settings.cascade.chains.insert(category, candidates);
}

#[given(r#"a registered component "{id}" that fails with a target error"#)]
fn component_with_target_error(world: &mut CascadeWorld, id: String) {
    world
        .transport
        .respond(id.as_str(), Err(ForwardError::Target("rejected input".to_owned())));
    queue(world, &id, Vec::new(), false);
}

#[given(r#"a registered component "{id}" that fails with a transport error"#)]
fn component_with_transport_error(world: &mut CascadeWorld, id: String) {
    world
        .transport
        .respond(id.as_str(), Err(ForwardError::Transport("connection reset".to_owned())));
    queue(world, &id, Vec::new(), false);
}

#[given(r#"a registered component "{id}" that answers successfully"#)]
fn component_answering(world: &mut CascadeWorld, id: String) {
    world
        .transport
        .respond(id.as_str(), Ok(json!({"served": id.as_str()})));
    queue(world, &id, Vec::new(), false);
}

#[given(r#"a registered component "{id}" with capability "{capability}""#)]
fn component_with_capability(world: &mut CascadeWorld, id: String, capability: String) {
    queue(world, &id, vec![capability], false);
}

#[given(r#"a registered component "{id}" that is unreachable"#)]
fn unreachable_component(world: &mut CascadeWorld, id: String) {
    queue(world, &id, Vec::new(), true);
}
