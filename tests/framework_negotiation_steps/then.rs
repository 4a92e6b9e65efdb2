//! Then steps for framework negotiation BDD scenarios.

use super::world::NegotiationWorld;
use ensemble::framework::{
    adapters::memory::Registration,
    domain::{FrameworkCapability, RoleAssignment},
};
use rstest_bdd_macros::then;

fn registration(world: &NegotiationWorld) -> Result<&Registration, eyre::Report> {
    world
        .registration
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the driver saw no registration"))
}

#[then(r#"the registration advertises capabilities "{expected}""#)]
fn advertises_capabilities(world: &NegotiationWorld, expected: String) -> Result<(), eyre::Report> {
    let advertised = registration(world)?
        .descriptor
        .capabilities()
        .iter()
        .map(|capability| capability.as_str())
        .collect::<Vec<_>>()
        .join(",");
    if advertised != expected {
        return Err(eyre::eyre!(
            "expected capabilities '{expected}', got '{advertised}'"
        ));
    }
    Ok(())
}

#[then(r#"the registration uses the single role "{role}""#)]
fn uses_single_role(world: &NegotiationWorld, role: String) -> Result<(), eyre::Report> {
    let descriptor = &registration(world)?.descriptor;
    if descriptor.roles() != &RoleAssignment::Single(role.clone()) {
        return Err(eyre::eyre!(
            "expected single role '{role}', got {:?}",
            descriptor.roles()
        ));
    }
    if descriptor.has_capability(FrameworkCapability::MultiRole) {
        return Err(eyre::eyre!("single-role registration advertised MULTI_ROLE"));
    }
    Ok(())
}

#[then("the registration uses {count:usize} roles")]
fn uses_role_count(world: &NegotiationWorld, count: usize) -> Result<(), eyre::Report> {
    let descriptor = &registration(world)?.descriptor;
    match descriptor.roles() {
        RoleAssignment::Multi(roles) if roles.len() == count => Ok(()),
        other => Err(eyre::eyre!("expected {count} roles, got {other:?}")),
    }
}

#[then("the process keeps running")]
fn process_keeps_running(world: &NegotiationWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .outcome
        .ok_or_else(|| eyre::eyre!("the framework never registered"))?;
    if let Some(exit) = outcome.required_exit() {
        return Err(eyre::eyre!("expected no exit, got {exit}"));
    }
    Ok(())
}

#[then("the process must exit with code {code:i32}")]
fn process_must_exit(world: &NegotiationWorld, code: i32) -> Result<(), eyre::Report> {
    let outcome = world
        .outcome
        .ok_or_else(|| eyre::eyre!("the framework never registered"))?;
    match outcome.required_exit() {
        Some(exit) if exit.code() == code => Ok(()),
        other => Err(eyre::eyre!("expected exit code {code}, got {other:?}")),
    }
}
