//! Then steps for service registry BDD scenarios.

use super::world::{RegistryWorld, run_async};
use ensemble::service_registry::{
    domain::{ServiceId, ServiceRegistryDomainError},
    services::ServiceRegistryError,
};
use rstest_bdd_macros::then;

#[then("{count:usize} services are recovered")]
fn services_recovered(world: &RegistryWorld, count: usize) -> Result<(), eyre::Report> {
    if world.recovered.len() != count {
        return Err(eyre::eyre!(
            "expected {count} recovered services, found {}",
            world.recovered.len()
        ));
    }
    Ok(())
}

#[then(r#"service "{name}" is recovered with context "{context}""#)]
fn service_recovered_with_context(
    world: &RegistryWorld,
    name: String,
    context: String,
) -> Result<(), eyre::Report> {
    let handle = world
        .recovered
        .iter()
        .find(|handle| handle.id().as_str() == name)
        .ok_or_else(|| eyre::eyre!("service '{name}' was not recovered"))?;
    if handle.service().spec_file.as_deref() != Some(context.as_str()) {
        return Err(eyre::eyre!(
            "expected context '{context}', got {:?}",
            handle.service().spec_file
        ));
    }
    Ok(())
}

#[then("listing returns {count:usize} entries")]
fn listing_returns(world: &mut RegistryWorld, count: usize) -> Result<(), eyre::Report> {
    let entries =
        run_async(world.registry.list()).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if entries.len() != count {
        return Err(eyre::eyre!(
            "expected {count} entries, found {}",
            entries.len()
        ));
    }
    Ok(())
}

#[then(r#"service "{name}" is listed without context"#)]
fn listed_without_context(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    let entries =
        run_async(world.registry.list()).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    let entry = entries
        .iter()
        .find(|entry| entry.id().as_str() == name)
        .ok_or_else(|| eyre::eyre!("service '{name}' is not listed"))?;
    if entry.context().is_some() {
        return Err(eyre::eyre!("expected '{name}' to have no context"));
    }
    Ok(())
}

#[then(r#"service "{name}" has no stored entry"#)]
fn has_no_stored_entry(world: &mut RegistryWorld, name: String) -> Result<(), eyre::Report> {
    let stored = run_async(world.registry.get(&ServiceId::new(name.as_str())))
        .map_err(|err| eyre::eyre!("get failed: {err}"))?;
    if stored.is_some() {
        return Err(eyre::eyre!("expected '{name}' to be removed"));
    }
    Ok(())
}

#[then("the add is rejected as too large")]
fn add_rejected_as_too_large(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_put_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing add result in scenario world"))?;
    if !matches!(
        result,
        Err(ServiceRegistryError::Domain(
            ServiceRegistryDomainError::ContextTooLarge { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected too-large rejection, got {result:?}"));
    }
    Ok(())
}

#[then("the add is rejected as a build failure")]
fn add_rejected_as_build_failure(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_put_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing add result in scenario world"))?;
    if !matches!(result, Err(ServiceRegistryError::Build { .. })) {
        return Err(eyre::eyre!("expected build failure, got {result:?}"));
    }
    Ok(())
}
