//! Given steps for service registry BDD scenarios.

use super::world::{RegistryWorld, run_async};
use ensemble::service_registry::domain::ServiceId;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a service "{name}" added with context "{context}""#)]
fn service_added_with_context(
    world: &mut RegistryWorld,
    name: String,
    context: String,
) -> Result<(), eyre::Report> {
    run_async(
        world
            .registry
            .put(ServiceId::new(name), Some(context.into_bytes())),
    )
    .wrap_err("add service with context")?;
    Ok(())
}

#[given(r#"a service "{name}" added without context"#)]
fn service_added_without_context(
    world: &mut RegistryWorld,
    name: String,
) -> Result<(), eyre::Report> {
    run_async(world.registry.put(ServiceId::new(name), None))
        .wrap_err("add service without context")?;
    Ok(())
}
