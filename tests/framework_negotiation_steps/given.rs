//! Given steps for framework negotiation BDD scenarios.

use super::world::NegotiationWorld;
use ensemble::framework::domain::{DriverStatus, FrameworkConfig};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a framework "{name}" with role "{role}""#)]
fn a_framework(
    world: &mut NegotiationWorld,
    name: String,
    role: String,
) -> Result<(), eyre::Report> {
    let principal = format!("{name}-principal");
    let config = FrameworkConfig::new(name, principal, "nobody", role, "master.mesos:2181")
        .wrap_err("build framework config")?;
    world.framework = Some(config);
    Ok(())
}

#[given("the framework requests GPU resources")]
fn requests_gpus(world: &mut NegotiationWorld) {
    world.using_gpus = true;
}

#[given(r#"the pre-reserved role "{role}""#)]
fn pre_reserved_role(world: &mut NegotiationWorld, role: String) -> Result<(), eyre::Report> {
    let framework = world
        .framework
        .take()
        .ok_or_else(|| eyre::eyre!("framework must be configured first"))?;
    let mut roles = framework.pre_reserved_roles().to_vec();
    roles.push(role);
    world.framework = Some(
        framework
            .with_pre_reserved_roles(roles)
            .wrap_err("add pre-reserved role")?,
    );
    Ok(())
}

#[given("region awareness is enabled")]
fn region_awareness_enabled(world: &mut NegotiationWorld) {
    world.region_awareness_enabled = true;
}

#[given("the cluster supports reservation refinement")]
fn cluster_supports_refinement(world: &mut NegotiationWorld) {
    world.cluster_pre_reserved = true;
}

#[given("the cluster supports region awareness")]
fn cluster_supports_region(world: &mut NegotiationWorld) {
    world.cluster_region = true;
}

#[given(r#"the driver will exit with status "{status}""#)]
fn driver_exit_status(world: &mut NegotiationWorld, status: String) -> Result<(), eyre::Report> {
    let parsed = DriverStatus::try_from(status.as_str()).wrap_err("parse driver status")?;
    world.driver_status = Some(parsed);
    Ok(())
}
