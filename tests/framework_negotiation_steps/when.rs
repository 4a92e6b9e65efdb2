//! When steps for framework negotiation BDD scenarios.

use super::world::{NegotiationWorld, run_async};
use ensemble::framework::{
    adapters::memory::{
        ImmediateControlSurface, InMemoryEventBridge, ScriptedClusterDriver,
        StaticCapabilityProbe,
    },
    domain::{ClusterCapabilities, DriverStatus, RunnerSettings, SchedulerConfig},
    services::FrameworkRunner,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when("the framework registers")]
fn framework_registers(world: &mut NegotiationWorld) -> Result<(), eyre::Report> {
    let framework = world
        .framework
        .clone()
        .ok_or_else(|| eyre::eyre!("framework must be configured first"))?;
    let settings = RunnerSettings::new(
        framework,
        SchedulerConfig::new(world.region_awareness_enabled),
    )
    .with_gpus(world.using_gpus);
    let driver = Arc::new(ScriptedClusterDriver::exiting_with(
        world.driver_status.unwrap_or(DriverStatus::Stopped),
    ));
    let capabilities = ClusterCapabilities::new(
        world.cluster_gpu,
        world.cluster_pre_reserved,
        world.cluster_region,
    );
    let runner = FrameworkRunner::new(
        settings,
        Arc::clone(&driver),
        Arc::new(StaticCapabilityProbe::new(capabilities)),
        Arc::new(InMemoryEventBridge::new()),
        Arc::new(ImmediateControlSurface::new()),
    );

    let outcome = run_async(runner.register_and_run()).wrap_err("run framework connection")?;
    world.outcome = Some(outcome);
    world.registration = driver.registrations().into_iter().next();
    Ok(())
}
