//! Turn a loaded scenario into a ready-to-run system.

use pl_core::Role;
use pl_project::Scenario;
use pl_sim::{GeneratorRegistry, RunOptions, System};
use tracing::{info, warn};

use crate::error::CliResult;

/// Generate the scenario's system and apply its setpoint and overrides.
///
/// Override names the component does not know are reported and skipped.
pub fn build_system(registry: &GeneratorRegistry, scenario: &Scenario) -> CliResult<System> {
    let mut system = registry.generate(&scenario.generator)?;

    if let Some(sp) = scenario.setpoint {
        system.set_setpoint(sp)?;
    }

    for role in Role::ALL {
        let overrides = scenario.overrides(role);
        if overrides.is_empty() {
            continue;
        }
        let descriptors = system.parameters(role);
        let mut resolved = Vec::with_capacity(overrides.len());
        for o in overrides {
            match o.resolve(&descriptors) {
                Some(p) => resolved.push(p),
                None => warn!(
                    scenario = %scenario.name,
                    %role,
                    parameter = %o.name,
                    "unknown parameter in scenario ignored"
                ),
            }
        }
        info!(%role, count = resolved.len(), "applying parameter overrides");
        system.set_parameters(role, &resolved);
    }

    Ok(system)
}

pub fn run_options(scenario: &Scenario) -> RunOptions {
    RunOptions {
        steps: scenario.steps,
        record_every: scenario.record_every,
    }
}
