//! Built-in loops.
//!
//! | name          | controller  | driver      | load              | sensor    |
//! |---------------|-------------|-------------|-------------------|-----------|
//! | `unity`       | P (kp = 1)  | identity    | accumulator       | identity  |
//! | `first-order` | PI          | 1st-order actuator | 1st-order plant | low-pass |
//! | `mass-spring` | clamped PID | gain        | mass-spring-damper| gain      |

use pl_controls::{FirstOrderActuator, OutputClamp, PidController, PidGains};

use crate::components::{Accumulator, FirstOrderPlant, Gain, LowPassSensor, MassSpringDamper};
use crate::error::SimResult;
use crate::generator::{GeneratorRegistry, SystemGenerator};
use crate::integrator::IntegratorType;
use crate::system::{System, SystemBuilder};

/// Register every built-in generator.
pub fn register_builtins(registry: &mut GeneratorRegistry) -> SimResult<()> {
    registry.register(Box::new(UnityLoop))?;
    registry.register(Box::new(FirstOrderLoop))?;
    registry.register(Box::new(MassSpringLoop))?;
    Ok(())
}

/// Proportional controller, identity driver and sensor, unit accumulator
/// load, `dt = 1 s`, setpoint 10.
#[derive(Debug, Clone, Copy)]
pub struct UnityLoop;

impl SystemGenerator for UnityLoop {
    fn name(&self) -> &str {
        "unity"
    }

    fn description(&self) -> &str {
        "P controller driving a unit accumulator through identity blocks"
    }

    fn generate_system(&self) -> SimResult<System> {
        SystemBuilder::new(self.name())
            .controller(PidController::new()?)
            .driver(Gain::identity()?)
            .load(Accumulator::unit()?)
            .sensor(Gain::identity()?)
            .setpoint(10.0)
            .time_step_seconds(1.0)
            .build()
    }
}

/// PI control of a first-order process through a rate-limited actuator.
#[derive(Debug, Clone, Copy)]
pub struct FirstOrderLoop;

impl SystemGenerator for FirstOrderLoop {
    fn name(&self) -> &str {
        "first-order"
    }

    fn description(&self) -> &str {
        "PI control of a first-order plant via actuator and filtered sensor"
    }

    fn generate_system(&self) -> SimResult<System> {
        let pid = PidController::with_gains(PidGains {
            kp: 2.0,
            ki: 1.5,
            kd: 0.0,
        })?;
        SystemBuilder::new(self.name())
            .controller(pid)
            .driver(FirstOrderActuator::new(0.05, 100.0, -100.0, 100.0)?)
            .load(FirstOrderPlant::new(1.0, 1.0, 0.0)?.with_integrator(IntegratorType::RK4))
            .sensor(LowPassSensor::new(0.02, 1.0)?)
            .setpoint(1.0)
            .time_step_seconds(0.01)
            .build()
    }
}

/// Position control of a mass on a spring with a force-limited PID.
#[derive(Debug, Clone, Copy)]
pub struct MassSpringLoop;

impl SystemGenerator for MassSpringLoop {
    fn name(&self) -> &str {
        "mass-spring"
    }

    fn description(&self) -> &str {
        "Force-limited PID positioning a mass-spring-damper"
    }

    fn generate_system(&self) -> SimResult<System> {
        let pid = PidController::with_gains(PidGains {
            kp: 20.0,
            ki: 10.0,
            kd: 5.0,
        })?;
        SystemBuilder::new(self.name())
            .controller(OutputClamp::new(pid, -50.0, 50.0)?)
            .driver(Gain::identity()?)
            .load(MassSpringDamper::new(1.0, 1.0, 10.0)?.with_integrator(IntegratorType::RK4))
            .sensor(Gain::identity()?)
            .setpoint(1.0)
            .time_step_seconds(0.01)
            .build()
    }
}
