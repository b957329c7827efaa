//! The closed loop: controller, driver, load and sensor wired in a fixed order.

use pl_core::{IoComponent, Parameter, Real, Role, TimeStep, set_component_defaults};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};

/// Owned, type-erased loop component.
pub type BoxedComponent = Box<dyn IoComponent + Send>;

/// Lifecycle of a [`System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemState {
    /// Freshly built or reset; time is zero.
    Unstepped,
    /// At least one step taken.
    Stepped,
}

/// Signals observed during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSignals {
    /// Simulated time after the step (s).
    pub time: Real,
    pub setpoint: Real,
    /// `setpoint` minus the sensor output left by the previous step.
    pub error: Real,
    /// Controller output.
    pub command: Real,
    /// Driver output.
    pub actuation: Real,
    /// Load output.
    pub state: Real,
    /// Sensor output.
    pub measurement: Real,
}

impl StepSignals {
    fn initial(setpoint: Real) -> Self {
        Self {
            time: 0.0,
            setpoint,
            error: 0.0,
            command: 0.0,
            actuation: 0.0,
            state: 0.0,
            measurement: 0.0,
        }
    }
}

/// A closed control loop.
///
/// Each [`step`](System::step) runs, in this order:
///
/// ```text
/// error       = setpoint - sensor output (0 before the first step)
/// command     = controller(error)
/// actuation   = driver(command)
/// state       = load(actuation)
/// measurement = sensor(state)
/// time       += dt
/// ```
///
/// Every component is told the loop's `dt` when the system is built.
pub struct System {
    name: String,
    controller: BoxedComponent,
    driver: BoxedComponent,
    load: BoxedComponent,
    sensor: BoxedComponent,
    setpoint: Real,
    dt: TimeStep,
    steps: u64,
    last: StepSignals,
}

impl System {
    pub fn builder(name: impl Into<String>) -> SystemBuilder {
        SystemBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advance the loop by one step and return the signals it produced.
    pub fn step(&mut self) -> StepSignals {
        // The sensor is read live so a retune between steps is seen at once.
        let measured = if self.steps == 0 {
            0.0
        } else {
            self.sensor.output()
        };
        let error = self.setpoint - measured;

        self.controller.set_input(error);
        let command = self.controller.output();

        self.driver.set_input(command);
        let actuation = self.driver.output();

        self.load.set_input(actuation);
        let state = self.load.output();

        self.sensor.set_input(state);
        let measurement = self.sensor.output();

        self.steps += 1;
        // Multiply rather than accumulate so long runs do not drift.
        let time = self.steps as Real * self.dt.seconds();

        let signals = StepSignals {
            time,
            setpoint: self.setpoint,
            error,
            command,
            actuation,
            state,
            measurement,
        };
        trace!(
            system = %self.name,
            step = self.steps,
            time,
            error,
            command,
            actuation,
            state,
            measurement,
            "step"
        );
        self.last = signals;
        signals
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> Real {
        self.steps as Real * self.dt.seconds()
    }

    pub fn time_step(&self) -> TimeStep {
        self.dt
    }

    /// Steps taken since build or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn state(&self) -> SystemState {
        if self.steps == 0 {
            SystemState::Unstepped
        } else {
            SystemState::Stepped
        }
    }

    pub fn setpoint(&self) -> Real {
        self.setpoint
    }

    /// Change the target. Takes effect on the next step.
    pub fn set_setpoint(&mut self, setpoint: Real) -> SimResult<()> {
        self.setpoint = pl_core::ensure_finite(setpoint, "setpoint")?;
        Ok(())
    }

    /// Signals of the latest step, or the all-zero snapshot before the first.
    pub fn last_signals(&self) -> StepSignals {
        self.last
    }

    pub fn component(&self, role: Role) -> &(dyn IoComponent + Send) {
        match role {
            Role::Controller => &*self.controller,
            Role::Driver => &*self.driver,
            Role::Load => &*self.load,
            Role::Sensor => &*self.sensor,
        }
    }

    pub fn component_mut(&mut self, role: Role) -> &mut (dyn IoComponent + Send) {
        match role {
            Role::Controller => &mut *self.controller,
            Role::Driver => &mut *self.driver,
            Role::Load => &mut *self.load,
            Role::Sensor => &mut *self.sensor,
        }
    }

    pub fn parameters(&self, role: Role) -> Vec<Parameter> {
        self.component(role).parameters()
    }

    /// Forward a (partial) parameter update to the component in `role`.
    pub fn set_parameters(&mut self, role: Role, params: &[Parameter]) {
        debug!(system = %self.name, %role, count = params.len(), "set parameters");
        self.component_mut(role).set_parameters(params);
    }

    /// Restore the defaults of the component in `role`.
    pub fn set_defaults(&mut self, role: Role) {
        set_component_defaults(self.component_mut(role));
    }

    /// Every role with its parameter list, in loop order.
    pub fn all_parameters(&self) -> Vec<(Role, Vec<Parameter>)> {
        Role::ALL
            .iter()
            .map(|&role| (role, self.parameters(role)))
            .collect()
    }

    /// Return to `Unstepped`: components reset, parameters and setpoint kept.
    pub fn reset(&mut self) {
        for role in Role::ALL {
            self.component_mut(role).reset();
        }
        self.steps = 0;
        self.last = StepSignals::initial(self.setpoint);
        debug!(system = %self.name, "reset");
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("controller", &self.controller.describe())
            .field("driver", &self.driver.describe())
            .field("load", &self.load.describe())
            .field("sensor", &self.sensor.describe())
            .field("setpoint", &self.setpoint)
            .field("dt", &self.dt)
            .field("steps", &self.steps)
            .finish()
    }
}

/// Assembles a [`System`]; every role and the time step are required.
#[derive(Default)]
pub struct SystemBuilder {
    name: String,
    controller: Option<BoxedComponent>,
    driver: Option<BoxedComponent>,
    load: Option<BoxedComponent>,
    sensor: Option<BoxedComponent>,
    setpoint: Real,
    dt: Option<Real>,
}

impl SystemBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn controller(mut self, c: impl IoComponent + Send + 'static) -> Self {
        self.controller = Some(Box::new(c));
        self
    }

    pub fn driver(mut self, c: impl IoComponent + Send + 'static) -> Self {
        self.driver = Some(Box::new(c));
        self
    }

    pub fn load(mut self, c: impl IoComponent + Send + 'static) -> Self {
        self.load = Some(Box::new(c));
        self
    }

    pub fn sensor(mut self, c: impl IoComponent + Send + 'static) -> Self {
        self.sensor = Some(Box::new(c));
        self
    }

    /// Place an already boxed component in `role`.
    pub fn component(mut self, role: Role, c: BoxedComponent) -> Self {
        let slot = match role {
            Role::Controller => &mut self.controller,
            Role::Driver => &mut self.driver,
            Role::Load => &mut self.load,
            Role::Sensor => &mut self.sensor,
        };
        *slot = Some(c);
        self
    }

    /// Initial target, 0 when not set.
    pub fn setpoint(mut self, setpoint: Real) -> Self {
        self.setpoint = setpoint;
        self
    }

    pub fn time_step(mut self, dt: TimeStep) -> Self {
        self.dt = Some(dt.seconds());
        self
    }

    /// Time step in seconds; validated by [`build`](Self::build).
    pub fn time_step_seconds(mut self, dt: Real) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn build(self) -> SimResult<System> {
        let take = |slot: Option<BoxedComponent>, role| slot.ok_or(SimError::MissingRole { role });
        let mut controller = take(self.controller, Role::Controller)?;
        let mut driver = take(self.driver, Role::Driver)?;
        let mut load = take(self.load, Role::Load)?;
        let mut sensor = take(self.sensor, Role::Sensor)?;

        let dt = match self.dt {
            Some(secs) => TimeStep::from_seconds(secs)?,
            None => {
                return Err(SimError::InvalidArg {
                    what: "time step not set",
                });
            }
        };
        let setpoint = pl_core::ensure_finite(self.setpoint, "setpoint")?;

        for c in [&mut controller, &mut driver, &mut load, &mut sensor] {
            c.set_time_step(dt);
        }

        debug!(
            system = %self.name,
            controller = %controller.describe(),
            driver = %driver.describe(),
            load = %load.describe(),
            sensor = %sensor.describe(),
            dt = dt.seconds(),
            setpoint,
            "system built"
        );

        Ok(System {
            name: self.name,
            controller,
            driver,
            load,
            sensor,
            setpoint,
            dt,
            steps: 0,
            last: StepSignals::initial(setpoint),
        })
    }
}
