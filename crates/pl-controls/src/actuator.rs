//! Actuator dynamics for control loops.
//!
//! Actuators introduce physical dynamics between controller output and the
//! process. The model here is a first-order lag with rate limiting, which
//! captures:
//! - Mechanical time constants (e.g., valve motor speed)
//! - Rate limits (maximum actuation speed)
//! - Position limits (travel end stops)

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

const TAU: usize = 0;
const RATE_LIMIT: usize = 1;
const POS_MIN: usize = 2;
const POS_MAX: usize = 3;

/// State of a first-order actuator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorState {
    /// Current position.
    pub position: Real,
}

/// First-order actuator with rate limiting, usable as a loop driver.
///
/// Dynamics: `dpos/dt = (cmd - pos) / tau`, clamped to `[-rate_limit, rate_limit]`,
/// with position clamped to `[pos_min, pos_max]`.
///
/// The explicit Euler step is capped so a step never moves past the command,
/// which keeps the model stable when `dt > tau`.
///
/// # Example
///
/// ```
/// use pl_controls::FirstOrderActuator;
/// use pl_core::{IoComponent, TimeStep};
///
/// let mut actuator = FirstOrderActuator::new(0.2, 5.0, 0.0, 1.0).unwrap();
/// actuator.set_time_step(TimeStep::from_seconds(0.01).unwrap());
///
/// // Step to 1.0 over time
/// for _ in 0..100 {
///     actuator.set_input(1.0);
/// }
///
/// // Position should approach 1.0
/// assert!(actuator.output() > 0.9);
/// ```
#[derive(Clone, Debug)]
pub struct FirstOrderActuator {
    params: ParameterSet,
    state: ActuatorState,
    dt: TimeStep,
    command: Real,
}

impl FirstOrderActuator {
    /// Create a new first-order actuator.
    ///
    /// # Arguments
    ///
    /// * `tau` - Time constant in seconds (must be positive)
    /// * `rate_limit` - Maximum rate of change in units/s (must be positive)
    /// * `pos_min` - Lower travel limit
    /// * `pos_max` - Upper travel limit
    ///
    /// # Errors
    ///
    /// Returns error if `tau` or `rate_limit` are not positive, or `pos_min >= pos_max`.
    pub fn new(tau: Real, rate_limit: Real, pos_min: Real, pos_max: Real) -> ControlResult<Self> {
        if tau <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "tau must be positive",
            });
        }
        if rate_limit <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "rate_limit must be positive",
            });
        }
        if pos_min >= pos_max {
            return Err(ControlError::InvalidArg {
                what: "pos_min must be less than pos_max",
            });
        }
        let params = ParameterSet::new(vec![
            Parameter::new("tau", "Time constant", 1.0e-3, 1.0e3, 0.01, tau, "s")?,
            Parameter::new("rate_limit", "Rate limit", 1.0e-3, 1.0e6, 0.1, rate_limit, "1/s")?,
            Parameter::new("pos_min", "Minimum position", -1.0e6, 1.0e6, 0.1, pos_min, "")?,
            Parameter::new("pos_max", "Maximum position", -1.0e6, 1.0e6, 0.1, pos_max, "")?,
        ])?;
        let start = 0.0_f64.clamp(pos_min, pos_max);
        Ok(Self {
            params,
            state: ActuatorState { position: start },
            dt: TimeStep::default(),
            command: 0.0,
        })
    }

    fn travel(&self) -> (Real, Real) {
        let a = self.params.value(POS_MIN);
        let b = self.params.value(POS_MAX);
        (a.min(b), a.max(b))
    }

    /// Compute position derivative given current position and command.
    ///
    /// Returns `dpdt` clamped to `[-rate_limit, rate_limit]`.
    pub fn dpdt(&self, position: Real, command: Real) -> Real {
        let rate = self.params.value(RATE_LIMIT);
        let raw = (command - position) / self.params.value(TAU);
        raw.clamp(-rate, rate)
    }

    /// Advance actuator state by `dt` seconds toward `command`.
    ///
    /// # Returns
    ///
    /// New actuator state with position clamped to the travel limits.
    pub fn step(&self, state: &ActuatorState, dt: Real, command: Real) -> ActuatorState {
        let dpdt = self.dpdt(state.position, command);
        let mut delta = dpdt * dt;
        let gap = command - state.position;
        if delta.abs() > gap.abs() {
            delta = gap;
        }
        let (lo, hi) = self.travel();
        ActuatorState {
            position: (state.position + delta).clamp(lo, hi),
        }
    }

    pub fn state(&self) -> &ActuatorState {
        &self.state
    }
}

impl IoComponent for FirstOrderActuator {
    fn kind(&self) -> &'static str {
        "first_order_actuator"
    }

    fn set_input(&mut self, command: Real) {
        self.command = command;
        self.state = self.step(&self.state, self.dt.seconds(), command);
    }

    fn input(&self) -> Real {
        self.command
    }

    fn output(&self) -> Real {
        self.state.position
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.params.snapshot()
    }

    fn set_parameters(&mut self, params: &[Parameter]) {
        self.params.apply(params);
        let (lo, hi) = self.travel();
        self.state.position = self.state.position.clamp(lo, hi);
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        self.dt = dt;
    }

    fn reset(&mut self) {
        let (lo, hi) = self.travel();
        self.state.position = 0.0_f64.clamp(lo, hi);
        self.command = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actuator(tau: Real, rate: Real, dt: Real) -> FirstOrderActuator {
        let mut act = FirstOrderActuator::new(tau, rate, -1.0e3, 1.0e3).unwrap();
        act.set_time_step(TimeStep::from_seconds(dt).unwrap());
        act
    }

    #[test]
    fn first_order_step_response() {
        let mut act = actuator(0.1, 10.0, 0.01);
        act.set_input(1.0);

        // After one step, should move toward 1.0
        assert!(act.output() > 0.0);
        assert!(act.output() <= 1.0);
        assert_eq!(act.input(), 1.0);
    }

    #[test]
    fn rate_limiting() {
        let act = actuator(1.0, 0.5, 0.1); // 1s tau, 0.5/s limit
        let dpdt = act.dpdt(0.0, 1.0);
        // raw would be 1.0, clamped to 0.5
        assert!((dpdt - 0.5).abs() < 1e-10);
    }

    #[test]
    fn large_step_does_not_overshoot() {
        let mut act = actuator(0.01, 1.0e3, 1.0);
        act.set_input(2.0);
        assert_eq!(act.output(), 2.0);
        act.set_input(-3.0);
        assert_eq!(act.output(), -3.0);
    }

    #[test]
    fn position_clamped() {
        let mut act = FirstOrderActuator::new(0.01, 100.0, 0.0, 1.0).unwrap();
        act.set_time_step(TimeStep::from_seconds(0.1).unwrap());

        act.set_input(2.0);
        assert_eq!(act.output(), 1.0);

        act.set_input(-1.0);
        assert_eq!(act.output(), 0.0);
    }

    #[test]
    fn narrowing_travel_clamps_position() {
        let mut act = actuator(0.01, 1.0e3, 1.0);
        act.set_input(50.0);
        let mut params = act.parameters();
        params[POS_MAX].value = 10.0;
        act.set_parameters(&params);
        assert_eq!(act.output(), 10.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(FirstOrderActuator::new(-0.1, 1.0, 0.0, 1.0).is_err());
        assert!(FirstOrderActuator::new(0.1, -1.0, 0.0, 1.0).is_err());
        assert!(FirstOrderActuator::new(0.0, 1.0, 0.0, 1.0).is_err());
        assert!(FirstOrderActuator::new(0.1, 1.0, 1.0, 0.0).is_err());
    }
}
