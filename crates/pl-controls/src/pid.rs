//! Discrete PID regulator.
//!
//! The controller's input is the control error `e = setpoint - measured`.
//! Every `set_input(e)` performs one update with the step `dt` supplied by
//! the owning system:
//!
//! ```text
//! integral   <- integral + e * dt
//! derivative <- (e - previous_error) / dt      (0 on the first update)
//! output     <- kp * e + ki * integral + kd * derivative
//! ```
//!
//! The law carries no anti-windup. Output saturation, when wanted, is layered
//! outside with [`OutputClamp`](crate::OutputClamp).

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

const KP: usize = 0;
const KI: usize = 1;
const KD: usize = 2;

const GAIN_MAX: Real = 1000.0;

/// PID gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain (1/s).
    pub ki: Real,
    /// Derivative gain (s).
    pub kd: Real,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

impl PidGains {
    /// Compute one controller update.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state before the update
    /// * `error` - Control error for this step
    /// * `dt` - Step duration in seconds (positive)
    ///
    /// # Returns
    ///
    /// Updated state and output value.
    pub fn update(&self, state: &PidState, error: Real, dt: Real) -> (PidState, Real) {
        let integral = state.integral + error * dt;

        // No previous error on the first update: no derivative kick.
        let derivative = match state.previous_error {
            Some(prev) => (error - prev) / dt,
            None => 0.0,
        };

        let output = self.kp * error + self.ki * integral + self.kd * derivative;

        let new_state = PidState {
            integral,
            previous_error: Some(error),
        };
        (new_state, output)
    }
}

/// PID controller state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator (error * seconds).
    pub integral: Real,
    /// Error seen by the previous update, `None` before the first one.
    pub previous_error: Option<Real>,
}

/// PID controller as a loop component.
#[derive(Debug, Clone)]
pub struct PidController {
    params: ParameterSet,
    state: PidState,
    dt: TimeStep,
    input: Real,
    output: Real,
}

impl PidController {
    /// Create a controller with default gains (`kp = 1`, `ki = kd = 0`).
    pub fn new() -> ControlResult<Self> {
        Self::with_gains(PidGains::default())
    }

    /// Create a controller whose parameter defaults are `gains`.
    ///
    /// # Errors
    ///
    /// Returns an error if a gain is negative, non-finite or above the
    /// parameter bound.
    pub fn with_gains(gains: PidGains) -> ControlResult<Self> {
        for g in [gains.kp, gains.ki, gains.kd] {
            if !(0.0..=GAIN_MAX).contains(&g) {
                return Err(ControlError::InvalidArg {
                    what: "PID gains must lie within [0, 1000]",
                });
            }
        }
        let params = ParameterSet::new(vec![
            Parameter::new("kp", "Proportional gain", 0.0, GAIN_MAX, 0.01, gains.kp, "")?,
            Parameter::new("ki", "Integral gain", 0.0, GAIN_MAX, 0.01, gains.ki, "1/s")?,
            Parameter::new("kd", "Derivative gain", 0.0, GAIN_MAX, 0.01, gains.kd, "s")?,
        ])?;
        Ok(Self {
            params,
            state: PidState::default(),
            dt: TimeStep::default(),
            input: 0.0,
            output: 0.0,
        })
    }

    /// Current gains (parameter values).
    pub fn gains(&self) -> PidGains {
        PidGains {
            kp: self.params.value(KP),
            ki: self.params.value(KI),
            kd: self.params.value(KD),
        }
    }

    /// Internal state after the latest update.
    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Step duration used by the law.
    pub fn time_step(&self) -> TimeStep {
        self.dt
    }
}

impl IoComponent for PidController {
    fn kind(&self) -> &'static str {
        "pid"
    }

    fn set_input(&mut self, error: Real) {
        self.input = error;
        let (state, output) = self.gains().update(&self.state, error, self.dt.seconds());
        self.state = state;
        self.output = output;
    }

    fn input(&self) -> Real {
        self.input
    }

    fn output(&self) -> Real {
        self.output
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.params.snapshot()
    }

    fn set_parameters(&mut self, params: &[Parameter]) {
        self.params.apply(params);
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        self.dt = dt;
    }

    fn reset(&mut self) {
        self.state = PidState::default();
        self.input = 0.0;
        self.output = 0.0;
    }
}
