//! Physical loads driven by the actuation signal.
//!
//! Both plants hold their input constant over a step and advance their state
//! with the configured [`IntegratorType`], sub-stepped to stay inside its
//! stability region. When the parameters make a plant too stiff for that at
//! the loop's `dt`, the step falls back to backward Euler, which is stable
//! for every step size and settles on the same equilibrium.

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorType;
use crate::model::Dynamics;

const FO_GAIN: usize = 0;
const FO_TAU: usize = 1;
const FO_INITIAL: usize = 2;

/// First-order lag `dx/dt = (K * u - x) / tau` with output `x`.
#[derive(Debug, Clone)]
pub struct FirstOrderPlant {
    params: ParameterSet,
    integrator: IntegratorType,
    dt: TimeStep,
    input: Real,
    x: Real,
}

#[derive(Debug, Clone, Copy)]
struct FirstOrderModel {
    gain: Real,
    tau: Real,
}

impl Dynamics for FirstOrderModel {
    type State = Real;

    fn derivative(&self, x: &Real, u: Real) -> Real {
        (self.gain * u - x) / self.tau
    }

    fn add(&self, a: &Real, b: &Real) -> Real {
        a + b
    }

    fn scale(&self, a: &Real, scale: Real) -> Real {
        a * scale
    }

    fn max_rate(&self) -> Real {
        1.0 / self.tau
    }
}

impl FirstOrderModel {
    /// Backward Euler: `x1 = x0 + h * (K * u - x1) / tau`.
    fn implicit_step(&self, x: Real, u: Real, h: Real) -> Real {
        let r = h / self.tau;
        (x + r * self.gain * u) / (1.0 + r)
    }
}

impl FirstOrderPlant {
    /// Create a plant with static gain `gain`, time constant `tau` (s) and
    /// state `initial` at construction and after every reset.
    pub fn new(gain: Real, tau: Real, initial: Real) -> SimResult<Self> {
        if tau <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "tau must be positive",
            });
        }
        let params = ParameterSet::new(vec![
            Parameter::new("gain", "Static gain", -1.0e3, 1.0e3, 0.01, gain, "")?,
            Parameter::new("tau", "Time constant", 1.0e-3, 1.0e4, 0.01, tau, "s")?,
            Parameter::new("initial", "Initial state", -1.0e6, 1.0e6, 0.1, initial, "")?,
        ])?;
        Ok(Self {
            params,
            integrator: IntegratorType::default(),
            dt: TimeStep::default(),
            input: 0.0,
            x: initial,
        })
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    fn model(&self) -> FirstOrderModel {
        FirstOrderModel {
            gain: self.params.value(FO_GAIN),
            tau: self.params.value(FO_TAU),
        }
    }
}

impl IoComponent for FirstOrderPlant {
    fn kind(&self) -> &'static str {
        "first_order_plant"
    }

    fn set_input(&mut self, u: Real) {
        self.input = u;
        let model = self.model();
        let dt = self.dt.seconds();
        self.x = match self.integrator.advance(&model, &self.x, u, dt) {
            Some(x) => x,
            None => {
                trace!(tau = model.tau, dt, "first-order plant too stiff, stepping implicitly");
                model.implicit_step(self.x, u, dt)
            }
        };
    }

    fn input(&self) -> Real {
        self.input
    }

    fn output(&self) -> Real {
        self.x
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.params.snapshot()
    }

    /// A new `initial` value takes effect on the next reset.
    fn set_parameters(&mut self, params: &[Parameter]) {
        self.params.apply(params);
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        self.dt = dt;
    }

    fn reset(&mut self) {
        self.input = 0.0;
        self.x = self.params.value(FO_INITIAL);
    }
}

const MASS: usize = 0;
const DAMPING: usize = 1;
const STIFFNESS: usize = 2;

/// Second-order mechanical load `m * x'' + c * x' + k * x = u`.
///
/// The input is a force, the output is the position `x`.
#[derive(Debug, Clone)]
pub struct MassSpringDamper {
    params: ParameterSet,
    integrator: IntegratorType,
    dt: TimeStep,
    input: Real,
    /// `[position, velocity]`
    x: [Real; 2],
}

#[derive(Debug, Clone, Copy)]
struct MassSpringModel {
    mass: Real,
    damping: Real,
    stiffness: Real,
}

impl Dynamics for MassSpringModel {
    type State = [Real; 2];

    fn derivative(&self, x: &[Real; 2], u: Real) -> [Real; 2] {
        let [pos, vel] = *x;
        let acc = (u - self.damping * vel - self.stiffness * pos) / self.mass;
        [vel, acc]
    }

    fn add(&self, a: &[Real; 2], b: &[Real; 2]) -> [Real; 2] {
        [a[0] + b[0], a[1] + b[1]]
    }

    fn scale(&self, a: &[Real; 2], scale: Real) -> [Real; 2] {
        [a[0] * scale, a[1] * scale]
    }

    /// `|lambda| <= c/m` when overdamped, `sqrt(k/m)` otherwise.
    fn max_rate(&self) -> Real {
        self.damping / self.mass + (self.stiffness / self.mass).sqrt()
    }
}

impl MassSpringModel {
    /// Backward Euler on `[x, v]`, solved in closed form. The denominator is
    /// at least 1 for non-negative damping and stiffness.
    fn implicit_step(&self, x: &[Real; 2], u: Real, h: Real) -> [Real; 2] {
        let [pos, vel] = *x;
        let m = self.mass;
        let denom = 1.0 + h * self.damping / m + h * h * self.stiffness / m;
        let vel1 = (vel + h * (u - self.stiffness * pos) / m) / denom;
        [pos + h * vel1, vel1]
    }
}

impl MassSpringDamper {
    pub fn new(mass: Real, damping: Real, stiffness: Real) -> SimResult<Self> {
        if mass <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "mass must be positive",
            });
        }
        let params = ParameterSet::new(vec![
            Parameter::new("mass", "Mass", 1.0e-3, 1.0e6, 0.1, mass, "kg")?,
            Parameter::new("damping", "Damping", 0.0, 1.0e6, 0.1, damping, "N*s/m")?,
            Parameter::new("stiffness", "Stiffness", 0.0, 1.0e6, 0.1, stiffness, "N/m")?,
        ])?;
        Ok(Self {
            params,
            integrator: IntegratorType::default(),
            dt: TimeStep::default(),
            input: 0.0,
            x: [0.0, 0.0],
        })
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn velocity(&self) -> Real {
        self.x[1]
    }

    fn model(&self) -> MassSpringModel {
        MassSpringModel {
            mass: self.params.value(MASS),
            damping: self.params.value(DAMPING),
            stiffness: self.params.value(STIFFNESS),
        }
    }
}

impl IoComponent for MassSpringDamper {
    fn kind(&self) -> &'static str {
        "mass_spring_damper"
    }

    fn set_input(&mut self, force: Real) {
        self.input = force;
        let model = self.model();
        let dt = self.dt.seconds();
        self.x = match self.integrator.advance(&model, &self.x, force, dt) {
            Some(x) => x,
            None => {
                trace!(
                    mass = model.mass,
                    damping = model.damping,
                    stiffness = model.stiffness,
                    dt,
                    "mass-spring-damper too stiff, stepping implicitly"
                );
                model.implicit_step(&self.x, force, dt)
            }
        };
    }

    fn input(&self) -> Real {
        self.input
    }

    fn output(&self) -> Real {
        self.x[0]
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
        self.input = 0.0;
        self.x = [0.0, 0.0];
    }
}
