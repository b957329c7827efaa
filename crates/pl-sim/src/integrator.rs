//! Fixed-step time integrators.

use pl_core::Real;
use serde::{Deserialize, Serialize};

use crate::model::Dynamics;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state `x` by one step of `dt` seconds with input `u` held constant.
    fn step<M: Dynamics>(&self, model: &M, x: &M::State, u: Real, dt: Real) -> M::State;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: Dynamics>(&self, model: &M, x: &M::State, u: Real, dt: Real) -> M::State {
        let k1 = model.derivative(x, u);

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.derivative(&x2, u);

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.derivative(&x3, u);

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.derivative(&x4, u);

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        model.add(x, &model.scale(&k_sum, dt / 6.0))
    }
}

/// Forward Euler (explicit, 1st order).
/// One derivative evaluation per step instead of 4 (RK4).
#[derive(Clone, Copy, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: Dynamics>(&self, model: &M, x: &M::State, u: Real, dt: Real) -> M::State {
        let xdot = model.derivative(x, u);
        model.add(x, &model.scale(&xdot, dt))
    }
}

/// Largest `h * max_rate` taken by one sub-step.
const MAX_STEP_RATE: Real = 0.5;

/// Sub-steps allowed per step before [`IntegratorType::advance`] gives up.
pub const MAX_SUBSTEPS: usize = 1000;

/// Number of equal sub-steps that keeps `dt / n * rate` within the stable
/// bound, or `None` when more than [`MAX_SUBSTEPS`] would be needed.
pub fn substeps(dt: Real, rate: Real) -> Option<usize> {
    let n = (dt * rate / MAX_STEP_RATE).ceil();
    if !n.is_finite() || n > MAX_SUBSTEPS as Real {
        None
    } else {
        Some((n as usize).max(1))
    }
}

/// Integrator selection for loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 derivative calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 derivative call per step).
    ForwardEuler,
}

impl IntegratorType {
    /// Dispatch one step to the selected integrator.
    pub fn step<M: Dynamics>(self, model: &M, x: &M::State, u: Real, dt: Real) -> M::State {
        match self {
            IntegratorType::RK4 => RK4.step(model, x, u, dt),
            IntegratorType::ForwardEuler => ForwardEuler.step(model, x, u, dt),
        }
    }

    /// Advance by `dt`, sub-stepping so the model's fastest mode stays stable.
    ///
    /// Returns `None` when the model is too stiff for an explicit scheme at
    /// this `dt`; the caller then needs an implicit update.
    pub fn advance<M: Dynamics>(
        self,
        model: &M,
        x: &M::State,
        u: Real,
        dt: Real,
    ) -> Option<M::State> {
        let n = substeps(dt, model.max_rate())?;
        let h = dt / n as Real;
        let mut state = x.clone();
        for _ in 0..n {
            state = self.step(model, &state, u, h);
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `x' = -x + u`
    struct Decay;

    impl Dynamics for Decay {
        type State = Real;

        fn derivative(&self, x: &Real, u: Real) -> Real {
            u - x
        }

        fn add(&self, a: &Real, b: &Real) -> Real {
            a + b
        }

        fn scale(&self, a: &Real, scale: Real) -> Real {
            a * scale
        }
    }

    fn integrate(kind: IntegratorType, dt: Real, steps: usize) -> Real {
        let mut x = 1.0;
        for _ in 0..steps {
            x = kind.step(&Decay, &x, 0.0, dt);
        }
        x
    }

    #[test]
    fn rk4_tracks_exponential_decay() {
        let x = integrate(IntegratorType::RK4, 0.1, 10);
        let exact = (-1.0_f64).exp();
        assert!((x - exact).abs() < 1e-6, "x = {x}, exact = {exact}");
    }

    #[test]
    fn euler_is_first_order() {
        let coarse = (integrate(IntegratorType::ForwardEuler, 0.1, 10) - (-1.0_f64).exp()).abs();
        let fine = (integrate(IntegratorType::ForwardEuler, 0.05, 20) - (-1.0_f64).exp()).abs();
        let ratio = coarse / fine;
        assert!(ratio > 1.8 && ratio < 2.2, "ratio = {ratio}");
    }

    #[test]
    fn euler_single_step_is_exact_formula() {
        let x = ForwardEuler.step(&Decay, &2.0, 1.0, 0.5);
        assert_eq!(x, 2.0 + 0.5 * (1.0 - 2.0));
    }

    /// `x' = -rate * x`
    struct Stiff(Real);

    impl Dynamics for Stiff {
        type State = Real;

        fn derivative(&self, x: &Real, _u: Real) -> Real {
            -self.0 * x
        }

        fn add(&self, a: &Real, b: &Real) -> Real {
            a + b
        }

        fn scale(&self, a: &Real, scale: Real) -> Real {
            a * scale
        }

        fn max_rate(&self) -> Real {
            self.0
        }
    }

    #[test]
    fn substep_count() {
        assert_eq!(substeps(0.01, 0.0), Some(1));
        assert_eq!(substeps(0.01, 2.0), Some(1));
        assert_eq!(substeps(0.01, 1000.0), Some(20));
        assert_eq!(substeps(1.0, 1.0e6), None);
        assert_eq!(substeps(1.0, Real::INFINITY), None);
    }

    #[test]
    fn advance_keeps_stiff_decay_stable() {
        // One plain RK4 step at h * rate = 10 amplifies by ~291.
        let single = RK4.step(&Stiff(1000.0), &1.0, 0.0, 0.01);
        assert!(single.abs() > 100.0);

        for kind in [IntegratorType::RK4, IntegratorType::ForwardEuler] {
            let x = kind.advance(&Stiff(1000.0), &1.0, 0.0, 0.01).unwrap();
            assert!(x.abs() < 1e-3, "{kind:?}: {x}");
        }
    }

    #[test]
    fn advance_declines_beyond_substep_budget() {
        assert!(IntegratorType::RK4.advance(&Stiff(1.0e9), &1.0, 0.0, 0.01).is_none());
    }

    #[test]
    fn held_input_is_the_fixed_point() {
        let x = RK4.step(&Decay, &3.0, 3.0, 0.1);
        assert_eq!(x, 3.0);
    }
}
