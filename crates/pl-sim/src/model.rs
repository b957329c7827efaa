//! Dynamics trait for the physical state of loads.

use pl_core::Real;

/// Continuous-time model `x_dot = f(x, u)` with the input held constant over a step.
///
/// A model must implement:
/// - State type (Clone, for intermediate integrator stages)
/// - Derivative computation
/// - Scalar field arithmetic for integration: add states, scale by scalar
pub trait Dynamics {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative `dxdt = f(x, u)`.
    fn derivative(&self, x: &Self::State, u: Real) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: Real) -> Self::State;

    /// Upper bound on the magnitude of the fastest eigenvalue (1/s).
    ///
    /// Integrators split a step so `h * max_rate` stays inside their
    /// stability region. Zero means no constraint.
    fn max_rate(&self) -> Real {
        0.0
    }
}
