//! Output saturation layered around any component.
//!
//! Clamping lives outside the wrapped law so the law itself stays auditable:
//! the inner component keeps integrating whatever it integrates, only the
//! output seen by the next block is limited.

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};

use crate::error::{ControlError, ControlResult};

const OUT_MIN: usize = 0;
const OUT_MAX: usize = 1;

const LIMIT_BOUND: Real = 1.0e6;

/// Clamp the output of `C` to `[out_min, out_max]`.
///
/// The limits are exposed as two extra parameters, listed after the inner
/// component's own parameters.
#[derive(Debug, Clone)]
pub struct OutputClamp<C> {
    inner: C,
    limits: ParameterSet,
}

impl<C: IoComponent> OutputClamp<C> {
    /// Wrap `inner` with default limits `[out_min, out_max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `out_min >= out_max`, the limits exceed ±1e6, or the
    /// inner component already uses the names `out_min` / `out_max`.
    pub fn new(inner: C, out_min: Real, out_max: Real) -> ControlResult<Self> {
        if out_min >= out_max {
            return Err(ControlError::InvalidArg {
                what: "out_min must be less than out_max",
            });
        }
        let limits = ParameterSet::new(vec![
            Parameter::new(
                "out_min",
                "Output minimum",
                -LIMIT_BOUND,
                LIMIT_BOUND,
                0.1,
                out_min,
                "",
            )?,
            Parameter::new(
                "out_max",
                "Output maximum",
                -LIMIT_BOUND,
                LIMIT_BOUND,
                0.1,
                out_max,
                "",
            )?,
        ])?;
        if let Some(p) = inner
            .parameters()
            .into_iter()
            .find(|p| limits.get(&p.name).is_some())
        {
            return Err(ControlError::NameCollision { name: p.name });
        }
        Ok(Self { inner, limits })
    }

    /// Effective `(low, high)` limits. Tolerates `out_min > out_max` after
    /// external edits by ordering the pair.
    pub fn limits(&self) -> (Real, Real) {
        let a = self.limits.value(OUT_MIN);
        let b = self.limits.value(OUT_MAX);
        (a.min(b), a.max(b))
    }

    /// Wrapped component.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: IoComponent> IoComponent for OutputClamp<C> {
    fn kind(&self) -> &'static str {
        "output_clamp"
    }

    fn describe(&self) -> String {
        format!("clamped_{}", self.inner.describe())
    }

    fn set_input(&mut self, input: Real) {
        self.inner.set_input(input);
    }

    fn input(&self) -> Real {
        self.inner.input()
    }

    fn output(&self) -> Real {
        let (lo, hi) = self.limits();
        self.inner.output().clamp(lo, hi)
    }

    fn parameters(&self) -> Vec<Parameter> {
        let mut params = self.inner.parameters();
        params.extend(self.limits.snapshot());
        params
    }

    fn set_parameters(&mut self, params: &[Parameter]) {
        let (own, rest): (Vec<Parameter>, Vec<Parameter>) = params
            .iter()
            .cloned()
            .partition(|p| self.limits.get(&p.name).is_some());
        self.limits.apply(&own);
        if !rest.is_empty() {
            self.inner.set_parameters(&rest);
        }
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        self.inner.set_time_step(dt);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}
