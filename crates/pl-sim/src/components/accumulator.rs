//! Integrating load: `x <- x + gain * u * dt`.
//!
//! The simplest load with memory. With `gain = 1` and `dt = 1` its response to
//! a single input from rest equals that input, and it holds its state when
//! the input drops to zero.

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};

use crate::error::SimResult;

const GAIN: usize = 0;
const INITIAL: usize = 1;

#[derive(Debug, Clone)]
pub struct Accumulator {
    params: ParameterSet,
    dt: TimeStep,
    input: Real,
    x: Real,
}

impl Accumulator {
    pub fn new(gain: Real, initial: Real) -> SimResult<Self> {
        let params = ParameterSet::new(vec![
            Parameter::new("gain", "Integration gain", -1.0e3, 1.0e3, 0.01, gain, "1/s")?,
            Parameter::new("initial", "Initial state", -1.0e6, 1.0e6, 0.1, initial, "")?,
        ])?;
        Ok(Self {
            params,
            dt: TimeStep::default(),
            input: 0.0,
            x: initial,
        })
    }

    /// Unit-gain accumulator starting at rest.
    pub fn unit() -> SimResult<Self> {
        Self::new(1.0, 0.0)
    }
}

impl IoComponent for Accumulator {
    fn kind(&self) -> &'static str {
        "accumulator"
    }

    fn set_input(&mut self, u: Real) {
        self.input = u;
        self.x += self.params.value(GAIN) * u * self.dt.seconds();
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

    fn set_parameters(&mut self, params: &[Parameter]) {
        self.params.apply(params);
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        self.dt = dt;
    }

    fn reset(&mut self) {
        self.input = 0.0;
        self.x = self.params.value(INITIAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_step_from_rest_equals_input() {
        let mut a = Accumulator::unit().unwrap();
        a.set_input(10.0);
        assert_eq!(a.output(), 10.0);
        a.set_input(0.0);
        assert_eq!(a.output(), 10.0);
    }

    #[test]
    fn scales_with_time_step() {
        let mut a = Accumulator::new(2.0, 1.0).unwrap();
        a.set_time_step(TimeStep::from_seconds(0.5).unwrap());
        a.set_input(3.0);
        assert_eq!(a.output(), 4.0);
        a.reset();
        assert_eq!(a.output(), 1.0);
    }
}
