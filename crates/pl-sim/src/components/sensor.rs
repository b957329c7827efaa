//! Measurement path models.

use pl_core::{IoComponent, Parameter, ParameterSet, Real, TimeStep};

use crate::error::SimResult;

const TAU: usize = 0;
const GAIN: usize = 1;

/// First-order measurement filter `tau * y' + y = gain * x`.
///
/// Discretized with the backward-Euler blend
/// `y <- a * y + (1 - a) * gain * x`, `a = tau / (tau + dt)`, which is stable
/// for every `dt` and makes `tau = 0` a pure (scaled) pass-through.
#[derive(Debug, Clone)]
pub struct LowPassSensor {
    params: ParameterSet,
    dt: TimeStep,
    input: Real,
    filtered: Real,
}

impl LowPassSensor {
    pub fn new(tau: Real, gain: Real) -> SimResult<Self> {
        let params = ParameterSet::new(vec![
            Parameter::new("tau", "Filter time constant", 0.0, 1.0e3, 0.001, tau, "s")?,
            Parameter::new("gain", "Sensor gain", -1.0e3, 1.0e3, 0.01, gain, "")?,
        ])?;
        Ok(Self {
            params,
            dt: TimeStep::default(),
            input: 0.0,
            filtered: 0.0,
        })
    }

    fn blend(&self) -> Real {
        let tau = self.params.value(TAU);
        tau / (tau + self.dt.seconds())
    }
}

impl IoComponent for LowPassSensor {
    fn kind(&self) -> &'static str {
        "low_pass_sensor"
    }

    fn set_input(&mut self, x: Real) {
        self.input = x;
        let a = self.blend();
        self.filtered = a * self.filtered + (1.0 - a) * self.params.value(GAIN) * x;
    }

    fn input(&self) -> Real {
        self.input
    }

    fn output(&self) -> Real {
        self.filtered
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
        self.filtered = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tau_passes_through() {
        let mut s = LowPassSensor::new(0.0, 1.0).unwrap();
        s.set_input(4.2);
        assert_eq!(s.output(), 4.2);
    }

    #[test]
    fn gain_scales_measurement() {
        let mut s = LowPassSensor::new(0.0, 0.5).unwrap();
        s.set_input(4.0);
        assert_eq!(s.output(), 2.0);
    }

    #[test]
    fn filter_lags_then_converges() {
        let mut s = LowPassSensor::new(0.1, 1.0).unwrap();
        s.set_time_step(TimeStep::from_seconds(0.01).unwrap());
        s.set_input(1.0);
        assert!(s.output() > 0.0 && s.output() < 0.2);
        for _ in 0..1000 {
            s.set_input(1.0);
        }
        assert!((s.output() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_filter() {
        let mut s = LowPassSensor::new(1.0, 1.0).unwrap();
        s.set_input(5.0);
        s.reset();
        assert_eq!(s.output(), 0.0);
        assert_eq!(s.input(), 0.0);
    }
}
