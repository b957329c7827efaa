//! Static affine block: `output = gain * input + bias`.

use pl_core::{IoComponent, Parameter, ParameterSet, Real};

use crate::error::SimResult;

const GAIN: usize = 0;
const BIAS: usize = 1;

/// Memoryless gain with offset. Fits any role.
#[derive(Debug, Clone)]
pub struct Gain {
    params: ParameterSet,
    input: Real,
}

impl Gain {
    pub fn new(gain: Real, bias: Real) -> SimResult<Self> {
        let params = ParameterSet::new(vec![
            Parameter::new("gain", "Gain", -1.0e3, 1.0e3, 0.01, gain, "")?,
            Parameter::new("bias", "Bias", -1.0e6, 1.0e6, 0.1, bias, "")?,
        ])?;
        Ok(Self { params, input: 0.0 })
    }

    /// Pass-through block (`gain = 1`, `bias = 0`).
    pub fn identity() -> SimResult<Self> {
        Self::new(1.0, 0.0)
    }
}

impl IoComponent for Gain {
    fn kind(&self) -> &'static str {
        "gain"
    }

    fn set_input(&mut self, input: Real) {
        self.input = input;
    }

    fn input(&self) -> Real {
        self.input
    }

    fn output(&self) -> Real {
        self.params.value(GAIN) * self.input + self.params.value(BIAS)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.params.snapshot()
    }

    fn set_parameters(&mut self, params: &[Parameter]) {
        self.params.apply(params);
    }

    fn reset(&mut self) {
        self.input = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let mut g = Gain::identity().unwrap();
        g.set_input(-4.5);
        assert_eq!(g.output(), -4.5);
        assert_eq!(g.input(), -4.5);
    }

    #[test]
    fn affine_output() {
        let mut g = Gain::new(2.0, 0.5).unwrap();
        g.set_input(3.0);
        assert_eq!(g.output(), 6.5);
    }

    #[test]
    fn retuning_changes_output_without_new_input() {
        let mut g = Gain::identity().unwrap();
        g.set_input(2.0);
        g.set_parameters(&[g.parameters()[GAIN].with_value(3.0)]);
        assert_eq!(g.output(), 6.0);
    }

    #[test]
    fn rejects_out_of_range_default() {
        assert!(Gain::new(5.0e3, 0.0).is_err());
    }
}
