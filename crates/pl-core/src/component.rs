//! The IoComponent capability shared by every element of a control loop.
//!
//! Controllers, actuators (drivers), processes (loads) and transducers
//! (sensors) all implement the same trait. Which slot a component occupies is
//! recorded by a [`Role`] label on the owning system, not by a separate trait.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::Real;
use crate::parameter::Parameter;
use crate::time::TimeStep;

/// Position of a component inside the closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turns the control error into a correction command.
    Controller,
    /// Actuator: command in, physical drive signal out.
    Driver,
    /// Controlled process: drive signal in, physical state out.
    Load,
    /// Transducer: physical state in, measured value out.
    Sensor,
}

impl Role {
    /// All roles in signal-routing order.
    pub const ALL: [Role; 4] = [Role::Controller, Role::Driver, Role::Load, Role::Sensor];

    /// Lowercase identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Controller => "controller",
            Role::Driver => "driver",
            Role::Load => "load",
            Role::Sensor => "sensor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit with a settable input, a readable output and configurable parameters.
///
/// `set_input` is the only trigger for recomputation: after it returns,
/// `output` must reflect the new input and one internal update. Components
/// never advance simulated time on their own; the owning system hands them
/// its fixed step once through [`IoComponent::set_time_step`].
pub trait IoComponent {
    /// Short model name for logs and UIs (e.g. `"pid"`, `"gain"`).
    fn kind(&self) -> &'static str;

    /// Store a new input and update the output.
    fn set_input(&mut self, input: Real);

    /// Last input passed to [`IoComponent::set_input`].
    fn input(&self) -> Real;

    /// Current output.
    fn output(&self) -> Real;

    /// Snapshot (value copies) of the configurable parameters, in a stable order.
    fn parameters(&self) -> Vec<Parameter>;

    /// Apply parameter values matched by name.
    ///
    /// Values are clamped to each parameter's bounds. Unknown names are
    /// ignored. Partial updates are allowed.
    fn set_parameters(&mut self, params: &[Parameter]);

    /// Receive the owning system's fixed step duration.
    fn set_time_step(&mut self, _dt: TimeStep) {}

    /// Clear internal dynamic state (integrators, filters, physical state).
    /// Parameters are left untouched.
    fn reset(&mut self) {}

    /// Display label. Wrappers extend the label of what they wrap, so a
    /// layered component stays recognisable (e.g. `"clamped_pid"`).
    fn describe(&self) -> String {
        self.kind().to_string()
    }
}

impl<C: IoComponent + ?Sized> IoComponent for Box<C> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn set_input(&mut self, input: Real) {
        (**self).set_input(input)
    }

    fn input(&self) -> Real {
        (**self).input()
    }

    fn output(&self) -> Real {
        (**self).output()
    }

    fn parameters(&self) -> Vec<Parameter> {
        (**self).parameters()
    }

    fn set_parameters(&mut self, params: &[Parameter]) {
        (**self).set_parameters(params)
    }

    fn set_time_step(&mut self, dt: TimeStep) {
        (**self).set_time_step(dt)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Reset every parameter of `component` to its default value.
///
/// Bounds, step, default and unit are left as they are. Applying this twice
/// yields the same values as applying it once.
pub fn set_component_defaults<C: IoComponent + ?Sized>(component: &mut C) {
    let mut params = component.parameters();
    for p in &mut params {
        p.value = p.default;
    }
    component.set_parameters(&params);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterSet;

    struct Doubler {
        input: Real,
        params: ParameterSet,
    }

    impl Doubler {
        fn new() -> Self {
            let scale = Parameter::new("scale", "Scale", 0.0, 4.0, 0.5, 2.0, "").unwrap();
            Self {
                input: 0.0,
                params: ParameterSet::new(vec![scale]).unwrap(),
            }
        }
    }

    impl IoComponent for Doubler {
        fn kind(&self) -> &'static str {
            "doubler"
        }

        fn set_input(&mut self, input: Real) {
            self.input = input;
        }

        fn input(&self) -> Real {
            self.input
        }

        fn output(&self) -> Real {
            self.params.value(0) * self.input
        }

        fn parameters(&self) -> Vec<Parameter> {
            self.params.snapshot()
        }

        fn set_parameters(&mut self, params: &[Parameter]) {
            self.params.apply(params);
        }
    }

    #[test]
    fn describe_defaults_to_kind_through_box() {
        let boxed: Box<dyn IoComponent> = Box::new(Doubler::new());
        assert_eq!(boxed.describe(), "doubler");
    }

    #[test]
    fn role_order_and_names() {
        let names: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["controller", "driver", "load", "sensor"]);
        assert_eq!(Role::Load.to_string(), "load");
    }

    #[test]
    fn defaults_restore_values_only() {
        let mut c = Doubler::new();
        let mut params = c.parameters();
        params[0].value = 3.5;
        c.set_parameters(&params);
        assert_eq!(c.parameters()[0].value, 3.5);

        set_component_defaults(&mut c);

        let after = c.parameters();
        assert_eq!(after[0].value, 2.0);
        assert_eq!(after[0].minimum, 0.0);
        assert_eq!(after[0].maximum, 4.0);
        assert_eq!(after[0].step, 0.5);
    }

    #[test]
    fn boxed_component_delegates() {
        let mut boxed: Box<dyn IoComponent> = Box::new(Doubler::new());
        boxed.set_input(1.5);
        assert_eq!(boxed.input(), 1.5);
        assert_eq!(boxed.output(), 3.0);
        set_component_defaults(&mut boxed);
        assert_eq!(boxed.kind(), "doubler");
    }
}
