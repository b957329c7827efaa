//! Scenario file schema.
//!
//! A scenario names a built-in generator, optionally retargets and retunes
//! the generated loop, and says how long to run it:
//!
//! ```yaml
//! version: 1
//! name: demo
//! generator: first-order
//! setpoint: 1.0
//! steps: 500
//! record_every: 1
//! parameters:
//!   controller:
//!     - { name: kp, value: 2.0 }
//! ```

use std::collections::BTreeMap;

use pl_core::{Parameter, Role};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    /// Registry name of the generator that builds the loop.
    pub generator: String,
    /// Overrides the generator's setpoint when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<f64>,
    pub steps: u64,
    #[serde(default = "default_record_every")]
    pub record_every: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<Role, Vec<ParameterOverride>>,
}

fn default_record_every() -> u64 {
    1
}

impl Scenario {
    /// Minimal scenario: run `generator` for `steps` steps with its defaults.
    pub fn new(name: impl Into<String>, generator: impl Into<String>, steps: u64) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            generator: generator.into(),
            setpoint: None,
            steps,
            record_every: default_record_every(),
            parameters: BTreeMap::new(),
        }
    }

    /// Overrides for `role`, empty when none are given.
    pub fn overrides(&self, role: Role) -> &[ParameterOverride] {
        self.parameters.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// New value for one named parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverride {
    pub name: String,
    pub value: f64,
}

impl ParameterOverride {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Match against a component's descriptors, yielding the descriptor with
    /// the new value. `None` when the component has no such parameter.
    pub fn resolve(&self, descriptors: &[Parameter]) -> Option<Parameter> {
        descriptors
            .iter()
            .find(|p| p.name == self.name)
            .map(|p| p.with_value(self.value))
    }
}
