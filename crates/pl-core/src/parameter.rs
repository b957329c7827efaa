//! Bounded, named tunables shared by every loop component.
//!
//! A [`Parameter`] is both the descriptor a component owns and the record that
//! crosses the configuration boundary (UI, scenario files, JSON dumps). Its
//! serialized shape is exactly `{name, title, minimum, maximum, step, default,
//! unit, value}`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, ensure_finite};

/// A configurable scalar of an [`IoComponent`](crate::IoComponent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Short name, unique within one component.
    pub name: String,
    /// Human readable name for display.
    pub title: String,
    /// Lower bound (inclusive).
    pub minimum: Real,
    /// Upper bound (inclusive).
    pub maximum: Real,
    /// Preferred increment for UI steppers.
    pub step: Real,
    /// Value restored by [`set_component_defaults`](crate::set_component_defaults).
    pub default: Real,
    /// Display unit label.
    pub unit: String,
    /// Current value.
    pub value: Real,
}

impl Parameter {
    /// Create a parameter descriptor with `value = default`.
    ///
    /// # Errors
    ///
    /// Returns an error if any number is non-finite, `minimum > maximum`,
    /// `step <= 0`, or `default` lies outside `[minimum, maximum]`.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        minimum: Real,
        maximum: Real,
        step: Real,
        default: Real,
        unit: impl Into<String>,
    ) -> CoreResult<Self> {
        let name = name.into();
        ensure_finite(minimum, "parameter minimum")?;
        ensure_finite(maximum, "parameter maximum")?;
        ensure_finite(step, "parameter step")?;
        ensure_finite(default, "parameter default")?;

        if name.is_empty() {
            return Err(CoreError::InvalidParameter {
                name,
                reason: "name must not be empty",
            });
        }
        if minimum > maximum {
            return Err(CoreError::InvalidParameter {
                name,
                reason: "minimum must not exceed maximum",
            });
        }
        if step <= 0.0 {
            return Err(CoreError::InvalidParameter {
                name,
                reason: "step must be positive",
            });
        }
        if !(minimum..=maximum).contains(&default) {
            return Err(CoreError::InvalidParameter {
                name,
                reason: "default must lie within [minimum, maximum]",
            });
        }

        Ok(Self {
            name,
            title: title.into(),
            minimum,
            maximum,
            step,
            default,
            unit: unit.into(),
            value: default,
        })
    }

    /// Clamp `v` into this parameter's bounds.
    pub fn clamp(&self, v: Real) -> Real {
        v.clamp(self.minimum, self.maximum)
    }

    /// Copy of this descriptor carrying `value` (unclamped; the owner clamps on set).
    pub fn with_value(&self, value: Real) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Check the bound invariants on the current value and default.
    pub fn is_valid(&self) -> bool {
        self.minimum <= self.maximum
            && (self.minimum..=self.maximum).contains(&self.value)
            && (self.minimum..=self.maximum).contains(&self.default)
    }
}

/// Ordered parameter collection owned by one component.
///
/// Components address their own entries by position (the order they were
/// declared in) and expose name-matched, clamped updates to the outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// Build a set from descriptors, rejecting duplicate names.
    pub fn new(params: Vec<Parameter>) -> CoreResult<Self> {
        for (i, p) in params.iter().enumerate() {
            if params[..i].iter().any(|q| q.name == p.name) {
                return Err(CoreError::DuplicateParameter {
                    name: p.name.clone(),
                });
            }
        }
        Ok(Self { params })
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Current value of the parameter declared at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; indices are fixed by the owning component.
    pub fn value(&self, index: usize) -> Real {
        self.params[index].value
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Value copies of every descriptor, in declaration order.
    pub fn snapshot(&self) -> Vec<Parameter> {
        self.params.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Apply incoming values by name.
    ///
    /// Matching entries are clamped to the owner's bounds. Unknown names and
    /// non-finite values are skipped with a warning. Only `value` is read from
    /// the incoming records. Returns the number of entries applied.
    pub fn apply(&mut self, incoming: &[Parameter]) -> usize {
        let mut applied = 0;
        for update in incoming {
            let Some(target) = self.params.iter_mut().find(|p| p.name == update.name) else {
                warn!(name = %update.name, "ignoring unknown parameter");
                continue;
            };
            if !update.value.is_finite() {
                warn!(name = %update.name, value = update.value, "ignoring non-finite parameter value");
                continue;
            }
            let clamped = target.clamp(update.value);
            if clamped != update.value {
                debug!(
                    name = %update.name,
                    requested = update.value,
                    applied = clamped,
                    "parameter value clamped"
                );
            }
            target.value = clamped;
            applied += 1;
        }
        applied
    }
}
