//! Scenario validation logic.

use std::collections::HashSet;

use crate::schema::Scenario;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.generator.trim().is_empty() {
        return Err(invalid("generator", "", "must name a registered generator"));
    }
    if scenario.steps == 0 {
        return Err(invalid("steps", 0, "must be positive"));
    }
    if scenario.record_every == 0 {
        return Err(invalid("record_every", 0, "must be positive"));
    }
    if let Some(sp) = scenario.setpoint.filter(|v| !v.is_finite()) {
        return Err(invalid("setpoint", sp, "must be finite"));
    }

    for (role, overrides) in &scenario.parameters {
        let mut names = HashSet::new();
        for o in overrides {
            if !names.insert(o.name.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: o.name.clone(),
                    context: format!("{role} parameters"),
                });
            }
            if !o.value.is_finite() {
                return Err(invalid(
                    format!("parameters.{role}.{}", o.name),
                    o.value,
                    "must be finite",
                ));
            }
        }
    }

    Ok(())
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParameterOverride;
    use pl_core::Role;

    fn base() -> Scenario {
        Scenario::new("t", "unity", 10)
    }

    #[test]
    fn minimal_scenario_is_valid() {
        assert_eq!(validate_scenario(&base()), Ok(()));
    }

    #[test]
    fn future_version_rejected() {
        let mut s = base();
        s.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn zero_counts_rejected() {
        let mut s = base();
        s.steps = 0;
        assert!(validate_scenario(&s).is_err());

        let mut s = base();
        s.record_every = 0;
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn blank_generator_rejected() {
        let mut s = base();
        s.generator = "  ".to_string();
        assert!(validate_scenario(&s).is_err());
    }

    #[test]
    fn non_finite_values_rejected() {
        let mut s = base();
        s.setpoint = Some(f64::INFINITY);
        assert!(validate_scenario(&s).is_err());

        let mut s = base();
        s.parameters
            .insert(Role::Load, vec![ParameterOverride::new("gain", f64::NAN)]);
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("parameters.load.gain"));
    }

    #[test]
    fn duplicate_override_names_rejected_per_role() {
        let mut s = base();
        s.parameters.insert(
            Role::Controller,
            vec![
                ParameterOverride::new("kp", 1.0),
                ParameterOverride::new("kp", 2.0),
            ],
        );
        assert_eq!(
            validate_scenario(&s),
            Err(ValidationError::DuplicateId {
                id: "kp".to_string(),
                context: "controller parameters".to_string(),
            })
        );

        // Same name under different roles is fine.
        let mut s = base();
        s.parameters
            .insert(Role::Controller, vec![ParameterOverride::new("gain", 1.0)]);
        s.parameters
            .insert(Role::Sensor, vec![ParameterOverride::new("gain", 1.0)]);
        assert_eq!(validate_scenario(&s), Ok(()));
    }
}
