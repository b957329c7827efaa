// pl-core/src/time.rs

use core::fmt;

use uom::si::f64::Time;
use uom::si::time::second;

use crate::{CoreError, CoreResult, Real};

/// Fixed duration of one simulation step.
///
/// A `TimeStep` can only be built from a finite, strictly positive duration,
/// so every holder can divide by it without checking.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(Time);

impl TimeStep {
    /// Create a time step from a uom duration.
    pub fn new(dt: Time) -> CoreResult<Self> {
        let secs = dt.get::<second>();
        if !secs.is_finite() {
            return Err(CoreError::NonFinite {
                what: "time step",
                value: secs,
            });
        }
        if secs <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "time step must be positive",
            });
        }
        Ok(Self(dt))
    }

    /// Create a time step from a duration in seconds.
    pub fn from_seconds(secs: Real) -> CoreResult<Self> {
        Self::new(s(secs))
    }

    /// Duration in seconds.
    #[inline]
    pub fn seconds(self) -> Real {
        self.0.get::<second>()
    }

    /// Duration as a uom quantity.
    #[inline]
    pub fn as_time(self) -> Time {
        self.0
    }
}

impl Default for TimeStep {
    /// One second.
    fn default() -> Self {
        Self(s(1.0))
    }
}

impl fmt::Debug for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeStep({} s)", self.seconds())
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.seconds())
    }
}

#[inline]
pub fn s(v: f64) -> Time {
    Time::new::<second>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_trip() {
        let dt = TimeStep::from_seconds(0.25).unwrap();
        assert_eq!(dt.seconds(), 0.25);
        assert_eq!(dt.as_time(), s(0.25));
    }

    #[test]
    fn default_is_one_second() {
        assert_eq!(TimeStep::default().seconds(), 1.0);
    }

    #[test]
    fn rejects_non_positive() {
        assert!(TimeStep::from_seconds(0.0).is_err());
        assert!(TimeStep::from_seconds(-1.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        let err = TimeStep::from_seconds(f64::INFINITY).unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { .. }));
        assert!(TimeStep::from_seconds(f64::NAN).is_err());
    }
}
