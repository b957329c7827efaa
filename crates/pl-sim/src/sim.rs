//! Run a system for a fixed number of steps and record its signals.

use pl_core::Real;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::system::{StepSignals, System};

/// Options for simulation runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Number of steps to take.
    pub steps: u64,
    /// Record every N-th step (decimation).
    pub record_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 1000,
            record_every: 1,
        }
    }
}

/// Recorded signals of one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Name of the system that produced the samples.
    pub system: String,
    /// Snapshot before the run, decimated steps, final step.
    pub samples: Vec<StepSignals>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&StepSignals> {
        self.samples.last()
    }

    pub fn final_measurement(&self) -> Option<Real> {
        self.last().map(|s| s.measurement)
    }

    /// Largest `|error|` over the recorded samples (0 when empty).
    pub fn max_abs_error(&self) -> Real {
        self.samples
            .iter()
            .map(|s| s.error.abs())
            .fold(0.0, Real::max)
    }
}

/// Pre-allocation hint for a run's samples, capped so huge step counts grow
/// the buffer on demand instead of reserving it up front.
const MAX_RESERVED_SAMPLES: usize = 1 << 16;

fn sample_capacity(opts: &RunOptions) -> usize {
    usize::try_from(opts.steps / opts.record_every)
        .unwrap_or(usize::MAX)
        .saturating_add(2)
        .min(MAX_RESERVED_SAMPLES)
}

/// Step `system` `opts.steps` times from its current state.
pub fn run(system: &mut System, opts: &RunOptions) -> SimResult<Trajectory> {
    if opts.steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    debug!(
        system = system.name(),
        steps = opts.steps,
        record_every = opts.record_every,
        "run started"
    );

    let mut samples = Vec::with_capacity(sample_capacity(opts));
    samples.push(system.last_signals());

    let mut last = system.last_signals();
    for step in 1..=opts.steps {
        last = system.step();
        if step % opts.record_every == 0 {
            samples.push(last);
        }
    }

    // Always record final state
    if opts.steps % opts.record_every != 0 {
        samples.push(last);
    }

    debug!(
        system = system.name(),
        samples = samples.len(),
        time = system.time(),
        "run finished"
    );

    Ok(Trajectory {
        system: system.name().to_string(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::UnityLoop;
    use crate::generator::SystemGenerator;

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.steps, 1000);
        assert_eq!(opts.record_every, 1);
    }

    #[test]
    fn capacity_hint_saturates() {
        let huge = RunOptions {
            steps: u64::MAX,
            record_every: 1,
        };
        assert_eq!(sample_capacity(&huge), MAX_RESERVED_SAMPLES);
        let small = RunOptions {
            steps: 10,
            record_every: 3,
        };
        assert_eq!(sample_capacity(&small), 5);
    }

    #[test]
    fn run_options_invalid() {
        let mut sys = UnityLoop.generate_system().unwrap();
        let zero_steps = RunOptions {
            steps: 0,
            record_every: 1,
        };
        assert!(run(&mut sys, &zero_steps).is_err());
        let zero_every = RunOptions {
            steps: 5,
            record_every: 0,
        };
        assert!(run(&mut sys, &zero_every).is_err());
        assert_eq!(sys.steps(), 0);
    }

    #[test]
    fn decimation_keeps_initial_and_final() {
        let mut sys = UnityLoop.generate_system().unwrap();
        let traj = run(
            &mut sys,
            &RunOptions {
                steps: 10,
                record_every: 4,
            },
        )
        .unwrap();
        let times: Vec<Real> = traj.samples.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 4.0, 8.0, 10.0]);
    }

    #[test]
    fn exact_multiple_has_no_duplicate_final() {
        let mut sys = UnityLoop.generate_system().unwrap();
        let traj = run(
            &mut sys,
            &RunOptions {
                steps: 6,
                record_every: 3,
            },
        )
        .unwrap();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.last().map(|s| s.time), Some(6.0));
    }

    #[test]
    fn summary_helpers() {
        let mut sys = UnityLoop.generate_system().unwrap();
        let traj = run(
            &mut sys,
            &RunOptions {
                steps: 2,
                record_every: 1,
            },
        )
        .unwrap();
        assert_eq!(traj.system, "unity");
        assert_eq!(traj.max_abs_error(), 10.0);
        assert_eq!(traj.final_measurement(), Some(10.0));
        assert_eq!(Trajectory::default().final_measurement(), None);
    }
}
