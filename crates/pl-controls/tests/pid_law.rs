//! Property tests for the PID update law.

use pl_controls::{PidController, PidGains};
use pl_core::{IoComponent, TimeStep, set_component_defaults};
use proptest::prelude::*;

fn pid(kp: f64, ki: f64, kd: f64) -> PidController {
    PidController::with_gains(PidGains { kp, ki, kd }).expect("gains in range")
}

proptest! {
    #[test]
    fn proportional_only_output_is_k_times_e(
        k in 0.0_f64..1000.0,
        e in -1.0e3_f64..1.0e3,
    ) {
        let mut c = pid(k, 0.0, 0.0);
        c.set_input(e);
        prop_assert_eq!(c.output(), k * e);
    }

    #[test]
    fn integral_only_sums_errors_with_unit_step(
        k in 0.0_f64..1000.0,
        e1 in -100.0_f64..100.0,
        e2 in -100.0_f64..100.0,
        e3 in -100.0_f64..100.0,
    ) {
        let mut c = pid(0.0, k, 0.0);
        c.set_time_step(TimeStep::from_seconds(1.0).unwrap());

        c.set_input(e1);
        prop_assert_eq!(c.output(), k * e1);
        c.set_input(e2);
        prop_assert_eq!(c.output(), k * (e1 + e2));
        c.set_input(e3);
        prop_assert_eq!(c.output(), k * (e1 + e2 + e3));
    }

    #[test]
    fn first_step_has_no_derivative_contribution(
        kd in 0.0_f64..1000.0,
        e in -1.0e3_f64..1.0e3,
        dt in 1.0e-4_f64..10.0,
    ) {
        prop_assume!(e != 0.0);
        let mut c = pid(0.0, 0.0, kd);
        c.set_time_step(TimeStep::from_seconds(dt).unwrap());
        c.set_input(e);
        prop_assert_eq!(c.output(), 0.0);
    }
}

#[test]
fn defaults_are_the_construction_gains() {
    let mut c = pid(3.0, 2.0, 1.0);
    let tuned: Vec<_> = c.parameters().iter().map(|p| p.with_value(7.0)).collect();
    c.set_parameters(&tuned);
    assert_eq!(c.gains(), PidGains { kp: 7.0, ki: 7.0, kd: 7.0 });

    set_component_defaults(&mut c);
    let params = c.parameters();
    let values: Vec<f64> = params.iter().map(|p| p.value).collect();
    let defaults: Vec<f64> = params.iter().map(|p| p.default).collect();
    assert_eq!(values, defaults);
    assert_eq!(c.gains(), PidGains { kp: 3.0, ki: 2.0, kd: 1.0 });
}
