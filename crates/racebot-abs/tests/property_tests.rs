//! Property-Based Tests for ABS Controllers
//!
//! Verifies the controller contracts across a wide range of speeds, wheel
//! spins and brake requests.

use racebot_abs::prelude::*;
use racebot_test_helpers::fixtures::wheel_spin_for;

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_spin() -> impl Strategy<Value = [f32; 4]> {
        prop::array::uniform4(-50.0f32..150.0f32)
    }

    proptest! {
        #[test]
        fn threshold_zero_request_gives_zero(
            speed in -10.0f32..90.0,
            spin in any_spin(),
        ) {
            let out = threshold_abs(&AbsInput::new(speed, spin, 0.0), &ThresholdState::default());
            prop_assert!(out.brake.abs() < f32::EPSILON);
        }

        #[test]
        fn every_controller_stays_in_unit_interval(
            speed in -10.0f32..90.0,
            spin in any_spin(),
            request in 0.0f32..1.0,
        ) {
            let input = AbsInput::new(speed, spin, request);
            let mut controllers = [
                AbsController::Disabled,
                AbsController::Threshold(ThresholdState::default()),
                AbsController::Pid(PidState::default()),
                AbsController::Npid(NpidState::default()),
            ];
            for abs in &mut controllers {
                for _ in 0..3 {
                    let out = abs.apply(&input);
                    prop_assert!(out.brake.is_finite());
                    prop_assert!((0.0..=1.0).contains(&out.brake));
                }
            }
        }

        #[test]
        fn pid_reset_leaves_one_dt_step(
            first_slip in 0.0f32..1.0,
            second_slip in 0.0f32..1.0,
            speed in 5.0f32..80.0,
        ) {
            let mut state = PidState::default();
            let dt = state.gains.dt;
            pid_abs(&AbsInput::new(speed, wheel_spin_for(speed, first_slip, WHEEL_RADIUS), 0.3), &mut state);
            pid_abs(&AbsInput::new(speed, [0.0; 4], 0.0), &mut state);

            let out = pid_abs(
                &AbsInput::new(speed, wheel_spin_for(speed, second_slip, WHEEL_RADIUS), 0.3),
                &mut state,
            );
            let error = match out.slip_error {
                Some(e) => e,
                None => return Err(TestCaseError::fail("slip was not measured")),
            };
            prop_assert!((state.memory.last_integral - error * dt).abs() < 1e-6);
        }

        #[test]
        fn npid_reset_leaves_one_dt_step(
            first_slip in 0.0f32..1.0,
            second_slip in 0.0f32..1.0,
            speed in 5.0f32..80.0,
        ) {
            let mut state = NpidState::default();
            let dt = state.gains.dt;
            npid_abs(&AbsInput::new(speed, wheel_spin_for(speed, first_slip, WHEEL_RADIUS), 0.3), &mut state);
            npid_abs(&AbsInput::new(speed, [0.0; 4], 0.0), &mut state);

            let out = npid_abs(
                &AbsInput::new(speed, wheel_spin_for(speed, second_slip, WHEEL_RADIUS), 0.3),
                &mut state,
            );
            let error = match out.slip_error {
                Some(e) => e,
                None => return Err(TestCaseError::fail("slip was not measured")),
            };
            prop_assert!((state.memory.last_integral - error * dt).abs() < 1e-6);
        }

        #[test]
        fn nonlinear_is_continuous_at_knee(alpha in 0.05f32..2.0, delta in 0.01f32..2.0) {
            let expected = delta.powf(alpha);
            let at = nonlinear(delta, alpha, delta);
            let just_above = nonlinear(delta * 1.0001, alpha, delta);
            prop_assert!((at - expected).abs() <= 1e-4 * expected.max(1.0));
            prop_assert!((just_above - expected).abs() <= 1e-3 * expected.max(1.0));
        }

        #[test]
        fn pid_is_deterministic(slip in 0.0f32..1.0, speed in 5.0f32..80.0) {
            let input = AbsInput::new(speed, wheel_spin_for(speed, slip, WHEEL_RADIUS), 0.3);
            let mut a = PidState::default();
            let mut b = PidState::default();
            prop_assert_eq!(pid_abs(&input, &mut a), pid_abs(&input, &mut b));
        }
    }
}

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn disabled_never_leaves_unit_interval(request: f32) -> bool {
        let out = AbsController::Disabled.apply(&AbsInput::new(10.0, [0.0; 4], request));
        (0.0..=1.0).contains(&out.brake)
    }

    #[quickcheck]
    fn slip_is_none_or_finite(speed: f32, w0: f32, w1: f32) -> bool {
        match wheel_slip(speed, &[w0, w1, w0, w1], WHEEL_RADIUS) {
            Some(slip) => slip.is_finite(),
            None => true,
        }
    }
}
