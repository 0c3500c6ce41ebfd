//! Nonlinear PID ABS
//!
//! Same error bookkeeping as the linear PID, but each term goes through a
//! slope-matched power law before weighting. Small errors are amplified
//! relative to a linear law and large ones are compressed.

use racebot_errors::ValidationError;
use racebot_errors::validation::{check_finite, check_range};
use serde::{Deserialize, Serialize};

use crate::pid::ControllerState;
use crate::slip::{SpeedUnit, WHEEL_RADIUS, wheel_slip};
use crate::{AbsInput, AbsOutput};

/// Piecewise power law `f(x, α, δ)`.
///
/// `sign(x)·|x|^α` when `|x| > δ`, otherwise the linear segment `δ^(α−1)·x`.
/// Both pieces meet at `|x| = δ`, so the function is continuous.
///
/// # Example
///
/// ```
/// use racebot_abs::npid::nonlinear;
///
/// let at_knee = nonlinear(0.1, 0.3, 0.1);
/// assert!((at_knee - 0.1_f32.powf(0.3)).abs() < 1e-6);
/// ```
#[inline]
pub fn nonlinear(x: f32, alpha: f32, delta: f32) -> f32 {
    if x.abs() > delta {
        x.signum() * x.abs().powf(alpha)
    } else {
        delta.powf(alpha - 1.0) * x
    }
}

/// Tunables for the nonlinear PID ABS.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpidGains {
    /// Wheel rolling radius in meters
    pub wheel_radius: f32,
    /// Slip ratio the controller regulates toward
    pub reference_slip: f32,
    /// Tick duration in seconds
    pub dt: f32,
    /// Overall gain
    pub knp: f32,
    /// Integral weight
    pub tni: f32,
    /// Derivative weight
    pub tnd: f32,
    /// Exponent for the proportional term
    pub alpha_p: f32,
    /// Exponent for the integral term
    pub alpha_i: f32,
    /// Exponent for the derivative term
    pub alpha_d: f32,
    /// Knee of the proportional term
    pub delta_p: f32,
    /// Knee of the integral term
    pub delta_i: f32,
    /// Knee of the derivative term
    pub delta_d: f32,
    /// Below this speed (m/s) the request passes through unfiltered
    pub min_speed: f32,
    /// Unit of the speed sensor
    pub speed_unit: SpeedUnit,
}

impl Default for NpidGains {
    fn default() -> Self {
        Self {
            wheel_radius: WHEEL_RADIUS,
            reference_slip: 0.2,
            dt: 0.02,
            knp: -0.2995,
            tni: 0.279,
            tnd: 0.05,
            alpha_p: 0.3,
            alpha_i: 0.27,
            alpha_d: 0.15,
            delta_p: 0.1,
            delta_i: 0.1,
            delta_d: 0.1,
            min_speed: 3.0,
            speed_unit: SpeedUnit::MetersPerSecond,
        }
    }
}

impl NpidGains {
    /// Check that every gain is usable. Knees must be strictly positive.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("npid.wheel_radius", self.wheel_radius, 1.0e-3, 10.0)?;
        check_range("npid.reference_slip", self.reference_slip, 0.0, 1.0)?;
        check_range("npid.dt", self.dt, 1.0e-4, 1.0)?;
        check_finite("npid.knp", self.knp)?;
        check_finite("npid.tni", self.tni)?;
        check_finite("npid.tnd", self.tnd)?;
        for (field, alpha) in [
            ("npid.alpha_p", self.alpha_p),
            ("npid.alpha_i", self.alpha_i),
            ("npid.alpha_d", self.alpha_d),
        ] {
            check_range(field, alpha, 0.0, 4.0)?;
        }
        for (field, delta) in [
            ("npid.delta_p", self.delta_p),
            ("npid.delta_i", self.delta_i),
            ("npid.delta_d", self.delta_d),
        ] {
            check_range(field, delta, 1.0e-6, 10.0)?;
        }
        check_range("npid.min_speed", self.min_speed, 0.0, 100.0)
    }
}

/// Nonlinear PID ABS state: gains plus feedback memory.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NpidState {
    /// Controller tunables
    pub gains: NpidGains,
    /// Feedback memory
    pub memory: ControllerState,
}

impl NpidState {
    /// Create an NPID ABS with cleared memory.
    pub fn new(gains: NpidGains) -> Self {
        Self {
            gains,
            memory: ControllerState::default(),
        }
    }
}

/// Nonlinear PID ABS filter.
///
/// `brake = Knp · (f(e,αp,δp) + Tni·f(I,αi,δi) + Tnd·f(D,αd,δd))`. Same
/// zero-request reset and low-speed passthrough as [`crate::pid_abs`].
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - No syscalls or I/O
#[inline]
pub fn npid_abs(input: &AbsInput, state: &mut NpidState) -> AbsOutput {
    if !input.is_braking() {
        state.memory.clear();
        return AbsOutput::released();
    }

    let g = &state.gains;
    let speed = g.speed_unit.to_meters_per_second(input.speed_x);
    if speed.is_nan() || speed < g.min_speed {
        return AbsOutput::passthrough(input.brake);
    }
    let Some(slip) = wheel_slip(speed, &input.wheel_spin, g.wheel_radius) else {
        return AbsOutput::passthrough(input.brake);
    };

    let terms = state.memory.step(g.reference_slip - slip, g.dt);
    let brake = g.knp
        * (nonlinear(terms.error, g.alpha_p, g.delta_p)
            + g.tni * nonlinear(terms.integral, g.alpha_i, g.delta_i)
            + g.tnd * nonlinear(terms.derivative, g.alpha_d, g.delta_d));
    if !brake.is_finite() {
        return AbsOutput::passthrough(input.brake);
    }
    AbsOutput::new(brake, Some(terms.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonlinear_is_odd() {
        for x in [0.05_f32, 0.1, 0.4, 2.0] {
            assert!((nonlinear(x, 0.3, 0.1) + nonlinear(-x, 0.3, 0.1)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_nonlinear_linear_segment() {
        let slope = 0.1_f32.powf(0.3 - 1.0);
        assert!((nonlinear(0.05, 0.3, 0.1) - slope * 0.05).abs() < 1e-5);
        assert!(nonlinear(0.0, 0.3, 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_nonlinear_power_segment() {
        assert!((nonlinear(-0.8, 0.3, 0.1) + 0.8_f32.powf(0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_request_clears_memory() {
        let mut state = NpidState::default();
        npid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
        assert!(state.memory.last_error.abs() > 0.0);

        npid_abs(&AbsInput::new(20.0, [0.0; 4], 0.0), &mut state);
        assert_eq!(state.memory, ControllerState::default());
    }

    #[test]
    fn test_locked_wheels_request_brake() {
        let mut state = NpidState::default();
        let out = npid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
        assert!(out.brake > 0.0);
    }

    #[test]
    fn test_zero_knee_rejected() {
        let gains = NpidGains {
            delta_i: 0.0,
            ..NpidGains::default()
        };
        assert!(gains.validate().is_err());
    }
}
