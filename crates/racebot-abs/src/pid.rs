//! Linear PID ABS
//!
//! Regulates the mean wheel slip toward a reference value. The integrator and
//! the previous error live in a [`ControllerState`] that persists across
//! braking ticks and is cleared on the tick the brake request drops to zero.

use racebot_errors::ValidationError;
use racebot_errors::validation::{check_finite, check_range};
use serde::{Deserialize, Serialize};

use crate::slip::{SpeedUnit, WHEEL_RADIUS, wheel_slip};
use crate::{AbsInput, AbsOutput};

/// Error feedback memory shared by the PID and NPID controllers.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ControllerState {
    /// Slip error seen on the previous braking tick
    pub last_error: f32,
    /// Accumulated integral of the slip error
    pub last_integral: f32,
}

/// Error, integral and derivative terms for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ErrorTerms {
    /// `reference − slip`
    pub error: f32,
    /// Integral after this tick's `error · dt` step
    pub integral: f32,
    /// `(error − last_error) / dt`
    pub derivative: f32,
}

impl ControllerState {
    /// Advance the integrator by one tick and remember `error`.
    #[inline]
    pub fn step(&mut self, error: f32, dt: f32) -> ErrorTerms {
        let integral = self.last_integral + error * dt;
        let derivative = (error - self.last_error) / dt;
        self.last_integral = integral;
        self.last_error = error;
        ErrorTerms {
            error,
            integral,
            derivative,
        }
    }

    /// Clear the integrator and the remembered error.
    #[inline]
    pub fn clear(&mut self) {
        self.last_error = 0.0;
        self.last_integral = 0.0;
    }
}

/// Tunables for the linear PID ABS.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Wheel rolling radius in meters
    pub wheel_radius: f32,
    /// Slip ratio the controller regulates toward
    pub reference_slip: f32,
    /// Tick duration in seconds
    pub dt: f32,
    /// Proportional gain
    pub kp: f32,
    /// Integral time constant
    pub ti: f32,
    /// Derivative time constant
    pub td: f32,
    /// Below this speed (m/s) the request passes through unfiltered
    pub min_speed: f32,
    /// Unit of the speed sensor
    pub speed_unit: SpeedUnit,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            wheel_radius: WHEEL_RADIUS,
            reference_slip: 0.2,
            dt: 0.02,
            kp: -0.60178,
            ti: 0.4098,
            td: 0.1,
            min_speed: 3.0,
            speed_unit: SpeedUnit::MetersPerSecond,
        }
    }
}

impl PidGains {
    /// Check that every gain is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("pid.wheel_radius", self.wheel_radius, 1.0e-3, 10.0)?;
        check_range("pid.reference_slip", self.reference_slip, 0.0, 1.0)?;
        check_range("pid.dt", self.dt, 1.0e-4, 1.0)?;
        check_finite("pid.kp", self.kp)?;
        check_finite("pid.ti", self.ti)?;
        check_finite("pid.td", self.td)?;
        check_range("pid.min_speed", self.min_speed, 0.0, 100.0)
    }
}

/// Linear PID ABS state: gains plus feedback memory.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PidState {
    /// Controller tunables
    pub gains: PidGains,
    /// Feedback memory
    pub memory: ControllerState,
}

impl PidState {
    /// Create a PID ABS with cleared memory.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            memory: ControllerState::default(),
        }
    }
}

/// Linear PID ABS filter.
///
/// `brake = Kp · (e + Ti·I + Td·D)` with `e = reference_slip − slip`. A zero
/// request clears the memory and returns zero before any PID math runs.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - No syscalls or I/O
///
/// # Example
///
/// ```
/// use racebot_abs::prelude::*;
///
/// let mut state = PidState::default();
/// let out = pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
/// assert!(out.brake > 0.0);
///
/// pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.0), &mut state);
/// assert!(state.memory.last_integral.abs() < f32::EPSILON);
/// ```
#[inline]
pub fn pid_abs(input: &AbsInput, state: &mut PidState) -> AbsOutput {
    if !input.is_braking() {
        state.memory.clear();
        return AbsOutput::released();
    }

    let gains = &state.gains;
    let speed = gains.speed_unit.to_meters_per_second(input.speed_x);
    if speed.is_nan() || speed < gains.min_speed {
        return AbsOutput::passthrough(input.brake);
    }
    let Some(slip) = wheel_slip(speed, &input.wheel_spin, gains.wheel_radius) else {
        return AbsOutput::passthrough(input.brake);
    };

    let terms = state.memory.step(gains.reference_slip - slip, gains.dt);
    let brake = gains.kp * (terms.error + gains.ti * terms.integral + gains.td * terms.derivative);
    if !brake.is_finite() {
        return AbsOutput::passthrough(input.brake);
    }
    AbsOutput::new(brake, Some(terms.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_accumulates_integral() {
        let mut memory = ControllerState::default();
        let first = memory.step(0.5, 0.02);
        assert!((first.integral - 0.01).abs() < 1e-6);
        assert!((first.derivative - 25.0).abs() < 1e-3);

        let second = memory.step(0.5, 0.02);
        assert!((second.integral - 0.02).abs() < 1e-6);
        assert!(second.derivative.abs() < 1e-6);
    }

    #[test]
    fn test_locked_wheels_request_brake() {
        // slip 1.0, error -0.8, negative Kp turns that into positive brake
        let mut state = PidState::default();
        let out = pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
        assert!(out.brake > 0.0);
        assert!(out.slip_error.is_some_and(|e| (e + 0.8).abs() < 1e-5));
    }

    #[test]
    fn test_zero_request_clears_memory() {
        let mut state = PidState::default();
        pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
        assert!(state.memory.last_integral.abs() > 0.0);

        let out = pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.0), &mut state);
        assert!(out.brake.abs() < f32::EPSILON);
        assert_eq!(state.memory, ControllerState::default());
    }

    #[test]
    fn test_low_speed_leaves_memory_untouched() {
        let mut state = PidState::default();
        pid_abs(&AbsInput::new(20.0, [0.0; 4], 0.3), &mut state);
        let before = state.memory;

        let out = pid_abs(&AbsInput::new(1.0, [0.0; 4], 0.3), &mut state);
        assert!((out.brake - 0.3).abs() < f32::EPSILON);
        assert_eq!(state.memory, before);
    }

    #[test]
    fn test_default_gains_validate() {
        assert!(PidGains::default().validate().is_ok());
        let bad = PidGains {
            dt: 0.0,
            ..PidGains::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_kilometers_per_hour_speed() {
        // 72 km/h is 20 m/s, wheels rolling freely at 20 m/s give zero slip
        let kmh = PidGains {
            speed_unit: SpeedUnit::KilometersPerHour,
            ..PidGains::default()
        };
        let rolling = [20.0 / WHEEL_RADIUS; 4];

        let mut state = PidState::new(kmh);
        let out = pid_abs(&AbsInput::new(72.0, rolling, 0.3), &mut state);
        assert!(out.slip_error.is_some_and(|e| (e - 0.2).abs() < 1e-4));

        let mut state = PidState::default();
        let out = pid_abs(&AbsInput::new(72.0, rolling, 0.3), &mut state);
        assert!(out.slip_error.is_some_and(|e| e < -0.5));
    }

    #[test]
    fn test_kilometers_per_hour_below_min_speed() {
        // 7.2 km/h is 2 m/s, under the 3 m/s floor
        let kmh = PidGains {
            speed_unit: SpeedUnit::KilometersPerHour,
            ..PidGains::default()
        };
        let mut state = PidState::new(kmh);
        let out = pid_abs(&AbsInput::new(7.2, [0.0; 4], 0.3), &mut state);
        assert!((out.brake - 0.3).abs() < f32::EPSILON);
        assert_eq!(out.slip_error, None);
        assert_eq!(state.memory, ControllerState::default());
    }
}
