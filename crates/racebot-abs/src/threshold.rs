//! Threshold ABS
//!
//! Stateless on/off scheme: any brake request becomes full brake, scaled down
//! in proportion to the wheel speed ratio whenever the wheels are about to
//! lock.

use serde::{Deserialize, Serialize};

use crate::slip::{SpeedUnit, WHEEL_RADIUS, wheel_ratio};
use crate::{AbsInput, AbsOutput};

/// Parameters for the threshold ABS.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdState {
    /// Wheel speed ratio below which the brake is scaled down
    pub slip_threshold: f32,
    /// Multiplier applied together with the ratio when scaling
    pub range: f32,
    /// Below this speed (m/s) the request passes through unscaled
    pub min_speed: f32,
    /// Wheel rolling radius in meters
    pub wheel_radius: f32,
    /// Unit of the speed sensor
    pub speed_unit: SpeedUnit,
}

impl ThresholdState {
    /// Create a threshold ABS with the given trigger ratio and range.
    ///
    /// # Example
    ///
    /// ```
    /// use racebot_abs::ThresholdState;
    ///
    /// let state = ThresholdState::new(0.8, 0.8);
    /// assert!((state.min_speed - 3.0).abs() < f32::EPSILON);
    /// ```
    pub fn new(slip_threshold: f32, range: f32) -> Self {
        Self {
            slip_threshold,
            range,
            ..Self::default()
        }
    }

    /// Use a different speed sensor unit.
    pub fn with_speed_unit(mut self, unit: SpeedUnit) -> Self {
        self.speed_unit = unit;
        self
    }
}

impl Default for ThresholdState {
    fn default() -> Self {
        Self {
            slip_threshold: 0.8,
            range: 0.8,
            min_speed: 3.0,
            wheel_radius: WHEEL_RADIUS,
            speed_unit: SpeedUnit::MetersPerSecond,
        }
    }
}

/// Threshold ABS filter.
///
/// A zero request stays zero. Otherwise the request is binarized to 1 and,
/// when the mean wheel speed ratio is below `slip_threshold`, multiplied by
/// `ratio × range`. The reported slip error is `ratio − slip_threshold`.
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
/// let state = ThresholdState::default();
/// let locked = AbsInput::new(20.0, [0.0; 4], 0.3);
/// let out = threshold_abs(&locked, &state);
/// assert!(out.brake < 0.01);
/// ```
#[inline]
pub fn threshold_abs(input: &AbsInput, state: &ThresholdState) -> AbsOutput {
    if !input.is_braking() {
        return AbsOutput::released();
    }
    let request = 1.0;

    let speed = state.speed_unit.to_meters_per_second(input.speed_x);
    if speed.is_nan() || speed < state.min_speed {
        return AbsOutput::passthrough(request);
    }

    match wheel_ratio(speed, &input.wheel_spin, state.wheel_radius) {
        Some(ratio) if ratio < state.slip_threshold => {
            AbsOutput::new(request * ratio * state.range, Some(ratio - state.slip_threshold))
        }
        Some(ratio) => AbsOutput::new(request, Some(ratio - state.slip_threshold)),
        None => AbsOutput::passthrough(request),
    }
}
