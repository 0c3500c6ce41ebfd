//! Wheel slip measurement.
//!
//! Every controller variant starts from the same per-tick measurement: the
//! mean over the four wheels of how far the wheel surface speed lags behind
//! the vehicle's longitudinal speed.

use serde::{Deserialize, Serialize};

/// Default rolling radius of the wheels, in meters.
pub const WHEEL_RADIUS: f32 = 0.4836;

/// Longitudinal speeds at or below this value (m/s) are treated as stationary
/// by [`wheel_slip`] and [`wheel_ratio`].
pub const STATIONARY_SPEED: f32 = 1.0e-3;

/// Unit the simulator reports the longitudinal speed in.
///
/// Wheel spin always arrives in rad/s, so the product `ω·R` is in m/s. When
/// the speed sensor is in km/h it has to be divided by 3.6 before the two
/// are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Speed is already in m/s
    #[default]
    MetersPerSecond,
    /// Speed is in km/h and is divided by 3.6
    KilometersPerHour,
}

impl SpeedUnit {
    /// Convert a raw speed reading to m/s.
    #[inline]
    pub fn to_meters_per_second(self, speed: f32) -> f32 {
        match self {
            SpeedUnit::MetersPerSecond => speed,
            SpeedUnit::KilometersPerHour => speed / 3.6,
        }
    }
}

/// Mean slip ratio over the four wheels: `mean((v − ω·R) / v)`.
///
/// `speed` must already be in m/s. Returns `None` when the vehicle is
/// effectively stationary or when any input is non-finite, in which case the
/// caller falls back to the unfiltered brake.
///
/// # Example
///
/// ```
/// use racebot_abs::slip::{WHEEL_RADIUS, wheel_slip};
///
/// let rolling = 20.0 / WHEEL_RADIUS;
/// let slip = wheel_slip(20.0, &[rolling; 4], WHEEL_RADIUS).unwrap_or(1.0);
/// assert!(slip.abs() < 1e-5);
/// assert!(wheel_slip(0.0, &[0.0; 4], WHEEL_RADIUS).is_none());
/// ```
#[inline]
pub fn wheel_slip(speed: f32, wheel_spin: &[f32; 4], radius: f32) -> Option<f32> {
    wheel_ratio(speed, wheel_spin, radius).map(|ratio| 1.0 - ratio)
}

/// Mean normalized wheel speed over the four wheels: `mean(ω·R / v)`.
///
/// A value of 1 means every wheel rolls freely, 0 means every wheel is
/// locked. Same stationary and non-finite handling as [`wheel_slip`].
#[inline]
pub fn wheel_ratio(speed: f32, wheel_spin: &[f32; 4], radius: f32) -> Option<f32> {
    if !speed.is_finite() || speed <= STATIONARY_SPEED {
        return None;
    }
    let total: f32 = wheel_spin.iter().map(|spin| spin * radius / speed).sum();
    let ratio = total / 4.0;
    ratio.is_finite().then_some(ratio)
}
