//! InsideTrack policy: follow the widest opening in the sensor fan.

use core::cmp::Ordering;
use core::f32::consts::FRAC_PI_2;

use racebot_errors::ValidationError;
use racebot_errors::validation::check_range;
use serde::{Deserialize, Serialize};

use crate::command::ActuatorCommand;
use crate::frame::{FORWARD_SENSOR, SensorFrame, TRACK_SENSORS, sensor_angle};
use crate::params::InsideTrackParams;

/// Steering angle that maps to full lock, in radians.
pub const MAX_STEER_ANGLE: f32 = 0.785_398;

/// Unfiltered brake requested when the car is above target speed.
pub const BRAKE_REQUEST: f32 = 0.3;

/// Parameters of the clearance-blended throttle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceBlend {
    /// Summed forward clearance that maps to full throttle
    pub clearance_scale: f32,
    /// Forward clearance at or above which throttle is forced to 1
    pub wide_open_distance: f32,
    /// Forward clearance at or below which the car is facing a wall
    pub wall_distance: f32,
    /// Speed at or below which a car facing a wall gets full throttle
    pub wall_escape_speed: f32,
}

impl Default for ClearanceBlend {
    fn default() -> Self {
        Self {
            clearance_scale: 600.0,
            wide_open_distance: 70.0,
            wall_distance: 20.0,
            wall_escape_speed: 30.0,
        }
    }
}

/// How the InsideTrack policy chooses its throttle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccelStrategy {
    /// Full throttle at or below target speed, none above it
    #[default]
    BangBang,
    /// Throttle proportional to the clearance ahead
    ClearanceBlend(ClearanceBlend),
}

impl AccelStrategy {
    /// Check the blend parameters.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AccelStrategy::BangBang => Ok(()),
            AccelStrategy::ClearanceBlend(blend) => {
                check_range("accel.clearance_scale", blend.clearance_scale, 1.0, 1.0e5)?;
                check_range("accel.wide_open_distance", blend.wide_open_distance, 0.0, 1.0e4)?;
                check_range("accel.wall_distance", blend.wall_distance, 0.0, 1.0e4)?;
                check_range("accel.wall_escape_speed", blend.wall_escape_speed, 0.0, 1.0e3)
            }
        }
    }
}

/// The range finder with the most room in front of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    /// Sensor index
    pub index: usize,
    /// Distance read by that sensor, 0 when no finite reading exists
    pub distance: f32,
}

/// Find the range finder with the largest reading.
///
/// Ties go to the sensor closest to straight ahead, so a symmetric fan
/// yields a straight-ahead heading. NaN readings are skipped.
pub fn farthest_clearance(track: &[f32; TRACK_SENSORS]) -> Clearance {
    let mut best: Option<Clearance> = None;
    for (index, &distance) in track.iter().enumerate() {
        if distance.is_nan() {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => match distance.total_cmp(&b.distance) {
                Ordering::Greater => true,
                Ordering::Equal => {
                    index.abs_diff(FORWARD_SENSOR) < b.index.abs_diff(FORWARD_SENSOR)
                }
                Ordering::Less => false,
            },
        };
        if better {
            best = Some(Clearance { index, distance });
        }
    }
    match best {
        Some(c) if c.distance.is_finite() => c,
        Some(c) => Clearance {
            index: c.index,
            distance: 0.0,
        },
        None => Clearance {
            index: FORWARD_SENSOR,
            distance: 0.0,
        },
    }
}

/// Whether the car points more than 90° away from the track direction.
#[inline]
pub fn is_facing_wrong_way(angle: f32) -> bool {
    angle.abs() > FRAC_PI_2
}

/// Steering toward the widest opening, or straight out of a reversed heading.
pub fn steer(frame: &SensorFrame, clearance: &Clearance) -> f32 {
    if is_facing_wrong_way(frame.angle) {
        -frame.angle
    } else {
        -sensor_angle(clearance.index) / MAX_STEER_ANGLE
    }
}

/// `base_speed + speed_factor × clearance`.
#[inline]
pub fn target_speed(params: &InsideTrackParams, clearance: &Clearance) -> f32 {
    params.base_speed + params.speed_factor * clearance.distance
}

/// rpm-driven gear choice, at most one shift per tick.
pub fn gear(frame: &SensorFrame, params: &InsideTrackParams) -> i32 {
    let gear = frame.gear;
    if gear <= 0 {
        return params.start_gear;
    }
    let rpm = frame.rpm;
    if rpm > params.high_rpm {
        return gear.saturating_add(1);
    }
    let low_band = gear > params.start_gear && gear < params.low_gear_limit;
    let high_band = gear >= params.low_gear_limit;
    if (low_band && rpm < params.low_rpm) || (high_band && rpm <= params.average_rpm) {
        gear.saturating_sub(1)
    } else {
        gear
    }
}

/// Throttle for the given strategy.
pub fn accel(frame: &SensorFrame, target_speed: f32, strategy: &AccelStrategy) -> f32 {
    let below_target = frame.speed_x <= target_speed;
    match strategy {
        AccelStrategy::BangBang => {
            if below_target {
                1.0
            } else {
                0.0
            }
        }
        AccelStrategy::ClearanceBlend(blend) => {
            let front = frame.forward();
            let near = frame
                .track_sensor(FORWARD_SENSOR - 1)
                .max(frame.track_sensor(FORWARD_SENSOR + 1));
            let wide = frame
                .track_sensor(FORWARD_SENSOR - 2)
                .max(frame.track_sensor(FORWARD_SENSOR + 2));
            let facing_wall =
                front <= blend.wall_distance && frame.speed_x <= blend.wall_escape_speed;
            if front >= blend.wide_open_distance || facing_wall {
                1.0
            } else if below_target {
                (front + near + wide) / blend.clearance_scale
            } else {
                0.0
            }
        }
    }
}

/// Unfiltered brake: a fixed request above target speed.
#[inline]
pub fn brake(frame: &SensorFrame, target_speed: f32) -> f32 {
    if frame.speed_x > target_speed {
        BRAKE_REQUEST
    } else {
        0.0
    }
}

/// Full InsideTrack command, before ABS and clamping.
pub fn drive(
    frame: &SensorFrame,
    params: &InsideTrackParams,
    strategy: &AccelStrategy,
) -> ActuatorCommand {
    let clearance = farthest_clearance(&frame.track);
    let target = target_speed(params, &clearance);
    ActuatorCommand {
        steer: steer(frame, &clearance),
        gear: gear(frame, params),
        accel: accel(frame, target, strategy),
        brake: brake(frame, target),
        clutch: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan(values: &[(usize, f32)], base: f32) -> [f32; TRACK_SENSORS] {
        let mut track = [base; TRACK_SENSORS];
        for &(i, v) in values {
            if let Some(slot) = track.get_mut(i) {
                *slot = v;
            }
        }
        track
    }

    #[test]
    fn test_symmetric_fan_points_ahead() {
        let c = farthest_clearance(&[50.0; TRACK_SENSORS]);
        assert_eq!(c.index, FORWARD_SENSOR);
        assert!((c.distance - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tie_prefers_sensor_near_center() {
        let c = farthest_clearance(&fan(&[(2, 80.0), (12, 80.0)], 10.0));
        assert_eq!(c.index, 12);
    }

    #[test]
    fn test_off_axis_opening_steers_proportionally() {
        // index 13 sits at +40°
        let frame = SensorFrame::builder().track(fan(&[(13, 90.0)], 20.0)).build();
        let c = farthest_clearance(&frame.track);
        let s = steer(&frame, &c);
        assert!((s + 0.698_131_7 / MAX_STEER_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_all_nan_fan_defaults_ahead() {
        let c = farthest_clearance(&[f32::NAN; TRACK_SENSORS]);
        assert_eq!(c.index, FORWARD_SENSOR);
        assert!(c.distance.abs() < f32::EPSILON);
    }

    #[test]
    fn test_wrong_way_steers_by_negated_angle() {
        let frame = SensorFrame::builder().angle(2.0).build();
        let c = farthest_clearance(&frame.track);
        assert!((steer(&frame, &c) + 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gear_rules() {
        let p = InsideTrackParams::default();
        let at = |gear, rpm| gear_of(gear, rpm, &p);
        assert_eq!(at(0, 5000.0), 1);
        assert_eq!(at(-1, 5000.0), 1);
        assert_eq!(at(3, 9500.0), 4);
        assert_eq!(at(2, 1000.0), 1);
        assert_eq!(at(2, 2000.0), 2);
        assert_eq!(at(5, 4000.0), 4);
        assert_eq!(at(5, 4001.0), 5);
        // low band excludes the start gear itself
        assert_eq!(at(1, 100.0), 1);
    }

    fn gear_of(gear: i32, rpm: f32, p: &InsideTrackParams) -> i32 {
        let frame = SensorFrame::builder().gear(gear).rpm(rpm).build();
        super::gear(&frame, p)
    }

    #[test]
    fn test_bang_bang_accel_and_brake() {
        let slow = SensorFrame::builder().speed_x(20.0).build();
        let fast = SensorFrame::builder().speed_x(40.0).build();
        assert!((accel(&slow, 30.0, &AccelStrategy::BangBang) - 1.0).abs() < f32::EPSILON);
        assert!(brake(&slow, 30.0).abs() < f32::EPSILON);
        assert!(accel(&fast, 30.0, &AccelStrategy::BangBang).abs() < f32::EPSILON);
        assert!((brake(&fast, 30.0) - BRAKE_REQUEST).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clearance_blend() {
        let blend = AccelStrategy::ClearanceBlend(ClearanceBlend::default());
        let frame = SensorFrame::builder()
            .speed_x(50.0)
            .track(fan(&[(9, 60.0), (8, 30.0), (10, 60.0), (7, 30.0), (11, 0.0)], 10.0))
            .build();
        assert!((accel(&frame, 100.0, &blend) - 0.25).abs() < 1e-6);

        let open = SensorFrame::builder().speed_x(200.0).track([80.0; TRACK_SENSORS]).build();
        assert!((accel(&open, 100.0, &blend) - 1.0).abs() < f32::EPSILON);

        let wall = SensorFrame::builder().speed_x(5.0).track([10.0; TRACK_SENSORS]).build();
        assert!((accel(&wall, 0.0, &blend) - 1.0).abs() < f32::EPSILON);
    }
}
