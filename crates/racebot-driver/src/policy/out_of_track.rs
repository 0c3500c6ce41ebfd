//! OutOfTrack policy: get back onto the asphalt without spinning.

use crate::command::ActuatorCommand;
use crate::frame::SensorFrame;
use crate::params::OutOfTrackParams;

/// Light brake used while skidding sideways.
pub const SKID_BRAKE: f32 = 0.1;

/// Steer back toward the track using the two return-angle thresholds.
///
/// The thresholds are mirrored when the car is on the right of the
/// centerline (`track_pos <= 0`).
pub fn steer(frame: &SensorFrame, params: &OutOfTrackParams) -> f32 {
    let angle = frame.angle;
    if frame.track_pos > 0.0 {
        if angle > params.max_return_angle {
            1.0
        } else if angle < params.min_return_angle {
            -1.0
        } else {
            0.0
        }
    } else if angle < -params.max_return_angle {
        -1.0
    } else if angle > -params.min_return_angle {
        1.0
    } else {
        0.0
    }
}

/// Gear chosen purely from longitudinal speed.
pub fn gear(frame: &SensorFrame, params: &OutOfTrackParams) -> i32 {
    let speed = frame.speed_x;
    if speed >= params.velocity_gear_4 {
        frame.gear
    } else if speed >= params.velocity_gear_3 {
        3
    } else if speed >= params.velocity_gear_2 {
        2
    } else {
        1
    }
}

/// `1 − |speed_y| × negative_accel_percent`, not clamped.
///
/// Large lateral speeds drive this below zero. The driver clamps the emitted
/// command; the raw value is exposed so the behavior stays observable.
#[inline]
pub fn raw_accel(frame: &SensorFrame, params: &OutOfTrackParams) -> f32 {
    1.0 - frame.speed_y.abs() * params.negative_accel_percent
}

/// Full brake when rolling backward, a light brake while skidding.
pub fn brake(frame: &SensorFrame, params: &OutOfTrackParams) -> f32 {
    if frame.speed_x < 0.0 {
        1.0
    } else if frame.speed_y.abs() > params.max_skidding {
        SKID_BRAKE
    } else {
        0.0
    }
}

/// Full OutOfTrack command, before clamping.
pub fn drive(frame: &SensorFrame, params: &OutOfTrackParams) -> ActuatorCommand {
    ActuatorCommand {
        steer: steer(frame, params),
        gear: gear(frame, params),
        accel: raw_accel(frame, params),
        brake: brake(frame, params),
        clutch: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> OutOfTrackParams {
        OutOfTrackParams::default()
    }

    fn at(pos: f32, angle: f32) -> f32 {
        let frame = SensorFrame::builder().track_pos(pos).angle(angle).build();
        steer(&frame, &params())
    }

    #[test]
    fn test_steer_left_side() {
        assert!((at(1.5, 0.8) - 1.0).abs() < f32::EPSILON);
        assert!((at(1.5, 0.3) + 1.0).abs() < f32::EPSILON);
        assert!(at(1.5, 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_steer_right_side_is_mirrored() {
        assert!((at(-1.5, -0.8) + 1.0).abs() < f32::EPSILON);
        assert!((at(-1.5, -0.3) - 1.0).abs() < f32::EPSILON);
        assert!(at(-1.5, -0.6).abs() < f32::EPSILON);
        // exactly on the centerline uses the mirrored branch
        assert!((at(0.0, 0.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gear_thresholds_are_inclusive() {
        let g = |speed: f32| {
            let frame = SensorFrame::builder().speed_x(speed).gear(5).build();
            gear(&frame, &params())
        };
        assert_eq!(g(90.0), 5);
        assert_eq!(g(70.0), 3);
        assert_eq!(g(69.9), 2);
        assert_eq!(g(40.0), 2);
        assert_eq!(g(10.0), 1);
        assert_eq!(g(-3.0), 1);
    }

    #[test]
    fn test_raw_accel_can_go_negative() {
        let frame = SensorFrame::builder().speed_y(25.0).build();
        assert!(raw_accel(&frame, &params()) < 0.0);
        assert!(drive(&frame, &params()).clamped().accel.abs() < f32::EPSILON);
    }

    #[test]
    fn test_brake_cases() {
        let reversing = SensorFrame::builder().speed_x(-2.0).speed_y(10.0).build();
        let skidding = SensorFrame::builder().speed_x(20.0).speed_y(4.0).build();
        let calm = SensorFrame::builder().speed_x(20.0).speed_y(1.0).build();
        assert!((brake(&reversing, &params()) - 1.0).abs() < f32::EPSILON);
        assert!((brake(&skidding, &params()) - SKID_BRAKE).abs() < f32::EPSILON);
        assert!(brake(&calm, &params()).abs() < f32::EPSILON);
    }
}
