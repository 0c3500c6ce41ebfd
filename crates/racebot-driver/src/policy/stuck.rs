//! Stuck policy: reverse at full throttle until the selector hands back.

use core::f32::consts::PI;

use crate::command::{ActuatorCommand, REVERSE_GEAR};
use crate::frame::SensorFrame;

/// Steering while reversing out, based on where the car got stuck.
///
/// −1 when the stuck-entry position was left of center, +1 otherwise. A
/// heading beyond ±π flips the sign.
pub fn steer(frame: &SensorFrame, stuck_reference: Option<f32>) -> f32 {
    let reference = stuck_reference.unwrap_or(0.0);
    let normal = if reference > 0.0 { -1.0 } else { 1.0 };
    if frame.angle.abs() > PI {
        -normal
    } else {
        normal
    }
}

/// Full Stuck command.
pub fn drive(frame: &SensorFrame, stuck_reference: Option<f32>) -> ActuatorCommand {
    ActuatorCommand {
        steer: steer(frame, stuck_reference),
        gear: REVERSE_GEAR,
        accel: 1.0,
        brake: 0.0,
        clutch: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_full_throttle() {
        let cmd = drive(&SensorFrame::default(), Some(0.4));
        assert_eq!(cmd.gear, REVERSE_GEAR);
        assert!((cmd.accel - 1.0).abs() < f32::EPSILON);
        assert!(cmd.brake.abs() < f32::EPSILON);
    }

    #[test]
    fn test_steer_sign_follows_reference() {
        let frame = SensorFrame::default();
        assert!((steer(&frame, Some(0.4)) + 1.0).abs() < f32::EPSILON);
        assert!((steer(&frame, Some(-0.4)) - 1.0).abs() < f32::EPSILON);
        assert!((steer(&frame, None) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wrapped_heading_inverts() {
        let frame = SensorFrame::builder().angle(3.3).build();
        assert!((steer(&frame, Some(0.4)) - 1.0).abs() < f32::EPSILON);
    }
}
