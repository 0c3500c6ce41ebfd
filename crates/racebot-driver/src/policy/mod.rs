//! Driving-mode policies.
//!
//! Each mode is a pure function from the sensor frame (plus the parameters
//! and the selector's stuck reference) to an unclamped actuator command.
//! [`DrivingMode::drive`] is the dispatch table.

pub mod inside_track;
pub mod out_of_track;
pub mod stuck;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::command::ActuatorCommand;
use crate::frame::SensorFrame;
use crate::params::ParameterSet;

pub use inside_track::{AccelStrategy, ClearanceBlend, Clearance, farthest_clearance};

/// The three exclusive driving modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingMode {
    /// On track with room ahead
    #[default]
    InsideTrack,
    /// Off the asphalt or with no room ahead
    OutOfTrack,
    /// Reversing out of a stuck position
    Stuck,
}

impl DrivingMode {
    /// Every mode, in reporting order.
    pub const ALL: [DrivingMode; 3] = [
        DrivingMode::InsideTrack,
        DrivingMode::OutOfTrack,
        DrivingMode::Stuck,
    ];

    /// Run this mode's policy. The result is not clamped and, for
    /// InsideTrack, carries the unfiltered brake.
    pub fn drive(self, frame: &SensorFrame, ctx: &PolicyContext<'_>) -> ActuatorCommand {
        match self {
            DrivingMode::InsideTrack => {
                inside_track::drive(frame, &ctx.params.inside_track, ctx.accel)
            }
            DrivingMode::OutOfTrack => out_of_track::drive(frame, &ctx.params.out_of_track),
            DrivingMode::Stuck => stuck::drive(frame, ctx.stuck_reference),
        }
    }
}

impl fmt::Display for DrivingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrivingMode::InsideTrack => write!(f, "InsideTrack"),
            DrivingMode::OutOfTrack => write!(f, "OutOfTrack"),
            DrivingMode::Stuck => write!(f, "Stuck"),
        }
    }
}

/// Read-only inputs a policy needs besides the frame.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    /// Parameters currently in force
    pub params: &'a ParameterSet,
    /// InsideTrack throttle strategy
    pub accel: &'a AccelStrategy,
    /// Track position captured when the current stuck episode began
    pub stuck_reference: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_is_pure() {
        let params = ParameterSet::baseline();
        let accel = AccelStrategy::default();
        let ctx = PolicyContext {
            params: &params,
            accel: &accel,
            stuck_reference: Some(0.3),
        };
        let frame = SensorFrame::builder()
            .speed_x(35.0)
            .speed_y(2.0)
            .angle(0.2)
            .track_pos(0.4)
            .track([40.0; 19])
            .gear(3)
            .rpm(6000.0)
            .build();
        for mode in DrivingMode::ALL {
            assert_eq!(mode.drive(&frame, &ctx), mode.drive(&frame, &ctx));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DrivingMode::OutOfTrack.to_string(), "OutOfTrack");
    }
}
