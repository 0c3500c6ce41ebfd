//! Prelude for the driver crate.
//!
//! Pulls in the facade, its configuration and the ABS tunables needed to
//! build one.

pub use crate::command::{ActuatorCommand, MAX_GEAR, REVERSE_GEAR};
pub use crate::config::{AbsConfig, DriverConfig};
pub use crate::driver::Driver;
pub use crate::frame::{FORWARD_SENSOR, SensorFrame, SensorFrameBuilder, TRACK_SENSORS};
pub use crate::params::{InsideTrackParams, OutOfTrackParams, ParameterSet, StuckParams};
pub use crate::policy::{AccelStrategy, ClearanceBlend, DrivingMode, PolicyContext};
pub use crate::selector::{ModeSelector, Transition, right_way, track_mode};
pub use crate::stats::{BrakeEvent, ModeCounts, RunReport, RunStats};
pub use crate::surface::{
    MemorySurfaceStore, RaceStage, SurfaceLatch, SurfaceStore, SurfaceType,
};
pub use racebot_abs::{AbsKind, NpidGains, PidGains, SpeedUnit, ThresholdState};
