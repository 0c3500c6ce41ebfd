//! Reactive driving agent for racebot
//!
//! Every simulator tick the [`Driver`] receives a [`SensorFrame`] and answers
//! with an [`ActuatorCommand`]. A three-state machine picks the driving mode
//! and the matching policy computes pedals, steering and gear; while on
//! track the brake request is filtered by the configured ABS controller.
//!
//! # Overview
//!
//! - **Frame / Command**: per-tick input snapshot and output command
//! - **Params**: per-mode tunables with the ROAD, DIRT and baseline presets
//! - **Selector**: InsideTrack / OutOfTrack / Stuck state machine
//! - **Policy**: one pure function per mode
//! - **Surface**: one-shot ROAD/DIRT switch and the surface store port
//! - **Config**: JSON/YAML driver configuration
//! - **Stats**: mode counts, brake trace and the run report
//!
//! # Example
//!
//! ```
//! use racebot_driver::prelude::*;
//!
//! let config = DriverConfig::default().with_abs(AbsConfig::Pid(PidGains::default()));
//! let mut driver = Driver::new(config)?;
//! driver.observe_surface("ROAD");
//!
//! let frame = SensorFrame::builder()
//!     .speed_x(25.0)
//!     .track([40.0; 19])
//!     .gear(2)
//!     .rpm(4000.0)
//!     .build();
//! let cmd = driver.tick(&frame);
//! assert!(cmd.is_valid());
//!
//! let report = driver.shutdown();
//! assert_eq!(report.total_ticks, 1);
//! # Ok::<(), racebot_errors::RacebotError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod command;
pub mod config;
pub mod driver;
pub mod frame;
pub mod params;
pub mod policy;
pub mod prelude;
pub mod selector;
pub mod stats;
pub mod surface;

pub use command::ActuatorCommand;
pub use config::{AbsConfig, DriverConfig};
pub use driver::Driver;
pub use frame::{SensorFrame, SensorFrameBuilder};
pub use params::{InsideTrackParams, OutOfTrackParams, ParameterSet, StuckParams};
pub use policy::{AccelStrategy, DrivingMode};
pub use selector::{ModeSelector, Transition};
pub use stats::{BrakeEvent, ModeCounts, RunReport};
pub use surface::{MemorySurfaceStore, RaceStage, SurfaceStore, SurfaceType};
