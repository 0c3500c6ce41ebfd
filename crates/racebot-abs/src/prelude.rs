//! Prelude for the ABS crate.
//!
//! # Example
//!
//! ```
//! use racebot_abs::prelude::*;
//!
//! let mut abs = AbsController::Npid(NpidState::default());
//! let out = abs.apply(&AbsInput::new(25.0, [40.0; 4], 0.3));
//! assert!((0.0..=1.0).contains(&out.brake));
//! ```

pub use crate::controller::{AbsController, AbsKind};
pub use crate::npid::{NpidGains, NpidState, nonlinear, npid_abs};
pub use crate::pid::{ControllerState, ErrorTerms, PidGains, PidState, pid_abs};
pub use crate::slip::{SpeedUnit, WHEEL_RADIUS, wheel_ratio, wheel_slip};
pub use crate::state::AbsState;
pub use crate::threshold::{ThresholdState, threshold_abs};
pub use crate::{AbsInput, AbsOutput};
