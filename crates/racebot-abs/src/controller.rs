//! ABS controller selection.
//!
//! Exactly one variant is chosen when the driver is built and it stays in
//! place for the whole run. The closed enum keeps dispatch a plain `match`.

use core::fmt;

use racebot_errors::ValidationError;
use racebot_errors::validation::check_range;
use serde::{Deserialize, Serialize};

use crate::npid::{NpidState, npid_abs};
use crate::pid::{PidState, pid_abs};
use crate::state::AbsState;
use crate::threshold::{ThresholdState, threshold_abs};
use crate::{AbsInput, AbsOutput};

/// Tag identifying an ABS variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsKind {
    /// No ABS, the unfiltered brake is used as is
    Disabled,
    /// On/off threshold scheme
    Threshold,
    /// Linear PID on wheel slip
    Pid,
    /// Nonlinear PID on wheel slip
    Npid,
}

impl fmt::Display for AbsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsKind::Disabled => write!(f, "disabled"),
            AbsKind::Threshold => write!(f, "threshold"),
            AbsKind::Pid => write!(f, "pid"),
            AbsKind::Npid => write!(f, "npid"),
        }
    }
}

/// The ABS layer owned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AbsController {
    /// Pass the unfiltered brake through, clamped
    #[default]
    Disabled,
    /// Threshold ABS
    Threshold(ThresholdState),
    /// Linear PID ABS
    Pid(PidState),
    /// Nonlinear PID ABS
    Npid(NpidState),
}

impl AbsController {
    /// Filter one tick's brake request.
    #[inline]
    pub fn apply(&mut self, input: &AbsInput) -> AbsOutput {
        match self {
            AbsController::Disabled => AbsOutput::passthrough(input.brake),
            AbsController::Threshold(state) => threshold_abs(input, state),
            AbsController::Pid(state) => pid_abs(input, state),
            AbsController::Npid(state) => npid_abs(input, state),
        }
    }

    /// Clear any feedback memory.
    pub fn reset(&mut self) {
        match self {
            AbsController::Disabled => {}
            AbsController::Threshold(state) => state.reset(),
            AbsController::Pid(state) => state.reset(),
            AbsController::Npid(state) => state.reset(),
        }
    }

    /// Which variant this is.
    pub fn kind(&self) -> AbsKind {
        match self {
            AbsController::Disabled => AbsKind::Disabled,
            AbsController::Threshold(_) => AbsKind::Threshold,
            AbsController::Pid(_) => AbsKind::Pid,
            AbsController::Npid(_) => AbsKind::Npid,
        }
    }

    /// Whether this variant filters the brake at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, AbsController::Disabled)
    }

    /// Check the tunables of the selected variant.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AbsController::Disabled => Ok(()),
            AbsController::Threshold(state) => {
                check_range("threshold.slip_threshold", state.slip_threshold, 0.0, 1.0)?;
                check_range("threshold.range", state.range, 0.0, 10.0)?;
                check_range("threshold.min_speed", state.min_speed, 0.0, 100.0)?;
                check_range("threshold.wheel_radius", state.wheel_radius, 1.0e-3, 10.0)
            }
            AbsController::Pid(state) => state.gains.validate(),
            AbsController::Npid(state) => state.gains.validate(),
        }
    }
}
