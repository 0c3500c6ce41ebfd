//! ABS State Types
//!
//! This module aggregates all controller state types for convenient access.

pub use crate::npid::NpidState;
pub use crate::pid::{ControllerState, PidState};
pub use crate::threshold::ThresholdState;

/// Common operations on ABS controller state.
pub trait AbsState: Copy + Clone + std::fmt::Debug {
    /// Return the feedback memory to its initial values.
    fn reset(&mut self);
}

impl AbsState for ThresholdState {
    fn reset(&mut self) {
        // Threshold ABS keeps no memory between ticks
    }
}

impl AbsState for PidState {
    fn reset(&mut self) {
        self.memory.clear();
    }
}

impl AbsState for NpidState {
    fn reset(&mut self) {
        self.memory.clear();
    }
}
