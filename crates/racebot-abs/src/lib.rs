//! RT-Safe ABS Controllers for racebot
//!
//! This crate turns the driving policy's unfiltered brake request into the
//! filtered brake that is actually sent to the car, regulating wheel slip so
//! the wheels do not lock.
//!
//! # Overview
//!
//! - **Slip**: mean wheel slip and wheel speed ratio over the four wheels
//! - **Threshold**: stateless on/off scaling below a wheel speed ratio
//! - **PID**: linear PID on slip error with persistent integrator
//! - **NPID**: PID with a slope-matched power law on each term
//! - **Controller**: closed enum picking one variant per run
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations in controller hot paths
//! - O(1) time complexity for all operations
//! - A stationary car or non-finite measurement falls back to the unfiltered
//!   brake instead of producing NaN
//!
//! # Example
//!
//! ```
//! use racebot_abs::prelude::*;
//!
//! let mut state = PidState::default();
//!
//! // Every tick:
//! let input = AbsInput::new(22.0, [30.0, 30.0, 28.0, 28.0], 0.3);
//! let out = pid_abs(&input, &mut state);
//! assert!((0.0..=1.0).contains(&out.brake));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod controller;
pub mod npid;
pub mod pid;
pub mod prelude;
pub mod slip;
pub mod state;
pub mod threshold;

pub use controller::{AbsController, AbsKind};
pub use npid::{NpidGains, npid_abs};
pub use pid::{ErrorTerms, PidGains, pid_abs};
pub use slip::SpeedUnit;
pub use state::*;
pub use threshold::threshold_abs;

/// Per-tick measurement handed to an ABS controller.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbsInput {
    /// Longitudinal vehicle speed, in the controller's configured unit
    pub speed_x: f32,
    /// Wheel angular velocities in rad/s
    pub wheel_spin: [f32; 4],
    /// Unfiltered brake request from the driving policy
    pub brake: f32,
}

impl AbsInput {
    /// Build an input from its parts.
    pub fn new(speed_x: f32, wheel_spin: [f32; 4], brake: f32) -> Self {
        Self {
            speed_x,
            wheel_spin,
            brake,
        }
    }

    /// Whether the policy asks for any brake this tick.
    #[inline]
    pub fn is_braking(&self) -> bool {
        self.brake > 0.0
    }
}

/// Filtered brake plus the slip error the controller acted on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbsOutput {
    /// Filtered brake in `[0, 1]`
    pub brake: f32,
    /// Slip error for this tick, `None` when no slip was measured
    pub slip_error: Option<f32>,
}

impl AbsOutput {
    /// Clamp `brake` into `[0, 1]`; non-finite values become 0.
    #[inline]
    pub fn new(brake: f32, slip_error: Option<f32>) -> Self {
        let brake = if brake.is_finite() {
            brake.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { brake, slip_error }
    }

    /// The request is used unfiltered, clamped.
    #[inline]
    pub fn passthrough(brake: f32) -> Self {
        Self::new(brake, None)
    }

    /// No brake and no measurement.
    #[inline]
    pub fn released() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_clamps() {
        assert!((AbsOutput::new(3.0, None).brake - 1.0).abs() < f32::EPSILON);
        assert!(AbsOutput::new(-0.5, None).brake.abs() < f32::EPSILON);
        assert!(AbsOutput::new(f32::NAN, None).brake.abs() < f32::EPSILON);
    }

    #[test]
    fn test_is_braking() {
        assert!(AbsInput::new(1.0, [0.0; 4], 0.3).is_braking());
        assert!(!AbsInput::new(1.0, [0.0; 4], 0.0).is_braking());
        assert!(!AbsInput::new(1.0, [0.0; 4], f32::NAN).is_braking());
    }
}
