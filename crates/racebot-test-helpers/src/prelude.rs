//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use racebot_test_helpers::prelude::*;
//! ```

pub use crate::fixtures::{fan_with_peak, uniform_fan, wheel_spin_for};
pub use crate::must::{must, must_some};

/// Return type for tests that use `?`.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;
