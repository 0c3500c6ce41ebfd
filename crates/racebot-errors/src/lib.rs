//! Centralized error types for racebot
//!
//! The driving core has no fatal error paths: every tick produces a command.
//! Errors only surface at the edges, while loading and validating
//! configuration, parsing the surface flag handed over by the simulator, or
//! talking to the surface store collaborator.
//!
//! # Architecture
//!
//! - [`common`]: Top-level error type and severity levels
//! - [`validation`]: Configuration and input validation errors
//! - [`surface`]: Surface flag parsing and surface store errors
//!
//! # Example
//!
//! ```
//! use racebot_errors::prelude::*;
//!
//! fn check_gain(value: f32) -> Result<f32> {
//!     if !value.is_finite() {
//!         return Err(ValidationError::non_finite("kp").into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_gain(f32::NAN).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod surface;
pub mod validation;

pub use common::{ErrorSeverity, RacebotError};
pub use surface::SurfaceError;
pub use validation::ValidationError;

/// A specialized `Result` type for racebot operations.
pub type Result<T> = std::result::Result<T, RacebotError>;
