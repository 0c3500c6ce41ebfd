//! Input validation error types.
//!
//! Raised when a configuration document or a parameter set fails its range,
//! finiteness or ordering checks.

use core::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is NaN or infinite
    #[error("Field '{field}' must be a finite number")]
    NonFinite {
        /// Field name
        field: String,
    },

    /// Constraint violation between several fields
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Create a non-finite value error.
    pub fn non_finite(field: impl Into<String>) -> Self {
        ValidationError::NonFinite {
            field: field.into(),
        }
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::ConstraintViolation(msg.into())
    }
}

/// Check that `value` is finite and within `[min, max]`.
///
/// # Errors
///
/// Returns [`ValidationError::NonFinite`] for NaN or infinite values and
/// [`ValidationError::OutOfRange`] when the value falls outside the bounds.
pub fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::non_finite(field));
    }
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(())
}

/// Check that `value` is finite.
///
/// # Errors
///
/// Returns [`ValidationError::NonFinite`] for NaN or infinite values.
pub fn check_finite(field: &str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::non_finite(field))
    }
}
