//! Top-level error type and severity levels shared by the racebot crates.

use core::fmt;

use crate::{SurfaceError, ValidationError};

/// Top-level error type wrapping the racebot sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum RacebotError {
    /// A configuration value failed its checks
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Surface flag and surface store errors
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// A configuration document could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RacebotError {
    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        RacebotError::Config(msg.into())
    }
}

impl From<std::io::Error> for RacebotError {
    fn from(e: std::io::Error) -> Self {
        RacebotError::Io(e)
    }
}

/// How loudly an error should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Expected during normal operation
    Info = 0,
    /// Degraded, the run continues
    Warning = 1,
    /// Operation failed
    Error = 2,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}
