//! Surface flag and surface store errors.
//!
//! An unrecognized surface flag is not fatal for the driver: it simply keeps
//! waiting for a recognized one. These errors exist so the parsing and store
//! boundaries can report what happened.

use crate::common::ErrorSeverity;

/// Errors raised at the surface flag and surface store boundaries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The simulator handed over a flag that is neither ROAD nor DIRT
    #[error("Unrecognized surface flag '{0}'")]
    Unrecognized(String),

    /// The store collaborator could not read the last known surface
    #[error("Surface store read failed: {0}")]
    LoadFailed(String),

    /// The store collaborator could not persist the surface
    #[error("Surface store write failed: {0}")]
    StoreFailed(String),
}

impl SurfaceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SurfaceError::Unrecognized(_) => ErrorSeverity::Info,
            SurfaceError::LoadFailed(_) | SurfaceError::StoreFailed(_) => ErrorSeverity::Warning,
        }
    }

    /// Create an unrecognized flag error.
    pub fn unrecognized(flag: impl Into<String>) -> Self {
        SurfaceError::Unrecognized(flag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_is_informational() {
        let err = SurfaceError::unrecognized("SNOW");
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert!(err.to_string().contains("SNOW"));
    }

    #[test]
    fn test_store_failures_are_warnings() {
        assert_eq!(
            SurfaceError::StoreFailed("disk full".into()).severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            SurfaceError::LoadFailed("missing".into()).severity(),
            ErrorSeverity::Warning
        );
    }
}
