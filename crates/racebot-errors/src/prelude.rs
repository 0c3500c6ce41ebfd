//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use racebot_errors::prelude::*;
//!
//! fn load(dt: f32) -> Result<()> {
//!     check_range("pid.dt", dt, 0.001, 1.0)?;
//!     Ok(())
//! }
//!
//! assert!(matches!(load(0.0), Err(RacebotError::Validation(_))));
//! ```

pub use crate::{
    Result,
    common::{ErrorSeverity, RacebotError},
    surface::SurfaceError,
    validation::{ValidationError, check_finite, check_range},
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_result_alias() {
        fn fails() -> Result<()> {
            Err(SurfaceError::unrecognized("MUD").into())
        }
        assert!(matches!(fails(), Err(RacebotError::Surface(_))));
    }
}
