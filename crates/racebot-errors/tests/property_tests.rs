//! Property-based tests for the validation helpers and error conversions.

use proptest::prelude::*;
use racebot_errors::{
    common::{ErrorSeverity, RacebotError},
    surface::SurfaceError,
    validation::{ValidationError, check_range},
};

fn severity_from(n: u8) -> ErrorSeverity {
    match n {
        0 => ErrorSeverity::Info,
        1 => ErrorSeverity::Warning,
        _ => ErrorSeverity::Error,
    }
}

proptest! {
    #[test]
    fn test_error_severity_ordering(a in 0u8..=2, b in 0u8..=2) {
        prop_assert_eq!(a.cmp(&b), severity_from(a).cmp(&severity_from(b)));
    }

    #[test]
    fn test_check_range_accepts_inside(min in -100.0f32..0.0, span in 0.0f32..100.0, t in 0.0f32..=1.0) {
        let max = min + span;
        let value = (min + span * t).clamp(min, max);
        prop_assert!(check_range("x", value, min, max).is_ok());
    }

    #[test]
    fn test_check_range_rejects_above(min in -100.0f32..0.0, span in 0.0f32..100.0, excess in 0.5f32..50.0) {
        let max = min + span;
        let result = check_range("x", max + excess, min, max);
        prop_assert!(
            matches!(result, Err(ValidationError::OutOfRange { .. })),
            "expected OutOfRange"
        );
    }

    #[test]
    fn test_check_range_names_the_field(field in "[a-z_.]{1,24}") {
        let result = check_range(&field, f32::NAN, 0.0, 1.0);
        prop_assert!(matches!(&result, Err(e) if e.to_string().contains(&field)));
    }

    #[test]
    fn test_unrecognized_flags_stay_informational(flag in ".*") {
        let err = SurfaceError::unrecognized(flag.clone());
        prop_assert_eq!(err.severity(), ErrorSeverity::Info);
        let wrapped: RacebotError = err.into();
        prop_assert!(wrapped.to_string().contains(&flag));
    }
}
