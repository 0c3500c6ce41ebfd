//! Custom assertion macros for testing.

/// Assert that two floating-point values are approximately equal.
///
/// # Example
///
/// ```rust
/// use racebot_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0_f32, 1.0001_f32, 0.001_f32);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that a value lies within a range.
///
/// # Example
///
/// ```rust
/// use racebot_test_helpers::assert_in_range;
///
/// assert_in_range!(0.3_f32, 0.0..=1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $range:expr $(,)?) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!("assertion failed: value {:?} is not in range {:?}", value, range);
        }
    };
    ($value:expr, $range:expr, $($arg:tt)+) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!("assertion failed: value {:?} is not in range {:?}: {}", value, range, format_args!($($arg)+));
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_pass() {
        assert_approx_eq!(0.3_f32, 0.30001_f32, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed: `(left ≈ right)`")]
    fn test_assert_approx_eq_fail() {
        assert_approx_eq!(1.0_f32, 1.1_f32, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed: `(left ≈ right)`")]
    fn test_assert_approx_eq_nan_fails() {
        assert_approx_eq!(f32::NAN, 0.0_f32, 0.001);
    }

    #[test]
    fn test_assert_in_range_pass() {
        assert_in_range!(-1_i8, -1..=6);
    }

    #[test]
    #[should_panic(expected = "is not in range")]
    fn test_assert_in_range_fail() {
        assert_in_range!(1.5_f32, 0.0..=1.0);
    }
}
