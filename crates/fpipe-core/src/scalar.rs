//! Small integer helpers and the two assertion primitives.

use crate::error::{FpError, Result};
use std::fmt::Debug;

/// Absolute value; `i64::MIN` saturates to `i64::MAX`.
#[must_use]
pub const fn abs(x: i64) -> i64 {
    x.saturating_abs()
}

/// Integer division truncating toward zero (`-7 / 2 == -3`).
///
/// # Panics
/// If `b == 0`, or on `i64::MIN / -1`, whose quotient does not fit.
#[must_use]
pub const fn trunc_div(a: i64, b: i64) -> i64 {
    a / b
}

/// Euclid-style remainder: the result always has the sign of `b`.
///
/// `rem(-1, 100) == 99`, `rem(250, 100) == 50`, `rem(5, -3) == -1`.
///
/// # Panics
/// If `b == 0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn rem(a: i64, b: i64) -> i64 {
    let (a, b) = (a as i128, b as i128);
    // |result| < |b| <= i64::MAX + 1 and the sign matches b, so it fits.
    (((a % b) + b) % b) as i64
}

/// Number of decimal digits in `x` (no sign).
#[must_use]
pub fn digit_count(x: u64) -> usize {
    x.to_string().len()
}

/// `10^digit_count(x)`, i.e. the shift that appends `x` after another number.
///
/// `None` when the power does not fit a `u64` (any `x` with 20 digits).
#[must_use]
pub fn decimal_shift(x: u64) -> Option<u64> {
    let digits = u32::try_from(digit_count(x)).ok()?;
    10u64.checked_pow(digits)
}

/// Fail with [`FpError::NotEqual`] unless `actual == expected`.
///
/// # Errors
/// When the two values differ.
pub fn assert_equal<T: PartialEq + Debug>(actual: T, expected: T) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(FpError::NotEqual {
            actual: format!("{actual:?}"),
            expected: format!("{expected:?}"),
        })
    }
}

/// Fail with [`FpError::Assertion`] unless `cond` holds.
///
/// # Errors
/// When `cond` is `false`.
pub const fn assert_true(cond: bool) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(FpError::Assertion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rem_takes_sign_of_divisor() {
        assert_eq!(rem(-1, 100), 99);
        assert_eq!(rem(250, 100), 50);
        assert_eq!(rem(-200, 100), 0);
        assert_eq!(rem(5, -3), -1);
        assert_eq!(rem(i64::MIN, i64::MAX), i64::MAX - 1);
    }

    #[test]
    fn trunc_div_rounds_toward_zero() {
        assert_eq!(trunc_div(7, 2), 3);
        assert_eq!(trunc_div(-7, 2), -3);
        assert_eq!(trunc_div(-199, 100), -1);
    }

    #[test]
    fn digits() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u64::MAX), 20);
        assert_eq!(decimal_shift(42), Some(100));
        assert_eq!(decimal_shift(0), Some(10));
        assert_eq!(abs(-5), 5);
        assert_eq!(abs(i64::MIN), i64::MAX);
    }

    #[test]
    fn decimal_shift_reports_overflow() {
        assert_eq!(decimal_shift(10_000_000_000_000_000_000), None);
        assert_eq!(decimal_shift(u64::MAX), None);
        assert_eq!(
            decimal_shift(9_999_999_999_999_999_999),
            Some(10_000_000_000_000_000_000)
        );
    }

    #[test]
    #[should_panic]
    fn trunc_div_min_by_minus_one_overflows() {
        let _ = trunc_div(std::hint::black_box(i64::MIN), std::hint::black_box(-1));
    }

    #[test]
    fn assertions() {
        assert!(assert_equal(3, 3).is_ok());
        let err = assert_equal(3, 4).unwrap_err();
        assert_eq!(err.to_string(), "AssertionError: 3 !== 4");
        assert!(assert_true(true).is_ok());
        assert!(matches!(assert_true(false), Err(FpError::Assertion)));
    }
}
