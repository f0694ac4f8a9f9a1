//! Addition, subtraction and the rounded average.

use crate::error::ArithmeticError;
use crate::ops::checked;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};

#[inline]
pub(crate) fn add(overflow: OverflowMode, a: i64, b: i64) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(a.wrapping_add(b)),
        OverflowMode::Checked => checked::add_long(a, b),
    }
}

#[inline]
pub(crate) fn subtract(overflow: OverflowMode, a: i64, b: i64) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(a.wrapping_sub(b)),
        OverflowMode::Checked => checked::subtract_long(a, b),
    }
}

/// The average `(a + b) / 2` computed without intermediate overflow.
///
/// `(a & b) + ((a ^ b) >> 1)` is the floor average; when the low bits differ
/// the exact average carries exactly half an ulp, classified as
/// `EqualToHalf` and rounded per `rounding`. The result always fits.
pub(crate) fn average(rounding: RoundingMode, a: i64, b: i64) -> Result<i64, ArithmeticError> {
    let floor = (a & b) + ((a ^ b) >> 1);
    if (a ^ b) & 1 == 0 {
        return Ok(floor);
    }
    // Exact average is floor + 1/2; truncation toward zero and the sign of
    // the exact value depend on which side of zero we are on.
    let (truncated, sign) = if floor >= 0 { (floor, 1) } else { (floor + 1, -1) };
    let increment =
        rounding.calculate_increment(sign, truncated & 1 != 0, TruncatedPart::EqualToHalf)?;
    Ok(truncated + increment)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rounding::RoundingMode::*;

    #[test]
    fn unchecked_add_wraps() {
        assert_eq!(add(OverflowMode::Unchecked, i64::MAX, 1).unwrap(), i64::MIN);
        assert!(add(OverflowMode::Checked, i64::MAX, 1).is_err());
        assert_eq!(add(OverflowMode::Checked, 2, 3).unwrap(), 5);
    }

    #[test]
    fn unchecked_subtract_wraps() {
        assert_eq!(
            subtract(OverflowMode::Unchecked, i64::MIN, 1).unwrap(),
            i64::MAX
        );
        assert!(subtract(OverflowMode::Checked, i64::MIN, 1).is_err());
    }

    #[test]
    fn average_is_exact_when_parity_matches() {
        assert_eq!(average(Unnecessary, 2, 4).unwrap(), 3);
        assert_eq!(average(Unnecessary, -2, -4).unwrap(), -3);
        assert_eq!(average(Unnecessary, -3, 3).unwrap(), 0);
        assert_eq!(average(Unnecessary, i64::MAX, i64::MAX).unwrap(), i64::MAX);
        assert_eq!(average(Unnecessary, i64::MIN, i64::MIN).unwrap(), i64::MIN);
    }

    #[test]
    fn average_rounds_the_half_bit() {
        // (1 + 2) / 2 = 1.5
        assert_eq!(average(Down, 1, 2).unwrap(), 1);
        assert_eq!(average(Up, 1, 2).unwrap(), 2);
        assert_eq!(average(HalfUp, 1, 2).unwrap(), 2);
        assert_eq!(average(HalfDown, 1, 2).unwrap(), 1);
        assert_eq!(average(HalfEven, 1, 2).unwrap(), 2);
        assert_eq!(average(HalfEven, 3, 4).unwrap(), 4);
        assert_eq!(average(HalfEven, 4, 5).unwrap(), 4);
        // (-1 + -2) / 2 = -1.5
        assert_eq!(average(Down, -1, -2).unwrap(), -1);
        assert_eq!(average(Up, -1, -2).unwrap(), -2);
        assert_eq!(average(Ceiling, -1, -2).unwrap(), -1);
        assert_eq!(average(Floor, -1, -2).unwrap(), -2);
        assert!(average(Unnecessary, 1, 2).is_err());
    }

    #[test]
    fn average_never_overflows() {
        assert_eq!(
            average(HalfUp, i64::MAX, i64::MAX - 1).unwrap(),
            i64::MAX
        );
        assert_eq!(average(Down, i64::MAX, i64::MAX - 1).unwrap(), i64::MAX - 1);
        assert_eq!(average(Floor, i64::MIN, i64::MIN + 1).unwrap(), i64::MIN);
        assert_eq!(average(Down, i64::MIN, i64::MIN + 1).unwrap(), i64::MIN + 1);
        assert_eq!(average(Down, i64::MIN, i64::MAX).unwrap(), 0);
    }
}
