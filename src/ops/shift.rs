//! Power-of-two scaling: `u * 2^n` and `u / 2^n` with rounding.

use crate::error::ArithmeticError;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};

/// `u << n`. Negative counts delegate to [`shift_right`]. Counts of 64 and
/// above shift every bit out: zero when unchecked, overflow when checked
/// (unless the value is zero).
pub(crate) fn shift_left(
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if n < 0 {
        // i32::MIN negation stays in range as a u32 count
        return shift_right_unsigned(rounding, u, n.unsigned_abs());
    }
    if u == 0 || n == 0 {
        return Ok(u);
    }
    let n = n as u32;
    if n >= 64 {
        return match overflow {
            OverflowMode::Unchecked => Ok(0),
            OverflowMode::Checked => Err(ArithmeticError::Overflow(format!("{} << {}", u, n))),
        };
    }
    let shifted = u.wrapping_shl(n);
    match overflow {
        OverflowMode::Unchecked => Ok(shifted),
        OverflowMode::Checked => {
            if shifted >> n == u {
                Ok(shifted)
            } else {
                Err(ArithmeticError::Overflow(format!("{} << {}", u, n)))
            }
        }
    }
}

/// `u >> n` rounded per `rounding` over the shifted-out bits. Negative counts
/// delegate to [`shift_left`].
pub(crate) fn shift_right(
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if n < 0 {
        if n == i32::MIN {
            // the mirrored count does not fit an i32; the magnitude is
            // far beyond 64 either way
            return shift_left(rounding, overflow, u, i32::MAX);
        }
        return shift_left(rounding, overflow, u, -n);
    }
    shift_right_unsigned(rounding, u, n as u32)
}

fn shift_right_unsigned(
    rounding: RoundingMode,
    u: i64,
    n: u32,
) -> Result<i64, ArithmeticError> {
    if u == 0 || n == 0 {
        return Ok(u);
    }
    let magnitude = u.unsigned_abs() as u128;
    let sign: i64 = if u < 0 { -1 } else { 1 };
    let (truncated, part) = if n >= 64 {
        // everything is discarded; |u| <= 2^63 = half of 2^64
        let part = if n == 64 {
            TruncatedPart::for_shift(magnitude, 64)
        } else {
            TruncatedPart::LessThanHalfButNotZero
        };
        (0u64, part)
    } else {
        let truncated = (magnitude >> n) as u64;
        let remainder = magnitude - ((truncated as u128) << n);
        (truncated, TruncatedPart::for_shift(remainder, n))
    };
    let increment = rounding.calculate_increment(sign, truncated & 1 != 0, part)?;
    Ok(sign * truncated as i64 + increment)
}
