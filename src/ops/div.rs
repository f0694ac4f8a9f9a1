//! Decimal division and inversion.
//!
//! The goal is `round((u1 * 10^s) / u2)`. Special cases go first, then a
//! power-of-ten divisor reduces to a scale shift, then a 64-bit fast path
//! for dividends whose scaled product still fits, and finally the split
//! `q = u1 / u2`, `r = u1 - q * u2` with a 128-bit fractional fallback.

use crate::error::ArithmeticError;
use crate::ops::checked;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::{find_by_scale_factor, ScaleMetrics};
use crate::str::format_unscaled;

pub(crate) fn divide(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u1: i64,
    u2: i64,
) -> Result<i64, ArithmeticError> {
    if u2 == 0 {
        return Err(ArithmeticError::DivisionByZero(format!(
            "{} / {}",
            format_unscaled(sm, u1),
            format_unscaled(sm, u2)
        )));
    }
    if u1 == 0 {
        return Ok(0);
    }
    let one = sm.scale_factor();
    if u2 == one {
        return Ok(u1);
    }
    if u1 == u2 {
        return Ok(one);
    }
    if u1 == u2.wrapping_neg() && u2 != i64::MIN {
        return Ok(-one);
    }
    if let Some(pow10) = find_by_scale_factor(u2.unsigned_abs() as i64) {
        return divide_by_power_of_ten(sm, rounding, overflow, u1, u2, pow10);
    }
    if u1 >= sm.min_integer() && u1 <= sm.max_integer() {
        // u1 * 10^s fits in 64 bits
        let scaled = sm.multiply_by_scale_factor(u1);
        let truncated = scaled / u2;
        let remainder = scaled % u2;
        let increment = rounding.calculate_increment(
            sign_of(u1, u2),
            truncated & 1 != 0,
            TruncatedPart::for_remainder(remainder.unsigned_abs(), u2.unsigned_abs()),
        )?;
        return Ok(truncated + increment);
    }
    divide_wide(sm, rounding, overflow, u1, u2)
}

/// `u / l` for a plain long divisor: no scale compensation, just truncation
/// and rounding of the remainder.
pub(crate) fn divide_by_long(
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    l: i64,
) -> Result<i64, ArithmeticError> {
    if l == 0 {
        return Err(ArithmeticError::DivisionByZero(format!("{} / 0", u)));
    }
    if u == i64::MIN && l == -1 {
        return match overflow {
            OverflowMode::Unchecked => Ok(i64::MIN),
            OverflowMode::Checked => checked::divide_long(u, l),
        };
    }
    let truncated = u / l;
    let remainder = u % l;
    let increment = rounding.calculate_increment(
        sign_of(u, l),
        truncated & 1 != 0,
        TruncatedPart::for_remainder(remainder.unsigned_abs(), l.unsigned_abs()),
    )?;
    Ok(truncated + increment)
}

/// `1 / u` at the instance scale: the division algorithm with the dividend
/// fixed to `one`.
pub(crate) fn invert(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
) -> Result<i64, ArithmeticError> {
    divide(sm, rounding, overflow, sm.scale_factor(), u)
}

#[inline]
fn sign_of(u1: i64, u2: i64) -> i64 {
    if (u1 ^ u2) >= 0 {
        1
    } else {
        -1
    }
}

/// Divisor is `±10^k`: the quotient is `±u1 · 10^(s-k)`, a pure scale shift
/// with the sign fixed last.
fn divide_by_power_of_ten(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u1: i64,
    u2: i64,
    pow10: ScaleMetrics,
) -> Result<i64, ArithmeticError> {
    let scale_diff = sm.scale() as i32 - pow10.scale() as i32;
    if scale_diff >= 0 {
        let factor = ScaleMetrics::of_valid(scale_diff as u32);
        let magnitude = match overflow {
            OverflowMode::Unchecked => factor.multiply_by_scale_factor(u1),
            OverflowMode::Checked => {
                factor.checked_multiply_by_scale_factor(u1).ok_or_else(|| {
                    ArithmeticError::Overflow(format!(
                        "{} / {}",
                        format_unscaled(sm, u1),
                        format_unscaled(sm, u2)
                    ))
                })?
            }
        };
        if u2 > 0 {
            return Ok(magnitude);
        }
        return match overflow {
            OverflowMode::Unchecked => Ok(magnitude.wrapping_neg()),
            OverflowMode::Checked => magnitude.checked_neg().ok_or_else(|| {
                ArithmeticError::Overflow(format!(
                    "{} / {}",
                    format_unscaled(sm, u1),
                    format_unscaled(sm, u2)
                ))
            }),
        };
    }
    // Dividing away more digits than the scale provides.
    let factor = ScaleMetrics::of_valid((-scale_diff) as u32);
    let f = factor.scale_factor();
    let truncated = u1 / f;
    let remainder = u1 % f;
    let signed_truncated = if u2 > 0 { truncated } else { -truncated };
    let increment = rounding.calculate_increment(
        sign_of(u1, u2),
        signed_truncated & 1 != 0,
        TruncatedPart::for_remainder(remainder.unsigned_abs(), f as u64),
    )?;
    Ok(signed_truncated + increment)
}

/// The dividend's scaled product exceeds 64 bits: split off the integral
/// quotient and compute the fractional part from the remainder, widening to
/// 128 bits only when the remainder itself is too large.
fn divide_wide(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u1: i64,
    u2: i64,
) -> Result<i64, ArithmeticError> {
    let one = sm.scale_factor();
    let integral = u1 / u2;
    let remainder = u1 - integral.wrapping_mul(u2);
    let (fractional, frem) = if remainder >= sm.min_integer() && remainder <= sm.max_integer() {
        let scaled = sm.multiply_by_scale_factor(remainder);
        (scaled / u2, (scaled % u2) as i128)
    } else {
        let scaled = sm.wide_scale(remainder);
        ((scaled / u2 as i128) as i64, scaled % u2 as i128)
    };
    let increment = {
        let truncated_wide = integral as i128 * one as i128 + fractional as i128;
        rounding.calculate_increment(
            sign_of(u1, u2),
            truncated_wide & 1 != 0,
            TruncatedPart::for_remainder_wide(frem.unsigned_abs(), u2.unsigned_abs() as u128),
        )?
    };
    match overflow {
        OverflowMode::Unchecked => Ok(integral
            .wrapping_mul(one)
            .wrapping_add(fractional)
            .wrapping_add(increment)),
        OverflowMode::Checked => {
            let result = integral as i128 * one as i128 + fractional as i128 + increment as i128;
            if result < i64::MIN as i128 || result > i64::MAX as i128 {
                Err(ArithmeticError::Overflow(format!(
                    "{} / {}",
                    format_unscaled(sm, u1),
                    format_unscaled(sm, u2)
                )))
            } else {
                Ok(result as i64)
            }
        }
    }
}
