//! Decimal multiplication and squaring.
//!
//! The goal is `round((u1 * u2) / 10^s)`. Special cases go first; the general
//! path takes the exact 128-bit product and truncates it by the scale factor,
//! classifying the remainder for rounding. Unchecked results keep the low 64
//! bits of the rounded quotient, so overflow wraps exactly like native `i64`
//! multiplication.

use crate::error::ArithmeticError;
use crate::ops::checked;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;
use crate::str::format_unscaled;

pub(crate) fn multiply(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u1: i64,
    u2: i64,
) -> Result<i64, ArithmeticError> {
    if u1 == 0 || u2 == 0 {
        return Ok(0);
    }
    let one = sm.scale_factor();
    if u2 == one {
        return Ok(u1);
    }
    if u1 == one {
        return Ok(u2);
    }
    if u2 == one.wrapping_neg() && one != 1 {
        return negate(overflow, sm, u1);
    }
    if u1 == one.wrapping_neg() && one != 1 {
        return negate(overflow, sm, u2);
    }
    multiply_exact(sm, rounding, overflow, u1, u2)
}

/// `square(u) = multiply(u, u)` bit-exactly; routed through the same core.
pub(crate) fn square(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
) -> Result<i64, ArithmeticError> {
    multiply(sm, rounding, overflow, u, u)
}

fn negate(
    overflow: OverflowMode,
    sm: ScaleMetrics,
    u: i64,
) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(u.wrapping_neg()),
        OverflowMode::Checked => u.checked_neg().ok_or_else(|| {
            ArithmeticError::Overflow(format!("-({})", format_unscaled(sm, u)))
        }),
    }
}

fn multiply_exact(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u1: i64,
    u2: i64,
) -> Result<i64, ArithmeticError> {
    let one = sm.scale_factor() as i128;
    let product = u1 as i128 * u2 as i128;
    let truncated = product / one;
    let remainder = product % one;
    let sign: i64 = if (u1 ^ u2) >= 0 { 1 } else { -1 };
    let increment = rounding.calculate_increment(
        sign,
        truncated & 1 != 0,
        TruncatedPart::for_remainder_wide(remainder.unsigned_abs(), one as u128),
    )?;
    let result = truncated + increment as i128;
    match overflow {
        OverflowMode::Unchecked => Ok(result as i64),
        OverflowMode::Checked => {
            if result < i64::MIN as i128 || result > i64::MAX as i128 {
                Err(ArithmeticError::Overflow(format!(
                    "{} * {}",
                    format_unscaled(sm, u1),
                    format_unscaled(sm, u2)
                )))
            } else {
                Ok(result as i64)
            }
        }
    }
}

/// `u * l` for a plain long factor: the scale of the result is the scale of
/// `u`, so this is ordinary long multiplication.
pub(crate) fn multiply_by_long(
    overflow: OverflowMode,
    u: i64,
    l: i64,
) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(u.wrapping_mul(l)),
        OverflowMode::Checked => checked::multiply_long(u, l),
    }
}
