//! Conversions between unscaled decimals and arbitrary-precision
//! [`BigDecimal`] values.
//!
//! Rescaling happens exactly on the underlying `BigInt` digits; only the
//! final fit into the 64-bit unscaled range can fail.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use num_traits::{Pow, Signed, ToPrimitive, Zero};

use crate::error::ArithmeticError;
use crate::rounding::{RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;

/// The exact `BigDecimal` equal to `u * 10^-s`.
pub(crate) fn to_big_decimal(sm: ScaleMetrics, u: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(u), sm.scale() as i64)
}

/// `round(value * 10^s)` as an unscaled `i64`, or an overflow error when the
/// result has no 64-bit representation.
pub(crate) fn from_big_decimal(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    value: &BigDecimal,
) -> Result<i64, ArithmeticError> {
    let (digits, exponent) = value.as_bigint_and_exponent();
    if digits.is_zero() {
        return Ok(0);
    }
    let diff = sm.scale() as i64 - exponent;
    if diff >= 0 {
        // 10^19 already exceeds the unscaled range
        if diff > 18 + 19 {
            return Err(overflow(value));
        }
        let shifted = digits * BigInt::from(10u8).pow(diff as u32);
        return shifted.to_i64().ok_or_else(|| overflow(value));
    }
    let away = -diff;
    let digit_count = digits.abs().to_string().len() as i64;
    let sign: i64 = if digits.is_negative() { -1 } else { 1 };
    if digit_count < away {
        // every digit is discarded and the magnitude is below half an ulp
        let increment =
            rounding.calculate_increment(sign, false, TruncatedPart::LessThanHalfButNotZero)?;
        return Ok(increment);
    }
    let divisor = BigInt::from(10u8).pow(away as u32);
    let truncated = &digits / &divisor;
    let remainder = &digits % &divisor;
    let part = match (remainder.abs() * 2u8).cmp(&divisor) {
        _ if remainder.is_zero() => TruncatedPart::Zero,
        core::cmp::Ordering::Less => TruncatedPart::LessThanHalfButNotZero,
        core::cmp::Ordering::Equal => TruncatedPart::EqualToHalf,
        core::cmp::Ordering::Greater => TruncatedPart::GreaterThanHalf,
    };
    let odd = !(&truncated % 2u8).is_zero();
    let increment = rounding.calculate_increment(sign, odd, part)?;
    (truncated + increment).to_i64().ok_or_else(|| overflow(value))
}

fn overflow(value: &BigDecimal) -> ArithmeticError {
    ArithmeticError::Overflow(format!("{} does not fit the unscaled range", value))
}
