//! Conversions between `f64` and unscaled decimals.
//!
//! Both directions work on the exact binary representation: the double's
//! mantissa and the scale factor meet in a 128-bit intermediate, and the bits
//! that fall off the end are classified exactly for rounding. Text never
//! enters the picture, which is what makes inputs like
//! `0.99999999999999994` (the largest double below one) come out right.

use crate::error::ArithmeticError;
use crate::rounding::{RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;

const MANTISSA_BITS: u32 = 52;
const MANTISSA_MASK: u64 = (1u64 << MANTISSA_BITS) - 1;
const EXPONENT_MASK: u64 = 0x7FF;
const EXPONENT_BIAS: i32 = 1023;

/// `round(value * 10^s)` for a finite double. NaN, infinities and magnitudes
/// beyond the unscaled range are rejected as illegal arguments.
pub(crate) fn from_f64(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    value: f64,
) -> Result<i64, ArithmeticError> {
    if !value.is_finite() {
        return Err(ArithmeticError::IllegalArgument(format!(
            "cannot convert double to decimal: {}",
            value
        )));
    }
    let bits = value.to_bits();
    let negative = bits >> 63 != 0;
    let biased_exp = ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32;
    let raw_mantissa = bits & MANTISSA_MASK;
    if biased_exp == 0 && raw_mantissa == 0 {
        return Ok(0);
    }
    // subnormals have no implicit bit and a fixed exponent
    let (mantissa, exp2) = if biased_exp == 0 {
        (raw_mantissa, 1 - EXPONENT_BIAS - MANTISSA_BITS as i32)
    } else {
        (
            raw_mantissa | (1u64 << MANTISSA_BITS),
            biased_exp - EXPONENT_BIAS - MANTISSA_BITS as i32,
        )
    };
    let sign: i64 = if negative { -1 } else { 1 };
    let scaled = sm.wide_scale_unsigned(mantissa);
    let (magnitude, part) = if exp2 >= 0 {
        if exp2 >= 64 || scaled.leading_zeros() < exp2 as u32 {
            return Err(out_of_range(value));
        }
        (scaled << exp2, TruncatedPart::Zero)
    } else {
        let shift = (-exp2) as u32;
        if shift >= 128 {
            (0, TruncatedPart::LessThanHalfButNotZero)
        } else {
            let truncated = scaled >> shift;
            let remainder = scaled - (truncated << shift);
            (truncated, TruncatedPart::for_shift(remainder, shift))
        }
    };
    let increment = rounding.calculate_increment(sign, magnitude & 1 != 0, part)?;
    let signed = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    } + increment as i128;
    if signed < i64::MIN as i128 || signed > i64::MAX as i128 {
        return Err(out_of_range(value));
    }
    Ok(signed as i64)
}

fn out_of_range(value: f64) -> ArithmeticError {
    ArithmeticError::IllegalArgument(format!(
        "double exceeds the representable decimal range: {}",
        value
    ))
}

/// The double nearest to `u * 10^-s` under the given rounding mode.
///
/// The mantissa is carved out of the exact quotient `(|u| << k) / 10^s` with
/// enough headroom bits, rounded in the requested direction using the exact
/// guard/sticky classification, and scaled by an exact power of two.
pub(crate) fn to_f64(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    u: i64,
) -> Result<f64, ArithmeticError> {
    if u == 0 {
        return Ok(0.0);
    }
    let negative = u < 0;
    let sign: i64 = if negative { -1 } else { 1 };
    let magnitude = u.unsigned_abs() as u128;
    let divisor = sm.scale_factor() as u64;

    let value_bits = 128 - magnitude.leading_zeros() as i32;
    let divisor_bits = (64 - divisor.leading_zeros()) as i32;
    // aim for a 55-bit quotient so there is always an excess to round away
    let k = (55 + divisor_bits - value_bits).max(0) as u32;
    let mut quotient = (magnitude << k) / divisor as u128;
    let sticky = (magnitude << k) % divisor as u128;

    let quotient_bits = 128 - quotient.leading_zeros() as i32;
    let excess = quotient_bits - 53;
    let mut exponent = excess.max(0) - k as i32;
    let part = if excess > 0 {
        let dropped = quotient & ((1u128 << excess) - 1);
        quotient >>= excess;
        match TruncatedPart::for_shift(dropped, excess as u32) {
            TruncatedPart::Zero if sticky != 0 => TruncatedPart::LessThanHalfButNotZero,
            TruncatedPart::EqualToHalf if sticky != 0 => TruncatedPart::GreaterThanHalf,
            other => other,
        }
    } else if sticky != 0 {
        TruncatedPart::for_remainder_wide(sticky, divisor as u128)
    } else {
        TruncatedPart::Zero
    };
    let increment = rounding.calculate_increment(sign, quotient & 1 != 0, part)?;
    if increment != 0 {
        quotient += 1;
        if quotient == 1u128 << 53 {
            quotient >>= 1;
            exponent += 1;
        }
    }
    // quotient < 2^53 is exact in f64; the exponent range here is far inside
    // the normal range, so the power of two is exact as well
    let result = quotient as f64 * pow2(exponent);
    Ok(if negative { -result } else { result })
}

/// An exact power of two in `[2^-200, 2^200]`.
fn pow2(exponent: i32) -> f64 {
    f64::from_bits(((EXPONENT_BIAS + exponent) as u64) << MANTISSA_BITS)
}
