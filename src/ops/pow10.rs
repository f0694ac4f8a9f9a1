//! Multiplication and division by powers of ten with rounding and overflow
//! control. Also the backing for the cross-scale rescaling conversions.

use crate::error::ArithmeticError;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::{ScaleMetrics, MAX_SCALE};

/// `u * 10^n`. A negative `n` divides. Beyond `10^18` the factor is applied
/// in scale-18 chunks: UNCHECKED wraps (and reaches zero once the factor is a
/// multiple of 2^64), CHECKED fails for any non-zero value.
pub(crate) fn multiply_by_power_of_10(
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if u == 0 || n == 0 {
        return Ok(u);
    }
    if n < 0 {
        return divide_by_power_of_10_impl(rounding, u, n.unsigned_abs());
    }
    let n = n as u32;
    if n <= MAX_SCALE {
        let factor = ScaleMetrics::of_valid(n);
        return match overflow {
            OverflowMode::Unchecked => Ok(factor.multiply_by_scale_factor(u)),
            OverflowMode::Checked => {
                factor.checked_multiply_by_scale_factor(u).ok_or_else(|| {
                    ArithmeticError::Overflow(format!("{} * 10^{}", u, n))
                })
            }
        };
    }
    match overflow {
        OverflowMode::Checked => Err(ArithmeticError::Overflow(format!("{} * 10^{}", u, n))),
        OverflowMode::Unchecked => {
            let chunk = ScaleMetrics::of_valid(MAX_SCALE).scale_factor();
            let mut result = u;
            let mut remaining = n;
            while remaining > MAX_SCALE && result != 0 {
                result = result.wrapping_mul(chunk);
                remaining -= MAX_SCALE;
            }
            Ok(ScaleMetrics::of_valid(remaining.min(MAX_SCALE)).multiply_by_scale_factor(result))
        }
    }
}

/// `u / 10^n` with rounding. A negative `n` multiplies.
pub(crate) fn divide_by_power_of_10(
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if u == 0 || n == 0 {
        return Ok(u);
    }
    if n < 0 {
        if n == i32::MIN {
            // the mirrored count has no i32 form; the factor dwarfs 2^64
            return match overflow {
                OverflowMode::Unchecked => Ok(0),
                OverflowMode::Checked => {
                    Err(ArithmeticError::Overflow(format!("{} * 10^{}", u, n.unsigned_abs())))
                }
            };
        }
        return multiply_by_power_of_10(rounding, overflow, u, -n);
    }
    divide_by_power_of_10_impl(rounding, u, n as u32)
}

fn divide_by_power_of_10_impl(
    rounding: RoundingMode,
    u: i64,
    n: u32,
) -> Result<i64, ArithmeticError> {
    if n <= MAX_SCALE {
        let factor = ScaleMetrics::of_valid(n);
        let f = factor.scale_factor();
        let truncated = u / f;
        let remainder = u % f;
        let increment = rounding.calculate_increment(
            u.signum(),
            truncated & 1 != 0,
            TruncatedPart::for_remainder(remainder.unsigned_abs(), f as u64),
        )?;
        return Ok(truncated + increment);
    }
    // The whole value is discarded. At n = 19 the half point 5*10^18 is still
    // reachable; beyond that everything is strictly below half.
    let part = if n == 19 {
        TruncatedPart::for_remainder_wide(u.unsigned_abs() as u128, 10_000_000_000_000_000_000u128)
    } else {
        TruncatedPart::LessThanHalfButNotZero
    };
    let increment = rounding.calculate_increment(u.signum(), false, part)?;
    Ok(increment)
}

/// Rescales `v` from `src_scale` to `dst_scale`: multiply or divide by
/// `10^|dst - src|`. Foreign scales are arbitrary `i32`s, only the scale
/// *difference* needs to be applied.
pub(crate) fn rescale(
    rounding: RoundingMode,
    overflow: OverflowMode,
    v: i64,
    src_scale: i32,
    dst_scale: i32,
) -> Result<i64, ArithmeticError> {
    let diff = dst_scale as i64 - src_scale as i64;
    if diff == 0 || v == 0 {
        return Ok(v);
    }
    // A difference beyond ±64 behaves like its clamp: the chunked product is
    // zero already and the division has long discarded everything.
    let clamped = diff.clamp(-(i32::MAX as i64), i32::MAX as i64) as i32;
    multiply_by_power_of_10(rounding, overflow, v, clamped)
}
