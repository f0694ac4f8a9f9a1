//! Conversions between plain longs, unscaled values at foreign scales, and
//! the instance scale.

use crate::error::ArithmeticError;
use crate::ops::pow10;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;

/// `l * 10^s`: the unscaled representation of the integer `l`.
pub(crate) fn from_long(
    sm: ScaleMetrics,
    overflow: OverflowMode,
    l: i64,
) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(sm.multiply_by_scale_factor(l)),
        OverflowMode::Checked => sm
            .checked_multiply_by_scale_factor(l)
            .ok_or_else(|| ArithmeticError::Overflow(format!("{} * 10^{}", l, sm.scale()))),
    }
}

/// The integer part of `u`, rounded per `rounding`.
pub(crate) fn to_long(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    u: i64,
) -> Result<i64, ArithmeticError> {
    let one = sm.scale_factor();
    let truncated = sm.divide_by_scale_factor(u);
    let remainder = sm.modulo_by_scale_factor(u);
    let increment = rounding.calculate_increment(
        u.signum(),
        truncated & 1 != 0,
        TruncatedPart::for_remainder(remainder.unsigned_abs(), one as u64),
    )?;
    Ok(truncated + increment)
}

/// Re-interprets `v`, an unscaled value at `src_scale`, at the instance
/// scale.
pub(crate) fn from_unscaled(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    v: i64,
    src_scale: i32,
) -> Result<i64, ArithmeticError> {
    pow10::rescale(rounding, overflow, v, src_scale, sm.scale() as i32)
}

/// The unscaled image of `u` at `dst_scale`.
pub(crate) fn to_unscaled(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    dst_scale: i32,
) -> Result<i64, ArithmeticError> {
    pow10::rescale(rounding, overflow, u, sm.scale() as i32, dst_scale)
}
