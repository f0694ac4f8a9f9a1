//! Precision reduction: rounding an unscaled value to fewer decimal places
//! while keeping its scale.

use crate::error::ArithmeticError;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;
use crate::str::format_unscaled;

/// Rounds `u` to `precision` decimal places at the instance scale. The result
/// is still an unscaled value at scale `s`; digits below the precision are
/// zeroed. `precision >= s` leaves the value untouched; a precision below
/// `s - 18` has no representable rounding unit and is rejected.
pub(crate) fn round(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    precision: i32,
) -> Result<i64, ArithmeticError> {
    let scale = sm.scale() as i32;
    if precision >= scale {
        return Ok(u);
    }
    if precision < scale - 18 {
        return Err(ArithmeticError::IllegalArgument(format!(
            "precision must be in [{}, {}] but was: {}",
            scale - 18,
            scale,
            precision
        )));
    }
    let factor = ScaleMetrics::of_valid((scale - precision) as u32);
    let f = factor.scale_factor();
    let truncated = u / f;
    let remainder = u % f;
    let increment = rounding.calculate_increment(
        u.signum(),
        truncated & 1 != 0,
        TruncatedPart::for_remainder(remainder.unsigned_abs(), f as u64),
    )?;
    let rounded = truncated + increment;
    match overflow {
        OverflowMode::Unchecked => Ok(rounded.wrapping_mul(f)),
        OverflowMode::Checked => rounded.checked_mul(f).ok_or_else(|| {
            ArithmeticError::Overflow(format!(
                "round({}, {})",
                format_unscaled(sm, u),
                precision
            ))
        }),
    }
}
