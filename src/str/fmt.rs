//! Canonical decimal rendering: optional sign, integer digits, and exactly
//! `s` fraction digits (no decimal point at scale 0).

use arrayvec::ArrayString;
use core::fmt::{self, Write};

use crate::scale::ScaleMetrics;

// sign + 19 integer digits + point + 18 fraction digits fits comfortably
pub(crate) const MAX_STR_BUFFER_SIZE: usize = 40;

/// Writes the canonical form of `u` into any `fmt::Write` sink.
pub(crate) fn write_unscaled<W: Write>(w: &mut W, sm: ScaleMetrics, u: i64) -> fmt::Result {
    if u < 0 {
        w.write_char('-')?;
    }
    let magnitude = u.unsigned_abs();
    let scale = sm.scale();
    if scale == 0 {
        return write!(w, "{}", magnitude);
    }
    let one = sm.scale_factor() as u64;
    write!(
        w,
        "{}.{:0width$}",
        magnitude / one,
        magnitude % one,
        width = scale as usize
    )
}

/// Allocation-free rendering into a stack buffer.
pub(crate) fn to_str_internal(sm: ScaleMetrics, u: i64) -> ArrayString<MAX_STR_BUFFER_SIZE> {
    let mut buffer = ArrayString::new();
    // the buffer provably fits the longest rendering
    write_unscaled(&mut buffer, sm, u).expect("decimal rendering exceeded its buffer");
    buffer
}

/// The canonical string, for error messages and `to_string`.
pub(crate) fn format_unscaled(sm: ScaleMetrics, u: i64) -> String {
    to_str_internal(sm, u).as_str().to_string()
}
