use crate::error::ArithmeticError;

/// The largest supported scale. `10^18 < 2^63 < 10^19`, so 18 is the last
/// scale whose `one` is representable as a positive `i64`.
pub const MAX_SCALE: u32 = 18;

/// Metrics for one decimal scale: the scale factor `10^s` and the integer
/// bounds that still fit an `i64` after multiplication by the factor.
///
/// A `ScaleMetrics` is plain `Copy` data; all instances live in the
/// compile-time [`SCALES`] table.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ScaleMetrics {
    scale: u32,
    factor: i64,
    max_integer: i64,
    min_integer: i64,
}

/// Per-scale metrics for scales 0 through 18.
pub static SCALES: [ScaleMetrics; 19] = build_scales();

const fn build_scales() -> [ScaleMetrics; 19] {
    let mut table = [ScaleMetrics {
        scale: 0,
        factor: 1,
        max_integer: i64::MAX,
        min_integer: i64::MIN,
    }; 19];
    let mut s = 0usize;
    let mut factor: i64 = 1;
    while s < 19 {
        table[s] = ScaleMetrics {
            scale: s as u32,
            factor,
            max_integer: i64::MAX / factor,
            min_integer: i64::MIN / factor,
        };
        s += 1;
        if s < 19 {
            factor *= 10;
        }
    }
    table
}

impl ScaleMetrics {
    /// Returns the metrics for `scale`, or an illegal-argument error when the
    /// scale lies outside `[0, 18]`.
    pub fn of(scale: u32) -> Result<ScaleMetrics, ArithmeticError> {
        if scale > MAX_SCALE {
            return Err(ArithmeticError::IllegalArgument(format!(
                "scale must be in [0, {}] but was: {}",
                MAX_SCALE, scale
            )));
        }
        Ok(SCALES[scale as usize])
    }

    /// Metrics for a scale already known to be valid.
    #[inline]
    pub(crate) const fn of_valid(scale: u32) -> ScaleMetrics {
        SCALES[scale as usize]
    }

    #[inline]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// The scale factor `10^s`, also the unscaled representation of one.
    #[inline]
    pub const fn scale_factor(&self) -> i64 {
        self.factor
    }

    /// `⌊i64::MAX / 10^s⌋`: the largest integer whose product with the scale
    /// factor still fits.
    #[inline]
    pub const fn max_integer(&self) -> i64 {
        self.max_integer
    }

    /// `⌈i64::MIN / 10^s⌉`, the negative counterpart of
    /// [`max_integer`](ScaleMetrics::max_integer).
    #[inline]
    pub const fn min_integer(&self) -> i64 {
        self.min_integer
    }

    /// `x · 10^s` with two's-complement wrap-around.
    #[inline]
    pub const fn multiply_by_scale_factor(&self, x: i64) -> i64 {
        x.wrapping_mul(self.factor)
    }

    /// `x · 10^s`, or `None` on overflow.
    #[inline]
    pub fn checked_multiply_by_scale_factor(&self, x: i64) -> Option<i64> {
        x.checked_mul(self.factor)
    }

    /// `x / 10^s` truncated toward zero (signed integer division).
    #[inline]
    pub const fn divide_by_scale_factor(&self, x: i64) -> i64 {
        x / self.factor
    }

    /// `x % 10^s`, carrying the sign of the dividend.
    #[inline]
    pub const fn modulo_by_scale_factor(&self, x: i64) -> i64 {
        x % self.factor
    }

    /// The exact 128-bit product `x · 10^s`.
    #[inline]
    pub const fn wide_scale(&self, x: i64) -> i128 {
        x as i128 * self.factor as i128
    }

    /// The exact 128-bit product `x · 10^s` for an unsigned magnitude.
    #[inline]
    pub const fn wide_scale_unsigned(&self, x: u64) -> u128 {
        x as u128 * self.factor as u128
    }
}

impl core::fmt::Debug for ScaleMetrics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ScaleMetrics({})", self.scale)
    }
}

/// Looks up the metrics whose scale factor equals `factor`, if `factor` is a
/// power of ten representable in an `i64`.
pub fn find_by_scale_factor(factor: i64) -> Option<ScaleMetrics> {
    if factor <= 0 {
        return None;
    }
    // The table is sorted by factor.
    SCALES
        .binary_search_by(|m| m.factor.cmp(&factor))
        .ok()
        .map(|i| SCALES[i])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scale_factors_are_powers_of_ten() {
        let mut expected: i64 = 1;
        for s in 0..=MAX_SCALE {
            let m = ScaleMetrics::of(s).unwrap();
            assert_eq!(m.scale_factor(), expected);
            assert_eq!(m.scale(), s);
            if s < MAX_SCALE {
                expected *= 10;
            }
        }
        assert_eq!(expected, 1_000_000_000_000_000_000);
    }

    #[test]
    fn integer_bounds_match_reference_division() {
        for s in 0..=MAX_SCALE {
            let m = ScaleMetrics::of(s).unwrap();
            assert_eq!(m.max_integer(), i64::MAX / m.scale_factor());
            assert_eq!(m.min_integer(), i64::MIN / m.scale_factor());
            assert!(m
                .checked_multiply_by_scale_factor(m.max_integer())
                .is_some());
            if s > 0 {
                assert!(m
                    .checked_multiply_by_scale_factor(m.max_integer() + 1)
                    .is_none());
            }
        }
    }

    #[test]
    fn division_truncates_toward_zero() {
        let m = ScaleMetrics::of(2).unwrap();
        assert_eq!(m.divide_by_scale_factor(199), 1);
        assert_eq!(m.divide_by_scale_factor(-199), -1);
        assert_eq!(m.modulo_by_scale_factor(199), 99);
        assert_eq!(m.modulo_by_scale_factor(-199), -99);
    }

    #[test]
    fn find_by_scale_factor_only_accepts_powers_of_ten() {
        assert_eq!(find_by_scale_factor(1).map(|m| m.scale()), Some(0));
        assert_eq!(find_by_scale_factor(1000).map(|m| m.scale()), Some(3));
        assert_eq!(
            find_by_scale_factor(1_000_000_000_000_000_000).map(|m| m.scale()),
            Some(18)
        );
        assert!(find_by_scale_factor(999).is_none());
        assert!(find_by_scale_factor(0).is_none());
        assert!(find_by_scale_factor(-10).is_none());
    }

    #[test]
    fn scale_out_of_range_is_rejected() {
        assert!(ScaleMetrics::of(19).is_err());
    }
}
