//! The arithmetic façade: a `(scale, rounding, overflow)` configuration and
//! every operation over raw unscaled `i64` values.

use core::cmp::Ordering;
use core::fmt;

use bigdecimal::BigDecimal;

use crate::conv::{big, float, unscaled};
use crate::error::{ArithmeticError, ParseDecimalError};
use crate::ops::{add, checked, div, mul, pow, pow10, round, shift, sqrt};
use crate::rounding::{OverflowMode, RoundingMode, TruncationPolicy};
use crate::scale::{ScaleMetrics, MAX_SCALE};
use crate::str::{parse_unscaled, to_str_internal, write_unscaled};

/// Fixed-point decimal arithmetic at one scale, rounding mode and overflow
/// mode.
///
/// All operations take and return unscaled `i64` values whose mathematical
/// value is `u * 10^-s`. An `Arithmetic` is a small `Copy` configuration:
/// instances can be built ad hoc with [`Arithmetic::new`], fetched from the
/// static registry with [`Arithmetic::instance`], or derived from an
/// existing one with [`with_rounding`]/[`with_overflow`]/[`with_policy`].
///
/// Every operation honours the instance policy; the `with_*` methods are the
/// way to run a single operation under a different one:
///
/// ```
/// use scaledec::{Arithmetic, OverflowMode, RoundingMode};
///
/// let arith = Arithmetic::new(2, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
/// let half = arith.parse("0.125").unwrap();
/// assert_eq!(arith.to_string(half), "0.13");
/// assert_eq!(
///     arith.with_rounding(RoundingMode::Down).parse("0.125").unwrap(),
///     12
/// );
/// ```
///
/// [`with_rounding`]: Arithmetic::with_rounding
/// [`with_overflow`]: Arithmetic::with_overflow
/// [`with_policy`]: Arithmetic::with_policy
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    scale_metrics: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
}

const ROUNDING_COUNT: usize = 8;
const OVERFLOW_COUNT: usize = 2;
const SCALE_COUNT: usize = (MAX_SCALE + 1) as usize;

static INSTANCES: [[[Arithmetic; SCALE_COUNT]; ROUNDING_COUNT]; OVERFLOW_COUNT] =
    build_instances();

const fn rounding_from_index(index: usize) -> RoundingMode {
    match index {
        0 => RoundingMode::Up,
        1 => RoundingMode::Down,
        2 => RoundingMode::Ceiling,
        3 => RoundingMode::Floor,
        4 => RoundingMode::HalfUp,
        5 => RoundingMode::HalfDown,
        6 => RoundingMode::HalfEven,
        _ => RoundingMode::Unnecessary,
    }
}

const fn rounding_index(rounding: RoundingMode) -> usize {
    match rounding {
        RoundingMode::Up => 0,
        RoundingMode::Down => 1,
        RoundingMode::Ceiling => 2,
        RoundingMode::Floor => 3,
        RoundingMode::HalfUp => 4,
        RoundingMode::HalfDown => 5,
        RoundingMode::HalfEven => 6,
        RoundingMode::Unnecessary => 7,
    }
}

const fn build_instances() -> [[[Arithmetic; SCALE_COUNT]; ROUNDING_COUNT]; OVERFLOW_COUNT] {
    let mut table = [[[Arithmetic {
        scale_metrics: ScaleMetrics::of_valid(0),
        rounding: RoundingMode::Up,
        overflow: OverflowMode::Unchecked,
    }; SCALE_COUNT]; ROUNDING_COUNT]; OVERFLOW_COUNT];
    let mut o = 0;
    while o < OVERFLOW_COUNT {
        let mut r = 0;
        while r < ROUNDING_COUNT {
            let mut s = 0;
            while s < SCALE_COUNT {
                table[o][r][s] = Arithmetic {
                    scale_metrics: ScaleMetrics::of_valid(s as u32),
                    rounding: rounding_from_index(r),
                    overflow: if o == 0 {
                        OverflowMode::Unchecked
                    } else {
                        OverflowMode::Checked
                    },
                };
                s += 1;
            }
            r += 1;
        }
        o += 1;
    }
    table
}

impl Arithmetic {
    /// Builds an arithmetic for `scale` in `[0, 18]`.
    pub fn new(
        scale: u32,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Arithmetic, ArithmeticError> {
        Ok(Arithmetic {
            scale_metrics: ScaleMetrics::of(scale)?,
            rounding,
            overflow,
        })
    }

    /// The memoized instance for a configuration; every combination is built
    /// once at compile time.
    pub fn instance(
        scale: u32,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<&'static Arithmetic, ArithmeticError> {
        ScaleMetrics::of(scale)?;
        let o = matches!(overflow, OverflowMode::Checked) as usize;
        Ok(&INSTANCES[o][rounding_index(rounding)][scale as usize])
    }

    // --- accessors -------------------------------------------------------

    pub fn scale(&self) -> u32 {
        self.scale_metrics.scale()
    }

    pub fn scale_metrics(&self) -> ScaleMetrics {
        self.scale_metrics
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub fn overflow_mode(&self) -> OverflowMode {
        self.overflow
    }

    pub fn truncation_policy(&self) -> TruncationPolicy {
        TruncationPolicy::new(self.rounding, self.overflow)
    }

    /// The unscaled representation of one, `10^s`.
    pub fn one(&self) -> i64 {
        self.scale_metrics.scale_factor()
    }

    /// The largest representable value, as an unscaled word.
    pub fn max_unscaled(&self) -> i64 {
        i64::MAX
    }

    /// The smallest representable value, as an unscaled word.
    pub fn min_unscaled(&self) -> i64 {
        i64::MIN
    }

    // --- policy variants -------------------------------------------------

    /// The same arithmetic under a different rounding mode.
    pub fn with_rounding(&self, rounding: RoundingMode) -> Arithmetic {
        Arithmetic { rounding, ..*self }
    }

    /// The same arithmetic under a different overflow mode.
    pub fn with_overflow(&self, overflow: OverflowMode) -> Arithmetic {
        Arithmetic { overflow, ..*self }
    }

    /// The same arithmetic under a different truncation policy.
    pub fn with_policy(&self, policy: TruncationPolicy) -> Arithmetic {
        Arithmetic {
            rounding: policy.rounding,
            overflow: policy.overflow,
            ..*self
        }
    }

    // --- arithmetic ------------------------------------------------------

    pub fn add(&self, u1: i64, u2: i64) -> Result<i64, ArithmeticError> {
        add::add(self.overflow, u1, u2)
    }

    pub fn subtract(&self, u1: i64, u2: i64) -> Result<i64, ArithmeticError> {
        add::subtract(self.overflow, u1, u2)
    }

    pub fn multiply(&self, u1: i64, u2: i64) -> Result<i64, ArithmeticError> {
        mul::multiply(self.scale_metrics, self.rounding, self.overflow, u1, u2)
    }

    pub fn square(&self, u: i64) -> Result<i64, ArithmeticError> {
        mul::square(self.scale_metrics, self.rounding, self.overflow, u)
    }

    pub fn divide(&self, u1: i64, u2: i64) -> Result<i64, ArithmeticError> {
        div::divide(self.scale_metrics, self.rounding, self.overflow, u1, u2)
    }

    /// Divides by a plain long (an integer, not an unscaled decimal).
    pub fn divide_by_long(&self, u: i64, l: i64) -> Result<i64, ArithmeticError> {
        div::divide_by_long(self.rounding, self.overflow, u, l)
    }

    /// Multiplies by a plain long (an integer, not an unscaled decimal).
    pub fn multiply_by_long(&self, u: i64, l: i64) -> Result<i64, ArithmeticError> {
        mul::multiply_by_long(self.overflow, u, l)
    }

    pub fn invert(&self, u: i64) -> Result<i64, ArithmeticError> {
        div::invert(self.scale_metrics, self.rounding, self.overflow, u)
    }

    pub fn sqrt(&self, u: i64) -> Result<i64, ArithmeticError> {
        sqrt::sqrt(self.scale_metrics, self.rounding, u)
    }

    pub fn pow(&self, u: i64, n: i32) -> Result<i64, ArithmeticError> {
        pow::pow(self.scale_metrics, self.rounding, self.overflow, u, n)
    }

    pub fn avg(&self, u1: i64, u2: i64) -> Result<i64, ArithmeticError> {
        add::average(self.rounding, u1, u2)
    }

    pub fn negate(&self, u: i64) -> Result<i64, ArithmeticError> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(u.wrapping_neg()),
            OverflowMode::Checked => checked::negate_long(u),
        }
    }

    pub fn abs(&self, u: i64) -> Result<i64, ArithmeticError> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(u.wrapping_abs()),
            OverflowMode::Checked => checked::abs_long(u),
        }
    }

    /// Rounds to `precision` decimal places without changing the scale.
    pub fn round(&self, u: i64, precision: i32) -> Result<i64, ArithmeticError> {
        round::round(self.scale_metrics, self.rounding, self.overflow, u, precision)
    }

    pub fn shift_left(&self, u: i64, n: i32) -> Result<i64, ArithmeticError> {
        shift::shift_left(self.rounding, self.overflow, u, n)
    }

    pub fn shift_right(&self, u: i64, n: i32) -> Result<i64, ArithmeticError> {
        shift::shift_right(self.rounding, self.overflow, u, n)
    }

    pub fn multiply_by_power_of_10(&self, u: i64, n: i32) -> Result<i64, ArithmeticError> {
        pow10::multiply_by_power_of_10(self.rounding, self.overflow, u, n)
    }

    pub fn divide_by_power_of_10(&self, u: i64, n: i32) -> Result<i64, ArithmeticError> {
        pow10::divide_by_power_of_10(self.rounding, self.overflow, u, n)
    }

    /// Numeric order of two unscaled values at this scale.
    pub fn compare(&self, u1: i64, u2: i64) -> Ordering {
        u1.cmp(&u2)
    }

    // --- conversions -----------------------------------------------------

    pub fn from_long(&self, l: i64) -> Result<i64, ArithmeticError> {
        unscaled::from_long(self.scale_metrics, self.overflow, l)
    }

    pub fn to_long(&self, u: i64) -> Result<i64, ArithmeticError> {
        unscaled::to_long(self.scale_metrics, self.rounding, u)
    }

    pub fn from_f64(&self, value: f64) -> Result<i64, ArithmeticError> {
        float::from_f64(self.scale_metrics, self.rounding, value)
    }

    pub fn to_f64(&self, u: i64) -> Result<f64, ArithmeticError> {
        float::to_f64(self.scale_metrics, self.rounding, u)
    }

    /// Re-interprets an unscaled value from another scale at this scale.
    pub fn from_unscaled(&self, v: i64, src_scale: i32) -> Result<i64, ArithmeticError> {
        unscaled::from_unscaled(self.scale_metrics, self.rounding, self.overflow, v, src_scale)
    }

    /// The unscaled image of `u` at another scale.
    pub fn to_unscaled(&self, u: i64, dst_scale: i32) -> Result<i64, ArithmeticError> {
        unscaled::to_unscaled(self.scale_metrics, self.rounding, self.overflow, u, dst_scale)
    }

    pub fn from_big_decimal(&self, value: &BigDecimal) -> Result<i64, ArithmeticError> {
        big::from_big_decimal(self.scale_metrics, self.rounding, value)
    }

    pub fn to_big_decimal(&self, u: i64) -> BigDecimal {
        big::to_big_decimal(self.scale_metrics, u)
    }

    // --- text ------------------------------------------------------------

    pub fn parse(&self, input: &str) -> Result<i64, ParseDecimalError> {
        parse_unscaled(self.scale_metrics, self.rounding, input)
    }

    /// Canonical rendering: optional `-`, integer digits, and exactly `s`
    /// fraction digits.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self, u: i64) -> String {
        to_str_internal(self.scale_metrics, u).as_str().to_string()
    }

    /// Writes the canonical rendering into any `fmt::Write` sink.
    pub fn write_decimal<W: fmt::Write>(&self, u: i64, w: &mut W) -> fmt::Result {
        write_unscaled(w, self.scale_metrics, u)
    }
}

impl fmt::Debug for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arithmetic(scale={}, {:?}, {:?})",
            self.scale_metrics.scale(),
            self.rounding,
            self.overflow
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registry_hands_out_every_configuration() {
        for overflow in [OverflowMode::Unchecked, OverflowMode::Checked] {
            for rounding in crate::rounding::ROUNDING_MODES {
                for scale in 0..=MAX_SCALE {
                    let a = Arithmetic::instance(scale, rounding, overflow).unwrap();
                    assert_eq!(a.scale(), scale);
                    assert_eq!(a.rounding(), rounding);
                    assert_eq!(a.overflow_mode(), overflow);
                    assert_eq!(
                        a,
                        &Arithmetic::new(scale, rounding, overflow).unwrap()
                    );
                }
            }
        }
        assert!(Arithmetic::instance(19, RoundingMode::Down, OverflowMode::Checked).is_err());
        assert!(Arithmetic::new(19, RoundingMode::Down, OverflowMode::Checked).is_err());
    }

    #[test]
    fn instances_are_shared() {
        let a = Arithmetic::instance(6, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
        let b = Arithmetic::instance(6, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
        assert!(core::ptr::eq(a, b));
    }

    #[test]
    fn policy_variants_reconfigure_a_copy() {
        let a = Arithmetic::new(6, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
        let b = a.with_rounding(RoundingMode::Down);
        assert_eq!(b.rounding(), RoundingMode::Down);
        assert_eq!(b.scale(), 6);
        assert_eq!(a.rounding(), RoundingMode::HalfUp);
        let c = a.with_policy(TruncationPolicy::DEFAULT);
        assert_eq!(c.overflow_mode(), OverflowMode::Unchecked);
        assert_eq!(c.rounding(), RoundingMode::HalfUp);
    }

    #[test]
    fn compare_orders_unscaled_words() {
        let a = Arithmetic::new(6, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
        assert_eq!(a.compare(1, 2), Ordering::Less);
        assert_eq!(a.compare(2, 2), Ordering::Equal);
        assert_eq!(a.compare(-1, -2), Ordering::Greater);
    }

    #[test]
    fn negate_and_abs_respect_the_overflow_mode() {
        let checked = Arithmetic::new(0, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
        let unchecked = checked.with_overflow(OverflowMode::Unchecked);
        assert_eq!(checked.negate(5).unwrap(), -5);
        assert_eq!(checked.negate(-5).unwrap(), 5);
        assert!(checked.negate(i64::MIN).is_err());
        assert_eq!(unchecked.negate(i64::MIN).unwrap(), i64::MIN);
        assert!(checked.abs(i64::MIN).is_err());
        assert_eq!(unchecked.abs(i64::MIN).unwrap(), i64::MIN);
    }
}
