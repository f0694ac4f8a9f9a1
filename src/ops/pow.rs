//! Integer powers of a decimal.
//!
//! Integral bases use plain 64-bit binary exponentiation. Fractional bases go
//! through a sign-magnitude extended accumulator with a 9-digit integer limb
//! and a 36-digit fraction held in two 18-digit words, squared and multiplied
//! along the bits of `|n|` with rounding at the 10^-36 ulp. For a negative
//! exponent the accumulation rounds in the reciprocal direction and the
//! result is inverted at the end. Results for fractional bases are within
//! one ulp of the exact value.

use crate::error::ArithmeticError;
use crate::rounding::{OverflowMode, RoundingMode, TruncatedPart};
use crate::scale::{ScaleMetrics, MAX_SCALE};
use crate::str::format_unscaled;

/// `floor(sqrt(i64::MAX))`: squaring anything larger overflows.
const FLOOR_SQRT_MAX_LONG: i64 = 3_037_000_499;

const E18: u128 = 1_000_000_000_000_000_000;
const E36: u128 = E18 * E18;
/// Integer limb bound: nine decimal digits.
const IVAL_LIMIT: u64 = 1_000_000_000;

const MAX_EXPONENT: i32 = 999_999_999;

pub(crate) fn pow(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&n) {
        return Err(ArithmeticError::IllegalArgument(format!(
            "exponent must be in [-{},{}] but was: {}",
            MAX_EXPONENT, MAX_EXPONENT, n
        )));
    }
    let one = sm.scale_factor();
    // special results first
    if n == 0 {
        return Ok(one);
    }
    if u == 0 {
        return if n > 0 {
            Ok(0)
        } else {
            Err(ArithmeticError::DivisionByZero(format!(
                "{}^{}",
                format_unscaled(sm, u),
                n
            )))
        };
    }
    if u == one {
        return Ok(one);
    }
    if u == -one {
        return Ok(if n & 1 == 0 { one } else { -one });
    }
    if n == 1 {
        return Ok(u);
    }
    if n == -1 {
        return crate::ops::div::invert(sm, rounding, overflow, u);
    }
    if sm.scale() == 0 {
        return pow_long_main(rounding, overflow, u, n);
    }
    let ival = sm.divide_by_scale_factor(u);
    let fval = u - sm.multiply_by_scale_factor(ival);
    if n > 0 && fval == 0 {
        let result = pow_long(overflow, ival, n as u32)
            .map_err(|_| overflow_error(sm, u, n))?;
        return long_to_unscaled(sm, overflow, u, n, result);
    }
    if n < 0 && ival == 0 && one % fval == 0 {
        // the reciprocal of the base is an integer
        let result = pow_long(overflow, one / fval, n.unsigned_abs())
            .map_err(|_| overflow_error(sm, u, n))?;
        return long_to_unscaled(sm, overflow, u, n, result);
    }
    pow_with_precision_18(sm, rounding, overflow, u, ival, fval, n)
}

fn overflow_error(sm: ScaleMetrics, u: i64, n: i32) -> ArithmeticError {
    ArithmeticError::Overflow(format!("{}^{}", format_unscaled(sm, u), n))
}

/// Scale 0: the unscaled long is the value itself.
fn pow_long_main(
    rounding: RoundingMode,
    overflow: OverflowMode,
    base: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    if n >= 0 {
        return pow_long(overflow, base, n as u32)
            .map_err(|_| ArithmeticError::Overflow(format!("{}^{}", base, n)));
    }
    // 1 / base^|n| with |base| >= 2 and |n| >= 2: a non-zero part strictly
    // below half is discarded.
    let sign: i64 = if base > 0 || n & 1 == 0 { 1 } else { -1 };
    rounding.calculate_increment(sign, false, TruncatedPart::LessThanHalfButNotZero)
}

struct PowOverflow;

/// 64-bit binary exponentiation, wrapping or checked per mode.
fn pow_long(overflow: OverflowMode, base: i64, exp: u32) -> Result<i64, PowOverflow> {
    match overflow {
        OverflowMode::Unchecked => Ok(pow_long_wrapping(base, exp)),
        OverflowMode::Checked => pow_long_checked(base, exp),
    }
}

fn pow_long_wrapping(mut base: i64, mut exp: u32) -> i64 {
    let mut accum: i64 = 1;
    loop {
        match exp {
            0 => return accum,
            1 => return accum.wrapping_mul(base),
            _ => {
                if exp & 1 != 0 {
                    accum = accum.wrapping_mul(base);
                }
                exp >>= 1;
                if exp > 0 {
                    base = base.wrapping_mul(base);
                }
            }
        }
    }
}

fn pow_long_checked(mut base: i64, mut exp: u32) -> Result<i64, PowOverflow> {
    if (-2..=2).contains(&base) {
        return match base {
            0 => Ok(if exp == 0 { 1 } else { 0 }),
            1 => Ok(1),
            -1 => Ok(if exp & 1 == 0 { 1 } else { -1 }),
            2 => {
                if exp >= 63 {
                    Err(PowOverflow)
                } else {
                    Ok(1i64 << exp)
                }
            }
            -2 => {
                if exp >= 64 {
                    Err(PowOverflow)
                } else if exp & 1 == 0 {
                    Ok(1i64 << exp)
                } else {
                    Ok((-1i64) << exp)
                }
            }
            _ => unreachable!(),
        };
    }
    let mut accum: i64 = 1;
    loop {
        match exp {
            0 => return Ok(accum),
            1 => return accum.checked_mul(base).ok_or(PowOverflow),
            _ => {
                if exp & 1 != 0 {
                    accum = accum.checked_mul(base).ok_or(PowOverflow)?;
                }
                exp >>= 1;
                if exp > 0 {
                    if !(-FLOOR_SQRT_MAX_LONG..=FLOOR_SQRT_MAX_LONG).contains(&base) {
                        return Err(PowOverflow);
                    }
                    base *= base;
                }
            }
        }
    }
}

fn long_to_unscaled(
    sm: ScaleMetrics,
    overflow: OverflowMode,
    u: i64,
    n: i32,
    value: i64,
) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(sm.multiply_by_scale_factor(value)),
        OverflowMode::Checked => sm
            .checked_multiply_by_scale_factor(value)
            .ok_or_else(|| overflow_error(sm, u, n)),
    }
}

/// Sign-magnitude accumulator with nine integer digits and thirty-six
/// fraction digits (two 18-digit words): `value = ival + (valh*10^18 +
/// vall) / 10^36`.
#[derive(Clone, Copy)]
struct Unsigned9i36f {
    ival: u64,
    valh: u64,
    vall: u64,
}

impl Unsigned9i36f {
    /// Builds the accumulator from a base split into `|integral|` and
    /// `|fractional|` unscaled parts. Fails when the integral magnitude
    /// needs more than nine digits.
    fn from_parts(abs_int: u64, abs_fra: u64, sm: ScaleMetrics) -> Result<Self, PowOverflow> {
        if abs_int >= IVAL_LIMIT {
            return Err(PowOverflow);
        }
        let up = ScaleMetrics::of_valid(MAX_SCALE - sm.scale()).scale_factor() as u64;
        Ok(Unsigned9i36f {
            ival: abs_int,
            valh: abs_fra * up,
            vall: 0,
        })
    }

    /// The parity of the value in 10^-36 units. Both 10^36 and 10^18 are
    /// even, so only the low word contributes.
    #[inline]
    fn is_odd(&self) -> bool {
        self.vall & 1 != 0
    }

    /// `a * b` rounded to thirty-six fraction digits. The 10^-72-unit tail
    /// of the double-length product is classified and rounded per `rounding`
    /// with the final result's `sign`.
    fn multiply(
        a: &Unsigned9i36f,
        b: &Unsigned9i36f,
        sign: i64,
        rounding: RoundingMode,
    ) -> Result<Unsigned9i36f, ArithmeticError> {
        let t0 = a.vall as u128 * b.vall as u128;
        let t1 = a.valh as u128 * b.vall as u128 + b.valh as u128 * a.vall as u128 + t0 / E18;
        let t2 = a.ival as u128 * b.vall as u128
            + b.ival as u128 * a.vall as u128
            + a.valh as u128 * b.valh as u128
            + t1 / E18;
        let t3 = a.ival as u128 * b.valh as u128 + b.ival as u128 * a.valh as u128 + t2 / E18;
        let ii = a.ival as u128 * b.ival as u128 + t3 / E18;

        let mut result = Unsigned9i36f {
            ival: 0,
            valh: (t3 % E18) as u64,
            vall: (t2 % E18) as u64,
        };
        // discarded 10^-72 tail against one 10^-36 ulp
        let discarded = (t1 % E18) * E18 + t0 % E18;
        let increment =
            rounding.calculate_increment(sign, result.is_odd(), TruncatedPart::for_remainder_wide(discarded, E36))?;
        if increment != 0 {
            result.vall += 1;
            if result.vall as u128 == E18 {
                result.vall = 0;
                result.valh += 1;
                if result.valh as u128 == E18 {
                    result.valh = 0;
                    result.ival += 1;
                }
            }
        }
        let ival = ii + result.ival as u128;
        if ival >= IVAL_LIMIT as u128 {
            return Err(ArithmeticError::Overflow(String::new()));
        }
        result.ival = ival as u64;
        Ok(result)
    }

    /// Converts back to an unscaled value at the target scale, rounding the
    /// fraction digits below the scale.
    fn into_unscaled(
        self,
        sign: i64,
        sm: ScaleMetrics,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<i64, ArithmeticError> {
        let frac36 = self.valh as u128 * E18 + self.vall as u128;
        let divisor = E18 * ScaleMetrics::of_valid(MAX_SCALE - sm.scale()).scale_factor() as u128;
        let fq = frac36 / divisor;
        let frem = frac36 % divisor;
        let abs_truncated = self.ival as u128 * sm.scale_factor() as u128 + fq;
        let increment = rounding.calculate_increment(
            sign,
            abs_truncated & 1 != 0,
            TruncatedPart::for_remainder_wide(frem, divisor),
        )?;
        let signed = if sign < 0 {
            -(abs_truncated as i128)
        } else {
            abs_truncated as i128
        } + increment as i128;
        finish(signed, overflow)
    }

    /// Converts the reciprocal back to an unscaled value.
    ///
    /// Below `10` the accumulator's full 36-digit denominator still fits a
    /// `u128`, so `10^(36+s)` is divided exactly (the scale digits applied
    /// one at a time to keep every intermediate in range). Above that the
    /// quotient is small enough that the scale-18 image with the low word as
    /// a sticky refinement stays within one ulp.
    fn into_inverted(
        self,
        sign: i64,
        sm: ScaleMetrics,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<i64, ArithmeticError> {
        let v18 = self.ival as u128 * E18 + self.valh as u128;
        if v18 >= 10 * E18 {
            let numerator = E18 * sm.scale_factor() as u128;
            let mut q = numerator / v18;
            let r = numerator % v18;
            let mut part = TruncatedPart::for_remainder_wide(r, v18);
            if self.vall != 0 {
                // the true denominator is marginally larger, so exact
                // boundaries resolve downward
                if part == TruncatedPart::Zero {
                    q -= 1;
                    part = TruncatedPart::GreaterThanHalf;
                } else if part == TruncatedPart::EqualToHalf {
                    part = TruncatedPart::LessThanHalfButNotZero;
                }
            }
            let increment = rounding.calculate_increment(sign, q & 1 != 0, part)?;
            let signed = if sign < 0 { -(q as i128) } else { q as i128 } + increment as i128;
            return finish(signed, overflow);
        }
        if v18 == 0 && self.vall == 0 {
            return Err(ArithmeticError::DivisionByZero(
                "inverting a power that rounded to zero".to_string(),
            ));
        }
        // exact denominator in 10^-36 units, below 10^37
        let denominator = v18 * E18 + self.vall as u128;
        let mut quotient = E36 / denominator;
        let mut remainder = E36 % denominator;
        let mut wrapped = quotient as u64;
        let overflow_limit = i64::MAX as u128 + 1;
        let mut too_big = quotient > overflow_limit;
        for _ in 0..sm.scale() {
            let digit = remainder * 10 / denominator;
            remainder = remainder * 10 % denominator;
            wrapped = wrapped.wrapping_mul(10).wrapping_add(digit as u64);
            if !too_big {
                quotient = quotient * 10 + digit;
                too_big = quotient > overflow_limit;
            }
        }
        let part = TruncatedPart::for_remainder_wide(remainder, denominator);
        let increment = rounding.calculate_increment(sign, wrapped & 1 != 0, part)?;
        if too_big {
            return match overflow {
                OverflowMode::Checked => Err(ArithmeticError::Overflow(String::new())),
                OverflowMode::Unchecked => {
                    let magnitude = wrapped.wrapping_add((increment != 0) as u64);
                    Ok(if sign < 0 {
                        (magnitude as i64).wrapping_neg()
                    } else {
                        magnitude as i64
                    })
                }
            };
        }
        let signed =
            if sign < 0 { -(quotient as i128) } else { quotient as i128 } + increment as i128;
        finish(signed, overflow)
    }
}

fn finish(signed: i128, overflow: OverflowMode) -> Result<i64, ArithmeticError> {
    match overflow {
        OverflowMode::Unchecked => Ok(signed as i64),
        OverflowMode::Checked => {
            if signed < i64::MIN as i128 || signed > i64::MAX as i128 {
                Err(ArithmeticError::Overflow(String::new()))
            } else {
                Ok(signed as i64)
            }
        }
    }
}

/// Square-and-multiply over the bits of `|n|`, most significant first.
fn pow_with_precision_18(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
    u: i64,
    ival: i64,
    fval: i64,
    n: i32,
) -> Result<i64, ArithmeticError> {
    let sign: i64 = if n & 1 != 0 && u < 0 { -1 } else { 1 };
    let pow_rounding = if n >= 0 { rounding } else { rounding.reciprocal() };

    let lhs = Unsigned9i36f::from_parts(ival.unsigned_abs(), fval.unsigned_abs(), sm)
        .map_err(|_| overflow_error(sm, u, n))?;
    let magnitude = n.unsigned_abs();

    let mut acc = lhs;
    let top_bit = 31 - magnitude.leading_zeros();
    for bit in (0..top_bit).rev() {
        acc = Unsigned9i36f::multiply(&acc, &acc, sign, pow_rounding)
            .map_err(|e| promote(e, sm, u, n))?;
        if magnitude >> bit & 1 != 0 {
            acc = Unsigned9i36f::multiply(&acc, &lhs, sign, pow_rounding)
                .map_err(|e| promote(e, sm, u, n))?;
        }
    }
    let result = if n < 0 {
        acc.into_inverted(sign, sm, rounding, overflow)
    } else {
        acc.into_unscaled(sign, sm, rounding, overflow)
    };
    result.map_err(|e| promote(e, sm, u, n))
}

/// Attaches the operation context to errors bubbling out of the accumulator.
fn promote(e: ArithmeticError, sm: ScaleMetrics, u: i64, n: i32) -> ArithmeticError {
    match e {
        ArithmeticError::Overflow(_) => overflow_error(sm, u, n),
        other => other,
    }
}
