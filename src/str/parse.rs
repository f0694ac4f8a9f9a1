//! Parsing decimal strings into unscaled values.
//!
//! Accepted shape: optional `+`/`-` sign, optional integer digits, optional
//! `.` followed by fraction digits; at least one digit overall. `-.25` is a
//! zero integer part. Fraction digits beyond the scale do not change the
//! accepted grammar, they only feed rounding: the first excess digit decides
//! the half boundary and the rest is sticky.

use crate::error::{ArithmeticError, ParseDecimalError};
use crate::rounding::{RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;

pub(crate) fn parse_unscaled(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    input: &str,
) -> Result<i64, ParseDecimalError> {
    let bytes = input.as_bytes();
    if bytes.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    let (negative, digits) = match bytes[0] {
        b'-' => (true, &bytes[1..]),
        b'+' => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let (int_digits, frac_digits) = match digits.iter().position(|&b| b == b'.') {
        Some(point) => (&digits[..point], &digits[point + 1..]),
        None => (digits, &digits[digits.len()..]),
    };
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(ParseDecimalError::InvalidDigit);
    }

    let overflow = || {
        if negative {
            ParseDecimalError::NegOverflow
        } else {
            ParseDecimalError::PosOverflow
        }
    };

    let mut int_magnitude: u128 = 0;
    for &b in int_digits {
        if !b.is_ascii_digit() {
            return Err(ParseDecimalError::InvalidDigit);
        }
        int_magnitude = int_magnitude * 10 + (b - b'0') as u128;
        if int_magnitude > u64::MAX as u128 {
            return Err(overflow());
        }
    }

    let scale = sm.scale() as usize;
    let mut frac_magnitude: u64 = 0;
    let mut frac_len = 0usize;
    let mut first_excess: u8 = 0;
    let mut excess_tail_nonzero = false;
    for (i, &b) in frac_digits.iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(ParseDecimalError::InvalidDigit);
        }
        let digit = b - b'0';
        if i < scale {
            frac_magnitude = frac_magnitude * 10 + digit as u64;
            frac_len += 1;
        } else if i == scale {
            first_excess = digit;
        } else if digit != 0 {
            excess_tail_nonzero = true;
        }
    }
    // zero-extend a short fraction to the scale
    for _ in frac_len..scale {
        frac_magnitude *= 10;
    }
    let part = match (first_excess, excess_tail_nonzero) {
        (0, false) => TruncatedPart::Zero,
        (0..=4, _) => TruncatedPart::LessThanHalfButNotZero,
        (5, false) => TruncatedPart::EqualToHalf,
        _ => TruncatedPart::GreaterThanHalf,
    };

    let magnitude = int_magnitude * sm.scale_factor() as u128 + frac_magnitude as u128;
    let sign: i64 = if negative { -1 } else { 1 };
    let increment = rounding
        .calculate_increment(sign, magnitude & 1 != 0, part)
        .map_err(|e| match e {
            ArithmeticError::RoundingNecessary => ParseDecimalError::Inexact,
            _ => ParseDecimalError::InvalidDigit,
        })?;
    let rounded = magnitude + (increment != 0) as u128;

    let limit = i64::MAX as u128 + negative as u128;
    if rounded > limit {
        return Err(overflow());
    }
    Ok(if negative {
        (rounded as i128).wrapping_neg() as i64
    } else {
        rounded as i64
    })
}
