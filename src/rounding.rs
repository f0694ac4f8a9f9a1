use crate::error::ArithmeticError;

/// Rounding applied when an operation discards a non-zero part of the exact
/// result.
///
/// The semantics match the usual decimal rounding modes: the discarded part
/// is classified as a [`TruncatedPart`] and the truncated result's magnitude
/// is incremented by one ulp or left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round away from zero on any non-zero discarded part.
    Up,
    /// Truncate; never increments.
    Down,
    /// Round toward positive infinity.
    Ceiling,
    /// Round toward negative infinity.
    Floor,
    /// Round to nearest; ties away from zero.
    HalfUp,
    /// Round to nearest; ties toward zero.
    HalfDown,
    /// Round to nearest; ties to the even neighbour.
    HalfEven,
    /// Assert exactness: any non-zero discarded part is an error.
    Unnecessary,
}

/// All rounding modes, in declaration order.
pub const ROUNDING_MODES: [RoundingMode; 8] = [
    RoundingMode::Up,
    RoundingMode::Down,
    RoundingMode::Ceiling,
    RoundingMode::Floor,
    RoundingMode::HalfUp,
    RoundingMode::HalfDown,
    RoundingMode::HalfEven,
    RoundingMode::Unnecessary,
];

/// Classification of the discarded remainder relative to half an ulp of the
/// truncated result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TruncatedPart {
    /// Nothing was discarded; the truncated result is exact.
    Zero,
    /// A non-zero part strictly below half an ulp.
    LessThanHalfButNotZero,
    /// Exactly half an ulp.
    EqualToHalf,
    /// Strictly above half an ulp.
    GreaterThanHalf,
}

/// Whether arithmetic overflow wraps silently or raises an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverflowMode {
    /// Two's-complement wrap-around, matching native `i64` semantics.
    Unchecked,
    /// Any intermediate or final overflow raises [`ArithmeticError::Overflow`].
    Checked,
}

impl OverflowMode {
    #[inline]
    pub const fn is_checked(self) -> bool {
        matches!(self, OverflowMode::Checked)
    }
}

/// A rounding mode paired with an overflow mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TruncationPolicy {
    pub rounding: RoundingMode,
    pub overflow: OverflowMode,
}

impl TruncationPolicy {
    /// The default policy: round half up, silent overflow.
    pub const DEFAULT: TruncationPolicy = TruncationPolicy {
        rounding: RoundingMode::HalfUp,
        overflow: OverflowMode::Unchecked,
    };

    pub const fn new(rounding: RoundingMode, overflow: OverflowMode) -> Self {
        TruncationPolicy { rounding, overflow }
    }
}

impl RoundingMode {
    /// Returns the signed increment to add to a sign-carrying truncated
    /// result: `0` to keep it, `sign` to round the magnitude away from zero.
    ///
    /// `sign` is the sign of the exact (pre-truncation) result, `-1` or `+1`.
    /// `truncated_is_odd` is the parity of the truncated result's last digit
    /// and only matters for [`RoundingMode::HalfEven`].
    #[inline]
    pub fn calculate_increment(
        self,
        sign: i64,
        truncated_is_odd: bool,
        part: TruncatedPart,
    ) -> Result<i64, ArithmeticError> {
        if matches!(part, TruncatedPart::Zero) {
            return Ok(0);
        }
        match self {
            RoundingMode::Down => Ok(0),
            RoundingMode::Up => Ok(sign),
            RoundingMode::Ceiling => Ok(if sign > 0 { 1 } else { 0 }),
            RoundingMode::Floor => Ok(if sign < 0 { -1 } else { 0 }),
            RoundingMode::HalfUp => Ok(match part {
                TruncatedPart::EqualToHalf | TruncatedPart::GreaterThanHalf => sign,
                _ => 0,
            }),
            RoundingMode::HalfDown => Ok(match part {
                TruncatedPart::GreaterThanHalf => sign,
                _ => 0,
            }),
            RoundingMode::HalfEven => Ok(match part {
                TruncatedPart::GreaterThanHalf => sign,
                TruncatedPart::EqualToHalf if truncated_is_odd => sign,
                _ => 0,
            }),
            RoundingMode::Unnecessary => Err(ArithmeticError::RoundingNecessary),
        }
    }

    /// The mode to apply to a value that will subsequently be inverted:
    /// UP↔DOWN and CEILING↔FLOOR swap, the half modes are self-inverse.
    #[inline]
    pub const fn reciprocal(self) -> RoundingMode {
        match self {
            RoundingMode::Up => RoundingMode::Down,
            RoundingMode::Down => RoundingMode::Up,
            RoundingMode::Ceiling => RoundingMode::Floor,
            RoundingMode::Floor => RoundingMode::Ceiling,
            other => other,
        }
    }
}

impl TruncatedPart {
    /// Classifies `abs_remainder` against `abs_divisor` without computing the
    /// overflow-prone `2·|remainder|`.
    #[inline]
    pub(crate) fn for_remainder(abs_remainder: u64, abs_divisor: u64) -> TruncatedPart {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        let half = abs_divisor >> 1;
        if abs_remainder < half || (abs_remainder == half && abs_divisor & 1 != 0) {
            TruncatedPart::LessThanHalfButNotZero
        } else if abs_remainder == half {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        }
    }

    /// 128-bit variant of [`for_remainder`](TruncatedPart::for_remainder).
    #[inline]
    pub(crate) fn for_remainder_wide(abs_remainder: u128, abs_divisor: u128) -> TruncatedPart {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        let half = abs_divisor >> 1;
        if abs_remainder < half || (abs_remainder == half && abs_divisor & 1 != 0) {
            TruncatedPart::LessThanHalfButNotZero
        } else if abs_remainder == half {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        }
    }

    /// Classification for a power-of-two divisor `2^shift` with
    /// `abs_remainder < 2^shift`, `1 <= shift <= 127`.
    #[inline]
    pub(crate) fn for_shift(abs_remainder: u128, shift: u32) -> TruncatedPart {
        if abs_remainder == 0 {
            return TruncatedPart::Zero;
        }
        let half = 1u128 << (shift - 1);
        if abs_remainder < half {
            TruncatedPart::LessThanHalfButNotZero
        } else if abs_remainder == half {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        }
    }
}
