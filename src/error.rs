use core::fmt;

/// An error raised by a decimal arithmetic operation.
///
/// Overflow is only raised under [`OverflowMode::Checked`]; the remaining
/// variants are raised in both overflow modes.
///
/// [`OverflowMode::Checked`]: crate::OverflowMode::Checked
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArithmeticError {
    /// The exact result does not fit the 64-bit unscaled range.
    Overflow(String),
    /// Division or inversion with a zero divisor.
    DivisionByZero(String),
    /// Square root of a negative value.
    SquareRootOfNegative(String),
    /// A non-zero part was discarded under `RoundingMode::Unnecessary`.
    RoundingNecessary,
    /// An argument outside its legal domain: a non-finite double, an exponent
    /// or precision out of range, or a scale outside `[0, 18]`.
    IllegalArgument(String),
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::Overflow(msg) => write!(f, "overflow: {}", msg),
            ArithmeticError::DivisionByZero(msg) => write!(f, "division by zero: {}", msg),
            ArithmeticError::SquareRootOfNegative(msg) => {
                write!(f, "square root of a negative value: {}", msg)
            }
            ArithmeticError::RoundingNecessary => {
                "rounding necessary: a non-zero part was discarded".fmt(f)
            }
            ArithmeticError::IllegalArgument(msg) => write!(f, "illegal argument: {}", msg),
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// An error which can be returned when parsing a decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDecimalError {
    /// Value being parsed is empty.
    Empty,
    /// Contains a character invalid in its context.
    InvalidDigit,
    /// Number is too large to fit the 64-bit unscaled range at this scale.
    PosOverflow,
    /// Number is too small to fit the 64-bit unscaled range at this scale.
    NegOverflow,
    /// Digits beyond the scale would require rounding, but the rounding mode
    /// is `Unnecessary`.
    Inexact,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseDecimalError::Empty => "cannot parse decimal from empty string".fmt(f),
            ParseDecimalError::InvalidDigit => "invalid digit found in string".fmt(f),
            ParseDecimalError::PosOverflow => "number is too large to fit at this scale".fmt(f),
            ParseDecimalError::NegOverflow => "number is too small to fit at this scale".fmt(f),
            ParseDecimalError::Inexact => {
                "digits beyond the scale require rounding but rounding is unnecessary".fmt(f)
            }
        }
    }
}

impl std::error::Error for ParseDecimalError {}
