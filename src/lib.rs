//! Fixed-point decimal arithmetic on a single signed 64-bit word.
//!
//! A decimal value is an unscaled integer `u` paired with a scale
//! `s` in `[0, 18]`; its mathematical value is `u * 10^-s`. The value space
//! is exactly the `i64` range read at that scale, which makes the arithmetic
//! deterministic and allocation-free: the niche between native floats (not
//! base 10) and arbitrary-precision decimals (not fixed-cost).
//!
//! The entry point is [`Arithmetic`]: a `(scale, rounding, overflow)`
//! configuration offering `add`, `subtract`, `multiply`, `divide`, `square`,
//! `sqrt`, `pow`, `invert`, `avg`, shifts, power-of-ten scaling, precision
//! reduction, comparisons, and conversions from and to `i64`, `f64`,
//! `BigDecimal` and strings. Results are bit-exact: every operation computes
//! the mathematically exact result, classifies the discarded part, and
//! applies the configured [`RoundingMode`]; overflow either wraps in two's
//! complement ([`OverflowMode::Unchecked`]) or fails
//! ([`OverflowMode::Checked`]).
//!
//! ```
//! use scaledec::{Arithmetic, OverflowMode, RoundingMode};
//!
//! let arith = Arithmetic::instance(2, RoundingMode::HalfEven, OverflowMode::Checked).unwrap();
//! let price = arith.parse("19.99").unwrap();
//! let quantity = arith.from_long(3).unwrap();
//! let total = arith.multiply(price, quantity).unwrap();
//! assert_eq!(arith.to_string(total), "59.97");
//! ```
//!
//! Everything is pure and re-entrant: an [`Arithmetic`] is a small `Copy`
//! value with no interior mutability, freely shareable across threads.

mod arithmetic;
mod conv;
mod error;
mod ops;
mod rounding;
mod scale;
mod str;

pub use arithmetic::Arithmetic;
pub use error::{ArithmeticError, ParseDecimalError};
pub use rounding::{OverflowMode, RoundingMode, TruncatedPart, TruncationPolicy, ROUNDING_MODES};
pub use scale::{ScaleMetrics, MAX_SCALE, SCALES};
