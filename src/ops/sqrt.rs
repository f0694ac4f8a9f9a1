//! Decimal square root.
//!
//! `round(sqrt(u * 10^s))`: the value is widened to 128 bits by the scale
//! factor and the root extracted with the binary non-restoring algorithm
//! (two result bits per step, leading-zero pairs skipped). The remainder
//! `u*10^s - root^2` lies in `[0, 2*root]`, so the discarded part is below
//! half exactly when it is at most `root`; a tie is impossible.

use crate::error::ArithmeticError;
use crate::rounding::{RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;
use crate::str::format_unscaled;

pub(crate) fn sqrt(
    sm: ScaleMetrics,
    rounding: RoundingMode,
    u: i64,
) -> Result<i64, ArithmeticError> {
    if u < 0 {
        return Err(ArithmeticError::SquareRootOfNegative(format_unscaled(
            sm, u,
        )));
    }
    let scaled = sm.wide_scale_unsigned(u as u64);
    let root = isqrt_wide(scaled);
    let remainder = scaled - root as u128 * root as u128;
    let part = if remainder == 0 {
        TruncatedPart::Zero
    } else if remainder <= root as u128 {
        TruncatedPart::LessThanHalfButNotZero
    } else {
        TruncatedPart::GreaterThanHalf
    };
    let increment = rounding.calculate_increment(1, root & 1 != 0, part)?;
    // root <= sqrt(i64::MAX * 10^18) < 2^62, so the increment cannot overflow
    Ok(root as i64 + increment)
}

/// Integer square root of a 128-bit value via the non-restoring loop.
fn isqrt_wide(value: u128) -> u64 {
    if value == 0 {
        return 0;
    }
    let zeros = value.leading_zeros() & !1;
    let mut scaled = value << zeros;
    let mut rem: u128 = 0;
    let mut root: u128 = 0;
    for _ in 0..(128 - zeros) / 2 {
        root <<= 1;
        rem = (rem << 2) | (scaled >> 126);
        scaled <<= 2;
        root += 1;
        if root <= rem {
            rem -= root;
            root += 1;
        } else {
            root -= 1;
        }
    }
    (root >> 1) as u64
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rounding::RoundingMode::*;

    fn sm(scale: u32) -> ScaleMetrics {
        ScaleMetrics::of(scale).unwrap()
    }

    #[test]
    fn isqrt_samples() {
        assert_eq!(isqrt_wide(0), 0);
        assert_eq!(isqrt_wide(1), 1);
        assert_eq!(isqrt_wide(2), 1);
        assert_eq!(isqrt_wide(3), 1);
        assert_eq!(isqrt_wide(4), 2);
        assert_eq!(isqrt_wide(99), 9);
        assert_eq!(isqrt_wide(100), 10);
        assert_eq!(isqrt_wide(u64::MAX as u128), 4_294_967_295);
        assert_eq!(isqrt_wide(1u128 << 126), 1u64 << 63);
        assert_eq!(isqrt_wide((1u128 << 126) - 1), (1u64 << 63) - 1);
        // floor(sqrt(i64::MAX))
        assert_eq!(isqrt_wide(i64::MAX as u128), 3_037_000_499);
    }

    #[test]
    fn isqrt_is_a_floor() {
        let samples: [u128; 6] = [
            10,
            12_345_678_901_234_567_890,
            1u128 << 100,
            (1u128 << 100) + 12345,
            2_000_000_000_000,
            u64::MAX as u128 * u64::MAX as u128,
        ];
        for v in samples {
            let r = isqrt_wide(v) as u128;
            assert!(r * r <= v, "root^2 must not exceed {}", v);
            assert!((r + 1) * (r + 1) > v, "next root must exceed {}", v);
        }
    }

    #[test]
    fn sqrt_of_two_at_scale_6() {
        let m = sm(6);
        assert_eq!(sqrt(m, Down, 2_000_000).unwrap(), 1_414_213);
        assert_eq!(sqrt(m, HalfUp, 2_000_000).unwrap(), 1_414_214);
        assert_eq!(sqrt(m, Up, 2_000_000).unwrap(), 1_414_214);
    }

    #[test]
    fn sqrt_scale_0_is_the_integer_root() {
        let m = sm(0);
        assert_eq!(sqrt(m, Down, 99).unwrap(), 9);
        assert_eq!(sqrt(m, Down, 100).unwrap(), 10);
        assert_eq!(sqrt(m, Down, i64::MAX).unwrap(), 3_037_000_499);
        assert_eq!(sqrt(m, Up, i64::MAX).unwrap(), 3_037_000_500);
    }

    #[test]
    fn sqrt_exact_squares_do_not_round() {
        let m = sm(2);
        // sqrt(2.25) = 1.50
        assert_eq!(sqrt(m, Unnecessary, 225).unwrap(), 150);
        assert_eq!(sqrt(m, Down, 225).unwrap(), 150);
        assert!(sqrt(m, Unnecessary, 200).is_err());
    }

    #[test]
    fn sqrt_of_negative_fails() {
        assert!(sqrt(sm(6), Down, -1).is_err());
        assert!(sqrt(sm(0), HalfUp, i64::MIN).is_err());
    }

    #[test]
    fn down_rooted_square_brackets_the_value() {
        let m = sm(6);
        for u in [1i64, 2, 3, 10, 12_345_678, 999_999_999_999] {
            let root = sqrt(m, Down, u).unwrap() as u128;
            let scaled = u as u128 * 1_000_000;
            assert!(root * root <= scaled);
            assert!((root + 1) * (root + 1) > scaled);
        }
    }
}
