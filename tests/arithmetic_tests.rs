use scaledec::{Arithmetic, OverflowMode, RoundingMode, ROUNDING_MODES};

use OverflowMode::{Checked, Unchecked};
use RoundingMode::*;

fn arith(scale: u32, rounding: RoundingMode, overflow: OverflowMode) -> Arithmetic {
    Arithmetic::new(scale, rounding, overflow).unwrap()
}

/// The operand set every invariant sweeps over.
fn boundary_values(a: &Arithmetic) -> Vec<i64> {
    let one = a.one();
    let max_integer = i64::MAX / one;
    let mut values = vec![
        0,
        1,
        -1,
        one,
        -one,
        max_integer,
        -max_integer,
        i64::MAX,
        -i64::MAX,
        i64::MIN,
    ];
    if max_integer < i64::MAX {
        values.push(max_integer + 1);
        values.push(-(max_integer + 1));
    }
    values
}

// Boundary scenarios

#[test]
fn one_times_one_is_one() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.multiply(1_000_000, 1_000_000).unwrap(), 1_000_000);
}

#[test]
fn two_times_three_and_a_half() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.multiply(2_000_000, 3_500_000).unwrap(), 7_000_000);
}

#[test]
fn a_millionth_divided_by_three() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.divide(1, 3_000_000).unwrap(), 0);
    // at scale 18 the same quotient keeps twelve more digits
    let a18 = arith(18, HalfUp, Checked);
    assert_eq!(
        a18.divide(1_000_000_000_000, 3_000_000_000_000_000_000).unwrap(),
        333_333_333_333
    );
}

#[test]
fn square_root_of_two() {
    assert_eq!(arith(6, Down, Checked).sqrt(2_000_000).unwrap(), 1_414_213);
    assert_eq!(arith(6, HalfUp, Checked).sqrt(2_000_000).unwrap(), 1_414_214);
}

#[test]
fn the_largest_double_below_one() {
    let v = 0.99999999999999994f64;
    assert_eq!(arith(0, Up, Checked).from_f64(v).unwrap(), 1);
    assert_eq!(arith(0, Floor, Checked).from_f64(-v).unwrap(), -1);
    assert_eq!(arith(0, Down, Checked).from_f64(v).unwrap(), 0);
}

#[test]
fn checked_multiply_overflow_versus_unchecked_wrap() {
    assert!(arith(6, HalfUp, Checked).multiply(i64::MAX, 2_000_000).is_err());
    assert_eq!(
        arith(6, HalfUp, Unchecked).multiply(i64::MAX, 2_000_000).unwrap(),
        -2
    );
}

// Universal invariants

#[test]
fn zero_is_the_additive_identity() {
    for scale in [0u32, 1, 6, 9, 10, 18] {
        for overflow in [Unchecked, Checked] {
            let a = arith(scale, HalfUp, overflow);
            for u in boundary_values(&a) {
                assert_eq!(a.add(u, 0).unwrap(), u);
                assert_eq!(a.subtract(u, 0).unwrap(), u);
            }
        }
    }
}

#[test]
fn one_is_the_multiplicative_identity() {
    for scale in [0u32, 1, 6, 9, 10, 18] {
        for rounding in ROUNDING_MODES {
            let a = arith(scale, rounding, Checked);
            let one = a.one();
            for u in boundary_values(&a) {
                assert_eq!(a.multiply(u, one).unwrap(), u, "mul scale {}", scale);
                assert_eq!(a.divide(u, one).unwrap(), u, "div scale {}", scale);
            }
        }
    }
}

#[test]
fn negation_is_an_involution() {
    for scale in [0u32, 6, 18] {
        let checked = arith(scale, HalfUp, Checked);
        let unchecked = checked.with_overflow(Unchecked);
        for u in boundary_values(&checked) {
            if u == i64::MIN {
                assert!(checked.negate(u).is_err());
                assert_eq!(unchecked.negate(u).unwrap(), i64::MIN);
            } else {
                assert_eq!(checked.negate(checked.negate(u).unwrap()).unwrap(), u);
            }
        }
    }
}

#[test]
fn square_equals_self_multiply_everywhere() {
    for scale in [0u32, 2, 6, 9, 10, 13, 18] {
        for rounding in ROUNDING_MODES {
            let a = arith(scale, rounding, Unchecked);
            for u in boundary_values(&a) {
                let square = a.square(u);
                let multiply = a.multiply(u, u);
                match (square, multiply) {
                    (Ok(s), Ok(m)) => assert_eq!(s, m, "scale {} {:?} u {}", scale, rounding, u),
                    (s, m) => assert_eq!(s.is_err(), m.is_err()),
                }
            }
        }
    }
}

#[test]
fn exact_products_divide_back() {
    for scale in [0u32, 2, 6, 9, 18] {
        let a = arith(scale, Unnecessary, Checked);
        let one = a.one();
        let samples = [one, 2 * one, 3 * one / 2, one / 2, 7 * one, 25 * one / 100];
        for &u in &samples {
            for &v in &samples {
                if v == 0 {
                    continue;
                }
                if let Ok(product) = a.multiply(u, v) {
                    if let Ok(quotient) = a.divide(product, v) {
                        assert_eq!(quotient, u, "scale {} {} {}", scale, u, v);
                    }
                }
            }
        }
    }
}

#[test]
fn pow_contracts() {
    let a = arith(6, HalfUp, Checked);
    let one = a.one();
    for u in [1_500_000i64, -1_500_000, 2_000_000, 333_333, one] {
        assert_eq!(a.pow(u, 0).unwrap(), one);
        assert_eq!(a.pow(u, 1).unwrap(), u);
        assert_eq!(a.pow(u, 2).unwrap(), a.square(u).unwrap());
    }
    // pow(u, n+1) tracks mul(pow(u, n), u) for exactly representable powers
    let half = 500_000;
    let mut acc = one;
    for n in 1..=6 {
        acc = a.multiply(acc, half).unwrap();
        assert_eq!(a.pow(half, n).unwrap(), acc, "0.5^{}", n);
    }
}

#[test]
fn sqrt_down_brackets_the_value() {
    for scale in [0u32, 2, 6, 18] {
        let a = arith(scale, Down, Checked);
        let one = a.one() as i128;
        for u in [0i64, 1, 2, 3, 99, 1_000, 123_456_789, i64::MAX] {
            let root = a.sqrt(u).unwrap() as i128;
            let scaled = u as i128 * one;
            assert!(root * root <= scaled, "scale {} u {}", scale, u);
            assert!((root + 1) * (root + 1) > scaled, "scale {} u {}", scale, u);
        }
        assert!(a.sqrt(-1).is_err());
    }
}

#[test]
fn text_round_trips() {
    for scale in [0u32, 1, 2, 6, 9, 17, 18] {
        let a = arith(scale, Unnecessary, Checked);
        for u in boundary_values(&a) {
            let text = a.to_string(u);
            assert_eq!(a.parse(&text).unwrap(), u, "scale {} text {}", scale, text);
        }
    }
}

#[test]
fn doubles_round_trip_up_to_scale_15() {
    for scale in [0u32, 3, 6, 9, 12, 15] {
        let a = arith(scale, HalfEven, Checked);
        for u in [
            0i64,
            1,
            -1,
            42,
            -42,
            123_456_789,
            -987_654_321,
            999_999_999_999_999,
        ] {
            let d = a.to_f64(u).unwrap();
            assert_eq!(a.from_f64(d).unwrap(), u, "scale {} u {}", scale, u);
        }
    }
}

#[test]
fn big_decimal_round_trips_exactly() {
    for scale in [0u32, 6, 18] {
        let a = arith(scale, Unnecessary, Checked);
        for u in boundary_values(&a) {
            let b = a.to_big_decimal(u);
            assert_eq!(a.from_big_decimal(&b).unwrap(), u);
        }
    }
}

// Smaller surfaces

#[test]
fn averages_of_extremes_do_not_overflow() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.avg(i64::MAX, i64::MAX).unwrap(), i64::MAX);
    assert_eq!(a.avg(i64::MIN, i64::MIN).unwrap(), i64::MIN);
    assert_eq!(a.avg(i64::MIN, i64::MAX).unwrap(), 0);
    assert_eq!(a.avg(0, 5).unwrap(), 3);
    assert_eq!(a.with_rounding(Down).avg(0, 5).unwrap(), 2);
}

#[test]
fn shifts_scale_by_powers_of_two() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.shift_left(3, 4).unwrap(), 48);
    assert_eq!(a.shift_right(48, 4).unwrap(), 3);
    assert_eq!(a.shift_right(5, 1).unwrap(), 3);
    assert_eq!(a.with_rounding(Down).shift_right(5, 1).unwrap(), 2);
    assert!(a.shift_left(i64::MAX, 1).is_err());
    assert_eq!(
        a.with_overflow(Unchecked).shift_left(i64::MAX, 1).unwrap(),
        -2
    );
}

#[test]
fn power_of_ten_scaling() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.multiply_by_power_of_10(123, 2).unwrap(), 12_300);
    assert_eq!(a.divide_by_power_of_10(123, 2).unwrap(), 1);
    assert_eq!(a.with_rounding(Down).divide_by_power_of_10(123, 2).unwrap(), 1);
    assert_eq!(a.divide_by_power_of_10(150, 2).unwrap(), 2);
}

#[test]
fn precision_reduction() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.round(1_234_567, 2).unwrap(), 1_230_000);
    assert_eq!(a.round(1_235_000, 2).unwrap(), 1_240_000);
    assert_eq!(a.round(1_234_567, 6).unwrap(), 1_234_567);
    assert_eq!(a.with_rounding(Ceiling).round(1_230_001, 2).unwrap(), 1_240_000);
}

#[test]
fn long_factor_operations() {
    let a = arith(2, HalfUp, Checked);
    // 1.50 * 3 and 1.50 / 4
    assert_eq!(a.multiply_by_long(150, 3).unwrap(), 450);
    assert_eq!(a.divide_by_long(150, 4).unwrap(), 38);
    assert_eq!(a.with_rounding(Down).divide_by_long(150, 4).unwrap(), 37);
    assert!(a.divide_by_long(150, 0).is_err());
    assert!(a.multiply_by_long(i64::MAX, 2).is_err());
    assert_eq!(
        a.with_overflow(Unchecked).multiply_by_long(i64::MAX, 2).unwrap(),
        -2
    );
    assert!(a.divide_by_long(i64::MIN, -1).is_err());
    assert_eq!(
        a.with_overflow(Unchecked).divide_by_long(i64::MIN, -1).unwrap(),
        i64::MIN
    );
}

#[test]
fn long_conversions() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.from_long(12).unwrap(), 12_000_000);
    assert_eq!(a.to_long(12_499_999).unwrap(), 12);
    assert_eq!(a.to_long(12_500_000).unwrap(), 13);
    assert!(a.from_long(i64::MAX).is_err());
}

#[test]
fn cross_scale_conversions() {
    let a = arith(6, HalfUp, Checked);
    assert_eq!(a.from_unscaled(150, 2).unwrap(), 1_500_000);
    assert_eq!(a.to_unscaled(1_500_000, 2).unwrap(), 150);
    assert_eq!(a.to_unscaled(1_499_999, 2).unwrap(), 150);
    assert_eq!(a.with_rounding(Down).to_unscaled(1_499_999, 2).unwrap(), 149);
}

#[test]
fn unnecessary_rounding_is_strict() {
    let a = arith(6, Unnecessary, Checked);
    assert!(a.divide(1, 3_000_000).is_err());
    assert!(a.sqrt(2_000_000).is_err());
    assert!(a.to_long(1_500_000).is_err());
    assert_eq!(a.divide(6_000_000, 3_000_000).unwrap(), 2_000_000);
    assert_eq!(a.to_long(3_000_000).unwrap(), 3);
}

#[test]
fn division_by_zero_always_fails() {
    for overflow in [Unchecked, Checked] {
        let a = arith(6, HalfUp, overflow);
        assert!(a.divide(1_000_000, 0).is_err());
        assert!(a.invert(0).is_err());
        assert!(a.pow(0, -1).is_err());
    }
}
