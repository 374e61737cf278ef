use crate::settings::AngleMode;
use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Compute `n!` as a float. Overflows to infinity past `170!`.
#[must_use]
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |product, k| product * f64::from(k))
}

/// Bring `angle` (in radians) into `[-π, π]` by adding or subtracting whole
/// turns. Non-finite angles are returned unchanged.
#[must_use]
pub fn reduce_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    // Drop the whole turns first so huge angles do not loop for ever
    let mut reduced = if angle.abs() > TWO_PI {
        angle % TWO_PI
    } else {
        angle
    };
    while reduced > PI || reduced < -PI {
        if reduced > PI {
            reduced -= TWO_PI;
        } else {
            reduced += TWO_PI;
        }
    }
    return reduced;
}

/// Convert `angle`, expressed in `mode` units, to radians
#[must_use]
pub fn to_radians(angle: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Radians => angle,
        AngleMode::Degrees => angle * PI / 180.0,
    }
}

/// Replace `value` by exactly `0.0` when its magnitude is below `threshold`
#[must_use]
pub fn snap_to_zero(value: f64, threshold: f64) -> f64 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 => 1.0 ; "zero")]
    #[test_case(1 => 1.0 ; "one")]
    #[test_case(5 => 120.0 ; "five")]
    #[test_case(10 => 3_628_800.0 ; "ten")]
    fn factorials(n: u32) -> f64 {
        factorial(n)
    }

    #[test]
    fn factorial_overflow() {
        assert!(factorial(170).is_finite());
        assert_eq!(factorial(171), f64::INFINITY);
    }

    #[test]
    fn reduce() {
        assert_eq!(reduce_angle(0.0), 0.0);
        assert_eq!(reduce_angle(PI), PI);
        assert_eq!(reduce_angle(-PI), -PI);
        assert!((reduce_angle(3.0 * PI).abs() - PI).abs() < 1e-12);
        assert!((reduce_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((reduce_angle(7.0) - (7.0 - TWO_PI)).abs() < 1e-12);

        let reduced = reduce_angle(1e12);
        assert!(reduced >= -PI && reduced <= PI);
        assert!(reduce_angle(f64::NAN).is_nan());
    }

    #[test]
    fn radians() {
        assert_eq!(to_radians(1.5, AngleMode::Radians), 1.5);
        assert!((to_radians(180.0, AngleMode::Degrees) - PI).abs() < 1e-15);
        assert!((to_radians(-90.0, AngleMode::Degrees) + PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn snap() {
        assert_eq!(snap_to_zero(1e-12, 1e-10), 0.0);
        assert_eq!(snap_to_zero(-1e-12, 1e-10), 0.0);
        assert_eq!(snap_to_zero(1e-10, 1e-10), 1e-10);
        assert_eq!(snap_to_zero(2.5, 1e-10), 2.5);
    }
}
