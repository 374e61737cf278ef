//! Time value of money solver.
//!
//! Variables follow the usual calculator convention: `pv` is the present
//! value, `fv` the future value, `pmt` the payment made each period, `rate`
//! the interest rate per period and `periods` the number of periods. Cash
//! paid out is negative, cash received is positive, and payments happen at
//! the end of each period.
//!
//! Every result snaps to zero below the configured error threshold. The rate
//! and period solvers iterate Newton-Raphson until a step is no larger than
//! that same threshold.

use crate::error::{Error, Result};
use crate::numeric::snap_to_zero;
use crate::settings::Settings;
use libm::pow;
use log::{debug, trace, warn};

/// Iteration cap of the Newton-Raphson solvers
pub const MAX_ITERATIONS: u32 = 1000;

/// Future value of `pv` plus `periods` payments of `pmt`
pub fn future_value(
    pv: f64,
    pmt: f64,
    rate: f64,
    periods: f64,
    settings: &Settings,
) -> Result<f64> {
    finite(&[("pv", pv), ("pmt", pmt), ("rate", rate), ("periods", periods)])?;
    let value = if rate == 0.0 {
        -(pv + pmt * periods)
    } else {
        let growth = pow(1.0 + rate, periods);
        -pv * growth - pmt * ((growth - 1.0) / rate)
    };
    Ok(snap_to_zero(value, settings.error_threshold()))
}

/// Present value of `fv` plus `periods` payments of `pmt`
pub fn present_value(
    fv: f64,
    pmt: f64,
    rate: f64,
    periods: f64,
    settings: &Settings,
) -> Result<f64> {
    finite(&[("fv", fv), ("pmt", pmt), ("rate", rate), ("periods", periods)])?;
    let value = if rate == 0.0 {
        -(fv + pmt * periods)
    } else {
        -(fv / pow(1.0 + rate, periods)) - pmt * ((1.0 - pow(1.0 + rate, -periods)) / rate)
    };
    Ok(snap_to_zero(value, settings.error_threshold()))
}

/// Payment per period taking `pv` to `fv`. Both `rate` and `periods` must be
/// strictly positive.
pub fn payment(pv: f64, fv: f64, rate: f64, periods: f64, settings: &Settings) -> Result<f64> {
    finite(&[("pv", pv), ("fv", fv), ("rate", rate), ("periods", periods)])?;
    if rate <= 0.0 || periods <= 0.0 {
        return Err(Error::Domain(
            "interest rate and number of periods must be greater than zero".into(),
        ));
    }
    let value = (-pv * rate - (fv * rate) / pow(1.0 + rate, periods))
        / (1.0 - pow(1.0 + rate, -periods));
    Ok(snap_to_zero(value, settings.error_threshold()))
}

/// Interest rate per period taking `pv` to `fv` with `periods` payments of
/// `pmt`, starting from the configured initial guess.
pub fn interest_rate(pv: f64, fv: f64, pmt: f64, periods: f64, settings: &Settings) -> Result<f64> {
    finite(&[("pv", pv), ("fv", fv), ("pmt", pmt), ("periods", periods)])?;
    if periods <= 0.0 {
        return Err(Error::Domain(
            "number of periods must be greater than zero".into(),
        ));
    }
    let n = periods;
    let residual = |rate: f64| {
        if rate == 0.0 {
            return -(pv + pmt * n) - fv;
        }
        let growth = pow(1.0 + rate, n);
        -pv * growth - pmt * ((growth - 1.0) / rate) - fv
    };
    let slope = |rate: f64| {
        if rate == 0.0 {
            return -pv * n - pmt * n * (n - 1.0) / 2.0;
        }
        let growth = pow(1.0 + rate, n);
        let previous = pow(1.0 + rate, n - 1.0);
        -pv * n * previous - pmt * ((rate * n * previous - (growth - 1.0)) / (rate * rate))
    };
    let rate = newton_raphson(
        "interest rate",
        settings.initial_guess_interest(),
        settings.error_threshold(),
        residual,
        slope,
    )?;
    Ok(snap_to_zero(rate, settings.error_threshold()))
}

/// Number of periods taking `pv` to `fv` with payments of `pmt` at `rate`,
/// starting from the configured initial guess. `rate` must be strictly
/// positive.
pub fn number_of_periods(
    pv: f64,
    fv: f64,
    pmt: f64,
    rate: f64,
    settings: &Settings,
) -> Result<f64> {
    finite(&[("pv", pv), ("fv", fv), ("pmt", pmt), ("rate", rate)])?;
    // also keeps log(1 + rate) defined
    if rate <= 0.0 {
        return Err(Error::Domain("interest rate must be greater than zero".into()));
    }
    let ln_growth = libm::log(1.0 + rate);
    let residual = |n: f64| {
        let growth = pow(1.0 + rate, n);
        -pv * growth - pmt * ((growth - 1.0) / rate) - fv
    };
    let slope = |n: f64| {
        let growth = pow(1.0 + rate, n);
        -pv * ln_growth * growth - pmt * growth * ln_growth / rate
    };
    let periods = newton_raphson(
        "number of periods",
        settings.initial_guess_periods(),
        settings.error_threshold(),
        residual,
        slope,
    )?;
    Ok(snap_to_zero(periods, settings.error_threshold()))
}

/// Find a root of `residual` from `guess`, stopping once a step is no larger
/// than `tolerance`.
fn newton_raphson<F, D>(
    what: &str,
    guess: f64,
    tolerance: f64,
    residual: F,
    slope: D,
) -> Result<f64>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut guess = guess;
    for iteration in 1..=MAX_ITERATIONS {
        let value = residual(guess);
        if value == 0.0 {
            debug!("{} solved exactly at {} after {} iterations", what, guess, iteration);
            return Ok(guess);
        }
        let derivative = slope(guess);
        let next = guess - value / derivative;
        if !next.is_finite() {
            warn!("{} diverged at iteration {} from {}", what, iteration, guess);
            return Err(Error::Convergence(format!(
                "{} calculation diverged: no usable slope at {}",
                what, guess
            )));
        }
        let step = next - guess;
        trace!("{}: iteration {}, guess {}, step {}", what, iteration, next, step);
        guess = next;
        if step.abs() <= tolerance {
            debug!("{} converged to {} after {} iterations", what, guess, iteration);
            return Ok(guess);
        }
    }
    warn!("{} did not converge after {} iterations", what, MAX_ITERATIONS);
    Err(Error::Convergence(format!(
        "{} calculation did not converge after {} iterations",
        what, MAX_ITERATIONS
    )))
}

fn finite(values: &[(&str, f64)]) -> Result<()> {
    for &(name, value) in values {
        if !value.is_finite() {
            return Err(Error::Domain(format!("{} must be finite, got {}", name, value)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::settings::SettingsUpdate;
    use test_case::test_case;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn zero_rate() {
        let settings = Settings::default();
        assert_eq!(future_value(100.0, 10.0, 0.0, 5.0, &settings), Ok(-150.0));
        assert_eq!(present_value(-150.0, 10.0, 0.0, 5.0, &settings), Ok(100.0));
    }

    #[test]
    fn future_value_compounds() {
        let settings = Settings::default();
        let fv = future_value(-1000.0, 0.0, 0.1, 2.0, &settings).unwrap();
        assert!(close(fv, 1210.0, 1e-9));
        // an annuity of 100 over 3 periods at 10%
        let fv = future_value(0.0, -100.0, 0.1, 3.0, &settings).unwrap();
        assert!(close(fv, 331.0, 1e-9));
    }

    #[test_case(100.0, 10.0, 0.05, 5.0 ; "savings")]
    #[test_case(-2500.0, 120.0, 0.01, 36.0 ; "loan")]
    #[test_case(1000.0, 0.0, 0.075, 12.5 ; "fractional periods")]
    #[test_case(42.0, -3.0, 0.0, 7.0 ; "zero rate")]
    fn present_value_inverts_future_value(pv: f64, pmt: f64, rate: f64, periods: f64) {
        let settings = Settings::default();
        let fv = future_value(pv, pmt, rate, periods, &settings).unwrap();
        let back = present_value(fv, pmt, rate, periods, &settings).unwrap();
        assert!(close(back, pv, 1e-9), "{} != {}", back, pv);
    }

    #[test]
    fn payment_closes_the_loan() {
        let settings = Settings::default();
        let pmt = payment(1000.0, 0.0, 0.1, 1.0, &settings).unwrap();
        assert!(close(pmt, -1100.0, 1e-9));

        let pmt = payment(10_000.0, 0.0, 0.005, 60.0, &settings).unwrap();
        assert_eq!(future_value(10_000.0, pmt, 0.005, 60.0, &settings), Ok(0.0));
    }

    #[test_case(1000.0, 0.0, 0.0, 12.0 ; "zero rate")]
    #[test_case(1000.0, 0.0, -0.1, 12.0 ; "negative rate")]
    #[test_case(1000.0, 0.0, 0.05, 0.0 ; "zero periods")]
    fn payment_domain(pv: f64, fv: f64, rate: f64, periods: f64) {
        let error = payment(pv, fv, rate, periods, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Domain);
    }

    #[test]
    fn interest_rate_single_period() {
        let settings = Settings::default();
        let rate = interest_rate(-1000.0, 1100.0, 0.0, 1.0, &settings).unwrap();
        assert!(close(rate, 0.10, settings.error_threshold()));
    }

    #[test]
    fn interest_rate_lands_on_zero() {
        // the first step from the 0.05 guess lands exactly on 0
        let settings = Settings::default();
        assert_eq!(interest_rate(-1000.0, 1000.0, 0.0, 1.0, &settings), Ok(0.0));
        assert_eq!(interest_rate(-1000.0, 2000.0, -100.0, 10.0, &settings), Ok(0.0));
    }

    #[test]
    fn interest_rate_annuity() {
        let mut settings = Settings::default();
        settings
            .apply(&SettingsUpdate::new().with_initial_guess_interest(0.1))
            .unwrap();
        let pmt = payment(5000.0, 0.0, 0.02, 24.0, &settings).unwrap();
        let rate = interest_rate(5000.0, 0.0, pmt, 24.0, &settings).unwrap();
        assert!(close(rate, 0.02, 1e-9));
    }

    #[test]
    fn interest_rate_domain() {
        let error = interest_rate(-1000.0, 1100.0, 0.0, 0.0, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Domain);
    }

    #[test]
    fn number_of_periods_single_period() {
        let settings = Settings::default();
        let periods = number_of_periods(-1000.0, 1100.0, 0.0, 0.1, &settings).unwrap();
        assert!(close(periods, 1.0, 1e-9));
    }

    #[test]
    fn number_of_periods_annuity() {
        let settings = Settings::default();
        let pmt = payment(-2000.0, 5000.0, 0.03, 18.0, &settings).unwrap();
        let periods = number_of_periods(-2000.0, 5000.0, pmt, 0.03, &settings).unwrap();
        assert!(close(periods, 18.0, 1e-8));
    }

    #[test_case(0.0 ; "zero rate")]
    #[test_case(-0.5 ; "negative rate")]
    #[test_case(-1.5 ; "rate below minus one")]
    fn number_of_periods_domain(rate: f64) {
        let error = number_of_periods(-1000.0, 1100.0, 0.0, rate, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Domain);
    }

    #[test]
    fn flat_residual_does_not_converge() {
        // pv and fv of the same sign with no payment never balance
        let error = number_of_periods(1000.0, 1000.0, 0.0, 0.1, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn non_finite_input() {
        let error = future_value(f64::NAN, 0.0, 0.1, 1.0, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Domain);
        assert_eq!(error.message(), "pv must be finite, got NaN");
    }

    #[test]
    fn newton_iteration_cap() {
        // x^2 + 1 has no real root, Newton wanders for ever
        let error = newton_raphson("test", 0.5, 1e-12, |x| x * x + 1.0, |x| 2.0 * x).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn newton_sqrt_two() {
        let root = newton_raphson("test", 1.0, 1e-14, |x| x * x - 2.0, |x| 2.0 * x).unwrap();
        assert!(close(root, std::f64::consts::SQRT_2, 1e-14));
    }
}
