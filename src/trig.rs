use crate::error::{Error, Result};
use crate::numeric::{factorial, reduce_angle, snap_to_zero, to_radians};
use crate::settings::Settings;
use hashbrown::HashMap;
use libm::pow;

lazy_static! {
    /// Function names accepted in expressions
    pub static ref FUNCTIONS: HashMap<&'static str, TrigFn> = {
        let mut map = HashMap::new();
        for &func in &[TrigFn::Sin, TrigFn::Cos, TrigFn::Tan] {
            map.insert(func.name(), func);
        }
        map.shrink_to_fit();
        map
    };
}

/// The trigonometric functions available in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFn {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
}

impl TrigFn {
    /// Name of the function, as written in expressions
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Evaluate the function at `angle`, read in the configured angle mode
    pub fn apply(self, angle: f64, settings: &Settings) -> Result<f64> {
        match self {
            Self::Sin => sin(angle, settings),
            Self::Cos => cos(angle, settings),
            Self::Tan => tan(angle, settings),
        }
    }
}

/// Sine of `angle` from a truncated Taylor series
pub fn sin(angle: f64, settings: &Settings) -> Result<f64> {
    let theta = reduced(angle, settings, TrigFn::Sin)?;
    let value = taylor_series(theta, settings.taylor_terms(), 1);
    Ok(snap_to_zero(value, settings.error_threshold()))
}

/// Cosine of `angle` from a truncated Taylor series
pub fn cos(angle: f64, settings: &Settings) -> Result<f64> {
    let theta = reduced(angle, settings, TrigFn::Cos)?;
    let value = taylor_series(theta, settings.taylor_terms(), 0);
    Ok(snap_to_zero(value, settings.error_threshold()))
}

/// Tangent of `angle`, as `sin / cos`.
///
/// Fails where the cosine is within the error threshold of zero instead of
/// returning a huge value.
pub fn tan(angle: f64, settings: &Settings) -> Result<f64> {
    let cosine = cos(angle, settings)?;
    if cosine.abs() < settings.error_threshold() {
        return Err(Error::Arithmetic(format!(
            "tangent undefined at this angle: {}",
            angle
        )));
    }
    Ok(sin(angle, settings)? / cosine)
}

fn reduced(angle: f64, settings: &Settings, func: TrigFn) -> Result<f64> {
    if !angle.is_finite() {
        return Err(Error::Arithmetic(format!(
            "{} undefined for non-finite angle {}",
            func.name(),
            angle
        )));
    }
    Ok(reduce_angle(to_radians(angle, settings.angle_mode())))
}

/// Sum `terms` terms of `Σ (-1)^k θ^(2k+first) / (2k+first)!`
fn taylor_series(theta: f64, terms: u32, first_exponent: u32) -> f64 {
    let mut sum = 0.0;
    for k in 0..terms {
        let exponent = 2 * k + first_exponent;
        let denominator = factorial(exponent);
        if denominator.is_infinite() {
            // every remaining term is zero
            break;
        }
        let term = pow(theta, f64::from(exponent)) / denominator;
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::settings::{AngleMode, SettingsUpdate};
    use std::f64::consts::PI;
    use test_case::test_case;

    fn settings(update: SettingsUpdate) -> Settings {
        let mut settings = Settings::default();
        settings.apply(&update).unwrap();
        settings
    }

    #[test]
    fn at_zero() {
        let settings = Settings::default();
        assert_eq!(sin(0.0, &settings), Ok(0.0));
        assert_eq!(cos(0.0, &settings), Ok(1.0));
        assert_eq!(tan(0.0, &settings), Ok(0.0));
    }

    #[test_case(0.5 ; "small angle")]
    #[test_case(-2.0 ; "negative angle")]
    #[test_case(3.0 ; "near pi")]
    #[test_case(40.0 ; "several turns")]
    fn matches_std(angle: f64) {
        let settings = settings(SettingsUpdate::new().with_taylor_terms(20));
        assert!((sin(angle, &settings).unwrap() - angle.sin()).abs() < 1e-9);
        assert!((cos(angle, &settings).unwrap() - angle.cos()).abs() < 1e-9);
        assert!((tan(angle, &settings).unwrap() - angle.tan()).abs() < 1e-8);
    }

    #[test]
    fn snaps_near_zero() {
        let settings = settings(SettingsUpdate::new().with_taylor_terms(20));
        assert_eq!(sin(PI, &settings), Ok(0.0));
        assert_eq!(cos(PI / 2.0, &settings), Ok(0.0));
    }

    #[test]
    fn few_terms_are_less_precise() {
        let settings = settings(SettingsUpdate::new().with_taylor_terms(1));
        // a single term of the sine series is θ itself
        assert_eq!(sin(0.5, &settings), Ok(0.5));
        assert_eq!(cos(0.5, &settings), Ok(1.0));
    }

    #[test]
    fn degrees() {
        let settings = settings(SettingsUpdate::new().with_angle_mode(AngleMode::Degrees));
        assert!((sin(30.0, &settings).unwrap() - 0.5).abs() < 1e-12);
        assert!((cos(60.0, &settings).unwrap() - 0.5).abs() < 1e-12);
        assert!((tan(45.0, &settings).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(sin(360.0, &settings), Ok(0.0));
    }

    #[test]
    fn tangent_undefined() {
        let error = tan(PI / 2.0, &Settings::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Arithmetic);

        let settings = settings(SettingsUpdate::new().with_angle_mode(AngleMode::Degrees));
        assert!(tan(-90.0, &settings).is_err());
    }

    #[test]
    fn non_finite() {
        let settings = Settings::default();
        assert!(sin(f64::INFINITY, &settings).is_err());
        assert!(cos(f64::NAN, &settings).is_err());
    }

    #[test]
    fn lookup() {
        assert_eq!(FUNCTIONS.get("sin"), Some(&TrigFn::Sin));
        assert_eq!(FUNCTIONS.get("tan"), Some(&TrigFn::Tan));
        assert_eq!(FUNCTIONS.get("sqrt"), None);
        assert_eq!(FUNCTIONS.len(), 3);
    }
}
