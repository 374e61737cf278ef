use crate::error::{Error, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Unit in which trigonometric function arguments are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Angles are in radians
    Radians,
    /// Angles are in degrees, converted to radians before evaluation
    Degrees,
}

impl AngleMode {
    /// Get the other angle mode
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }
}

/// Engine configuration.
///
/// A `Settings` value is read, never written, while an expression or a
/// financial formula is being evaluated. The only way to change it is
/// [`Settings::apply`], which validates every new value before touching
/// anything.
///
/// # Examples
///
/// ```
/// # use tvmcalc::{AngleMode, Settings, SettingsUpdate};
/// let mut settings = Settings::default();
/// assert_eq!(settings.taylor_terms(), 10);
///
/// let update = SettingsUpdate::new().with_angle_mode(AngleMode::Degrees);
/// assert!(settings.apply(&update).is_ok());
/// assert_eq!(settings.angle_mode(), AngleMode::Degrees);
///
/// // A rejected update leaves everything unchanged
/// let update = SettingsUpdate::new().with_taylor_terms(0);
/// assert!(settings.apply(&update).is_err());
/// assert_eq!(settings.taylor_terms(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SettingsUpdate", into = "SettingsUpdate")]
pub struct Settings {
    angle_mode: AngleMode,
    history_enabled: bool,
    taylor_terms: u32,
    error_threshold: f64,
    initial_guess_interest: f64,
    initial_guess_periods: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            history_enabled: false,
            taylor_terms: 10,
            error_threshold: 1e-10,
            initial_guess_interest: 0.05,
            initial_guess_periods: 10.0,
        }
    }
}

impl Settings {
    /// Unit used for trigonometric arguments
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Whether successful evaluations are sent to the history sink
    #[must_use]
    pub fn history_enabled(&self) -> bool {
        self.history_enabled
    }

    /// Number of Taylor series terms summed for `sin` and `cos`
    #[must_use]
    pub fn taylor_terms(&self) -> u32 {
        self.taylor_terms
    }

    /// Magnitude below which results snap to zero. This is also the
    /// convergence tolerance of the Newton-Raphson solvers.
    #[must_use]
    pub fn error_threshold(&self) -> f64 {
        self.error_threshold
    }

    /// Starting point of the interest rate solver
    #[must_use]
    pub fn initial_guess_interest(&self) -> f64 {
        self.initial_guess_interest
    }

    /// Starting point of the number of periods solver
    #[must_use]
    pub fn initial_guess_periods(&self) -> f64 {
        self.initial_guess_periods
    }

    /// Apply every field set in `update`.
    ///
    /// All the provided values are checked before any of them is applied: if
    /// one is outside of its domain, `self` is left untouched and the
    /// returned [`Error::Config`] names the offending setting.
    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<()> {
        let next = self.updated(update).map_err(|error| {
            warn!("rejected settings update: {}", error);
            error
        })?;
        if next != *self {
            info!("settings changed: {:?}", next);
        }
        *self = next;
        Ok(())
    }

    /// Flip between radians and degrees
    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
        info!("angle mode set to {:?}", self.angle_mode);
    }

    /// Flip history recording on or off
    pub fn toggle_history(&mut self) {
        self.history_enabled = !self.history_enabled;
        info!("history recording set to {}", self.history_enabled);
    }

    fn updated(&self, update: &SettingsUpdate) -> Result<Self> {
        let mut next = *self;
        if let Some(mode) = update.angle_mode {
            next.angle_mode = mode;
        }
        if let Some(enabled) = update.history_enabled {
            next.history_enabled = enabled;
        }
        if let Some(terms) = update.taylor_terms {
            next.taylor_terms = u32::try_from(terms)
                .ok()
                .filter(|&terms| terms >= 1)
                .ok_or_else(|| {
                    Error::Config(format!("taylor_terms must be at least 1, got {}", terms))
                })?;
        }
        if let Some(threshold) = update.error_threshold {
            next.error_threshold = positive("error_threshold", threshold)?;
        }
        if let Some(guess) = update.initial_guess_interest {
            next.initial_guess_interest = positive("initial_guess_interest", guess)?;
        }
        if let Some(guess) = update.initial_guess_periods {
            next.initial_guess_periods = positive("initial_guess_periods", guess)?;
        }
        Ok(next)
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be a finite number greater than 0, got {}",
            name, value
        )))
    }
}

/// A partial settings change. Unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    /// New angle unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_mode: Option<AngleMode>,
    /// New Taylor series term count, must be at least 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taylor_terms: Option<i64>,
    /// New error threshold, must be greater than 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_threshold: Option<f64>,
    /// New interest rate initial guess, must be greater than 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_guess_interest: Option<f64>,
    /// New number of periods initial guess, must be greater than 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_guess_periods: Option<f64>,
    /// Turn history recording on or off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_enabled: Option<bool>,
}

impl SettingsUpdate {
    /// Create an empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the angle unit of the trigonometric functions
    #[must_use]
    pub fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = Some(mode);
        self
    }

    /// Set the number of Taylor series terms
    #[must_use]
    pub fn with_taylor_terms(mut self, terms: i64) -> Self {
        self.taylor_terms = Some(terms);
        self
    }

    /// Set the threshold below which results snap to zero
    #[must_use]
    pub fn with_error_threshold(mut self, threshold: f64) -> Self {
        self.error_threshold = Some(threshold);
        self
    }

    /// Set the starting guess of the interest rate solver
    #[must_use]
    pub fn with_initial_guess_interest(mut self, guess: f64) -> Self {
        self.initial_guess_interest = Some(guess);
        self
    }

    /// Set the starting guess of the number of periods solver
    #[must_use]
    pub fn with_initial_guess_periods(mut self, guess: f64) -> Self {
        self.initial_guess_periods = Some(guess);
        self
    }

    /// Turn history recording on or off
    #[must_use]
    pub fn with_history_enabled(mut self, enabled: bool) -> Self {
        self.history_enabled = Some(enabled);
        self
    }
}

impl TryFrom<SettingsUpdate> for Settings {
    type Error = Error;

    /// Build settings from the defaults, overridden by `update`
    fn try_from(update: SettingsUpdate) -> Result<Self> {
        Self::default().updated(&update)
    }
}

impl From<Settings> for SettingsUpdate {
    fn from(settings: Settings) -> Self {
        Self {
            angle_mode: Some(settings.angle_mode),
            taylor_terms: Some(i64::from(settings.taylor_terms)),
            error_threshold: Some(settings.error_threshold),
            initial_guess_interest: Some(settings.initial_guess_interest),
            initial_guess_periods: Some(settings.initial_guess_periods),
            history_enabled: Some(settings.history_enabled),
        }
    }
}
