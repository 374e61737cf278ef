use crate::error::Result;
use crate::history::{HistoryRecord, HistorySink};
use crate::lexer::tokenize;
use crate::numeric::snap_to_zero;
use crate::parser::to_postfix;
use crate::rpn::evaluate_postfix;
use crate::settings::{Settings, SettingsUpdate};
use crate::token::Token;
use crate::tvm;
use log::debug;
use std::fmt;

/// Evaluate a single expression from `input` with the default settings.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// any step of the evaluation failed.
///
/// # Example
///
/// ```
/// # use tvmcalc::eval;
/// assert_eq!(eval("45 - 2^3"), Ok(37.0));
/// assert!(eval("45 / (2 - 2)").is_err());
/// ```
pub fn eval(input: &str) -> Result<f64> {
    Engine::default().evaluate(input)
}

/// The calculator: settings, plus an optional history sink.
///
/// # Examples
/// ```
/// # use tvmcalc::{AngleMode, Engine, SettingsUpdate};
/// let mut engine = Engine::default();
/// assert_eq!(engine.evaluate("3 + 5 * 2"), Ok(13.0));
///
/// engine
///     .configure(&SettingsUpdate::new().with_angle_mode(AngleMode::Degrees))
///     .unwrap();
/// assert_eq!(engine.evaluate("sin(90) - cos(0)"), Ok(0.0));
/// ```
#[derive(Default)]
pub struct Engine {
    settings: Settings,
    history: Option<Box<dyn HistorySink + Send + Sync>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Engine")
            .field("settings", &self.settings)
            .field("history", &self.history.is_some())
            .finish()
    }
}

impl Engine {
    /// Create an engine with the given `settings` and no history sink
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            history: None,
        }
    }

    /// Send successful evaluations to `sink` while history is enabled
    #[must_use]
    pub fn with_history<S>(mut self, sink: S) -> Self
    where
        S: HistorySink + Send + Sync + 'static,
    {
        self.history = Some(Box::new(sink));
        self
    }

    /// Current settings
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Update the settings. See [`Settings::apply`].
    pub fn configure(&mut self, update: &SettingsUpdate) -> Result<()> {
        self.settings.apply(update)
    }

    /// Split `expression` into infix tokens
    pub fn tokenize(&self, expression: &str) -> Result<Vec<Token>> {
        tokenize(expression)
    }

    /// Reorder infix `tokens` into postfix order
    pub fn to_postfix(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        to_postfix(tokens)
    }

    /// Evaluate postfix tokens, without snapping the result
    pub fn evaluate_postfix(&self, postfix: Vec<Token>) -> Result<f64> {
        evaluate_postfix(postfix, &self.settings)
    }

    /// Evaluate `expression`, snapping results within the error threshold
    /// of zero to zero.
    ///
    /// When history is enabled and a sink is set, the evaluation is recorded
    /// before returning. A failing sink fails the whole call.
    pub fn evaluate(&self, expression: &str) -> Result<f64> {
        let tokens = self.tokenize(expression)?;
        debug!("{:?}: {} tokens", expression, tokens.len());
        let token_text = self.recording().map(|_| texts(&tokens));

        let postfix = self.to_postfix(tokens)?;
        debug!("{:?}: postfix {}", expression, texts(&postfix).join(" "));
        let postfix_text = self.recording().map(|_| texts(&postfix));

        let result = snap_to_zero(
            self.evaluate_postfix(postfix)?,
            self.settings.error_threshold(),
        );
        debug!("{:?} = {}", expression, result);

        if let (Some(sink), Some(tokens), Some(postfix)) =
            (self.recording(), token_text, postfix_text)
        {
            sink.append(&HistoryRecord {
                expression: expression.to_owned(),
                tokens,
                postfix,
                result,
            })?;
        }
        Ok(result)
    }

    /// See [`tvm::future_value`]
    pub fn future_value(&self, pv: f64, pmt: f64, rate: f64, periods: f64) -> Result<f64> {
        tvm::future_value(pv, pmt, rate, periods, &self.settings)
    }

    /// See [`tvm::present_value`]
    pub fn present_value(&self, fv: f64, pmt: f64, rate: f64, periods: f64) -> Result<f64> {
        tvm::present_value(fv, pmt, rate, periods, &self.settings)
    }

    /// See [`tvm::payment`]
    pub fn payment(&self, pv: f64, fv: f64, rate: f64, periods: f64) -> Result<f64> {
        tvm::payment(pv, fv, rate, periods, &self.settings)
    }

    /// See [`tvm::interest_rate`]
    pub fn interest_rate(&self, pv: f64, fv: f64, pmt: f64, periods: f64) -> Result<f64> {
        tvm::interest_rate(pv, fv, pmt, periods, &self.settings)
    }

    /// See [`tvm::number_of_periods`]
    pub fn number_of_periods(&self, pv: f64, fv: f64, pmt: f64, rate: f64) -> Result<f64> {
        tvm::number_of_periods(pv, fv, pmt, rate, &self.settings)
    }

    fn recording(&self) -> Option<&(dyn HistorySink + Send + Sync)> {
        if self.settings.history_enabled() {
            self.history.as_deref()
        } else {
            None
        }
    }
}

fn texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|token| token.text().to_owned()).collect()
}
