#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::float_cmp,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! tvmcalc, a calculator engine for arithmetic expressions and time value of
//! money problems.
//!
//! The easiest way to use this crate is with the [`eval`](fn.eval.html)
//! function:
//!
//! ```
//! assert_eq!(tvmcalc::eval("3 + 5 * 2"), Ok(13.0));
//! assert_eq!(tvmcalc::eval("2 ^ 3 ^ 2"), Ok(512.0));
//! ```
//!
//! An [`Engine`](struct.Engine.html) keeps [`Settings`](struct.Settings.html)
//! between evaluations, and can record every evaluation to a
//! [`HistorySink`](trait.HistorySink.html):
//!
//! ```
//! use std::sync::Arc;
//! use tvmcalc::{AngleMode, Engine, MemoryHistory, SettingsUpdate};
//!
//! let history = Arc::new(MemoryHistory::new());
//! let mut engine = Engine::default().with_history(Arc::clone(&history));
//! engine
//!     .configure(
//!         &SettingsUpdate::new()
//!             .with_angle_mode(AngleMode::Degrees)
//!             .with_history_enabled(true),
//!     )
//!     .unwrap();
//!
//! let value = engine.evaluate("2 * sin(30)").unwrap();
//! assert!((value - 1.0).abs() < 1e-12);
//! assert_eq!(history.records()[0].postfix, vec!["2", "30", "sin", "*"]);
//!
//! // Settings are validated, a rejected update changes nothing
//! assert!(engine.configure(&SettingsUpdate::new().with_taylor_terms(0)).is_err());
//! assert_eq!(engine.settings().taylor_terms(), 10);
//! ```
//!
//! The same engine solves time value of money problems:
//!
//! ```
//! # use tvmcalc::Engine;
//! let engine = Engine::default();
//! // 1000 paid now grows into 1100 after a single period
//! let rate = engine.interest_rate(-1000.0, 1100.0, 0.0, 1.0).unwrap();
//! assert!((rate - 0.1).abs() < 1e-10);
//! assert_eq!(engine.future_value(100.0, 10.0, 0.0, 5.0), Ok(-150.0));
//! ```
//!
//! # Language definition
//!
//! The language implemented by tvmcalc can contain the following elements:
//!
//! - unsigned decimal literals: `12`, `0.5`, `.25`, `3.`;
//! - the constant `pi`, in any case;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division and `^` for exponentiation;
//! - unary minus: a `-` at the start of the input, or right after an
//!   operator, a function name or `(`;
//! - function calls: `sin(a)`, `cos(a)` and `tan(a)`, computed from a
//!   Taylor series. Arguments are in radians unless the engine is set to
//!   degrees.
//!
//! Any other symbol is forbidden in the input.
//!
//! `^` is right associative, and unary minus binds tighter than `^`, so
//! `-2 ^ 2` is `4`. Functions bind tighter than every operator: `sin 2 ^ 2`
//! is `(sin 2) ^ 2`. Division by zero and the tangent of an angle whose
//! cosine is within the error threshold of zero are errors rather than
//! infinities.
//!
//! # Technical details
//!
//! Evaluation runs in three steps, each one available on its own: the input
//! is split into [`Token`](enum.Token.html)s, reordered into postfix order by
//! a Shunting-Yard algorithm, and the postfix tokens are evaluated on an
//! operand stack. Results within the configured error threshold of zero are
//! returned as exactly zero.

#[macro_use]
extern crate lazy_static;

mod engine;
mod error;
mod history;
mod lexer;
mod numeric;
mod parser;
mod rpn;
mod settings;
mod token;
mod trig;
pub mod tvm;

pub use engine::{eval, Engine};
pub use error::{Error, ErrorKind, Result};
pub use history::{FileHistory, HistoryRecord, HistorySink, MemoryHistory, DEFAULT_HISTORY_FILE};
pub use lexer::{tokenize, LexState, Lexer};
pub use numeric::{factorial, reduce_angle, snap_to_zero, to_radians};
pub use parser::to_postfix;
pub use rpn::evaluate_postfix;
pub use settings::{AngleMode, Settings, SettingsUpdate};
pub use token::{Op, Token, TokenKind};
pub use trig::{TrigFn, FUNCTIONS};
