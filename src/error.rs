use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the tvmcalc crate
///
/// Every error is terminal for the call that produced it: no partial result
/// is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input: bad character, bad number or unknown word
    #[error("LexError: {0}")]
    Lex(String),
    /// Unbalanced parentheses
    #[error("SyntaxError: {0}")]
    Syntax(String),
    /// Operand stack discipline violated while evaluating postfix tokens
    #[error("EvalError: {0}")]
    Eval(String),
    /// Division by zero, or tangent at an undefined angle
    #[error("ArithmeticError: {0}")]
    Arithmetic(String),
    /// Financial formula input outside of its domain
    #[error("DomainError: {0}")]
    Domain(String),
    /// An iterative solver gave up before reaching the error threshold
    #[error("ConvergenceError: {0}")]
    Convergence(String),
    /// A settings update was rejected
    #[error("ConfigError: {0}")]
    Config(String),
    /// The history sink failed to record an evaluation
    #[error("HistoryError: {0}")]
    History(String),
}

/// The category of an [`Error`], without its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input text
    Lex,
    /// Unbalanced parenthesis
    Syntax,
    /// Wrong number of operands
    Eval,
    /// Division by zero, undefined tangent
    Arithmetic,
    /// Financial input out of range
    Domain,
    /// Solver did not converge
    Convergence,
    /// Rejected settings update
    Config,
    /// History could not be recorded
    History,
}

impl Error {
    /// Get the category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Eval(_) => ErrorKind::Eval,
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Convergence(_) => ErrorKind::Convergence,
            Self::Config(_) => ErrorKind::Config,
            Self::History(_) => ErrorKind::History,
        }
    }

    /// Get the bare message, without the kind prefix
    #[must_use]
    pub fn message(&self) -> &str {
        match *self {
            Self::Lex(ref message)
            | Self::Syntax(ref message)
            | Self::Eval(ref message)
            | Self::Arithmetic(ref message)
            | Self::Domain(ref message)
            | Self::Convergence(ref message)
            | Self::Config(ref message)
            | Self::History(ref message) => message,
        }
    }
}
