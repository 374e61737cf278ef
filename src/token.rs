use crate::trig::TrigFn;
use std::fmt::{self, Display, Formatter};

/// Functions bind tighter than any operator
const FUNCTION_PRECEDENCE: u8 = 5;

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal, or the value of a named constant
    Number(String),
    /// An arithmetic operator
    Op(Op),
    /// A function applied to the next operand
    Function(TrigFn),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

/// Token categories, without their payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// [`Token::Number`]
    Number,
    /// [`Token::Op`]
    Operator,
    /// [`Token::Function`]
    Function,
    /// [`Token::LParen`]
    LeftParen,
    /// [`Token::RParen`]
    RightParen,
}

impl Token {
    /// Get the category of this token
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match *self {
            Self::Number(_) => TokenKind::Number,
            Self::Op(_) => TokenKind::Operator,
            Self::Function(_) => TokenKind::Function,
            Self::LParen => TokenKind::LeftParen,
            Self::RParen => TokenKind::RightParen,
        }
    }

    /// Get the literal text of this token. Unary minus is written `u-`.
    #[must_use]
    pub fn text(&self) -> &str {
        match *self {
            Self::Number(ref literal) => literal.as_str(),
            Self::Op(op) => op.symbol(),
            Self::Function(func) => func.name(),
            Self::LParen => "(",
            Self::RParen => ")",
        }
    }

    /// Precedence of this token when it sits on the operator stack, or
    /// `None` for parenthesis
    pub(crate) fn precedence(&self) -> Option<u8> {
        match *self {
            Self::Op(op) => Some(op.precedence()),
            Self::Function(_) => Some(FUNCTION_PRECEDENCE),
            Self::Number(_) | Self::LParen | Self::RParen => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.text())
    }
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Binary `+`
    Plus,
    /// Binary `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Exp,
    /// Unary `-`
    Neg,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Exp => 3,
            Self::Neg => 4,
        }
    }

    /// Check if the operator is left associative
    #[must_use]
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div => true,
            Self::Exp | Self::Neg => false,
        }
    }

    /// Check if the operator takes a single operand
    #[must_use]
    pub fn is_unary(self) -> bool {
        self == Self::Neg
    }

    /// Get the operator symbol
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp => "^",
            Self::Neg => "u-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Op, Token, TokenKind};
    use crate::trig::TrigFn;

    #[test]
    fn text() {
        assert_eq!(Token::Number("2.5".into()).text(), "2.5");
        assert_eq!(Token::Op(Op::Minus).text(), "-");
        assert_eq!(Token::Op(Op::Neg).text(), "u-");
        assert_eq!(Token::Function(TrigFn::Cos).to_string(), "cos");
        assert_eq!(Token::LParen.kind(), TokenKind::LeftParen);
        assert_eq!(Token::Op(Op::Neg).kind(), TokenKind::Operator);
    }

    #[test]
    fn precedence() {
        assert!(Op::Neg.precedence() > Op::Exp.precedence());
        assert!(Op::Exp.precedence() > Op::Mul.precedence());
        assert_eq!(Op::Mul.precedence(), Op::Div.precedence());
        assert!(Op::Div.precedence() > Op::Plus.precedence());
        assert_eq!(Token::LParen.precedence(), None);
        assert!(Token::Function(TrigFn::Sin).precedence() > Token::Op(Op::Neg).precedence());
    }

    #[test]
    fn associativity() {
        assert!(Op::Minus.is_left_associative());
        assert!(!Op::Exp.is_left_associative());
        assert!(!Op::Neg.is_left_associative());
        assert!(Op::Neg.is_unary());
        assert!(!Op::Minus.is_unary());
    }
}
