use crate::error::{Error, Result};
use crate::token::{Op, Token};
use crate::trig::FUNCTIONS;
use std::f64::consts::PI;
use std::iter::Peekable;
use std::str::Chars;

/// What the lexer expects next. A `-` read while expecting an operand is a
/// unary minus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// Start of input, or after an operator, a function or `(`
    ExpectOperand,
    /// After a number, a constant or `)`
    ExpectOperator,
}

impl LexState {
    fn after(token: &Token) -> Self {
        match *token {
            Token::Number(_) | Token::RParen => Self::ExpectOperator,
            Token::Op(_) | Token::Function(_) | Token::LParen => Self::ExpectOperand,
        }
    }
}

/// Split `input` into tokens
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    state: LexState,
}

impl<'a> Lexer<'a> {
    /// Create a lexer at the start of `string`
    #[must_use]
    pub fn new(string: &'a str) -> Self {
        Lexer {
            input: string.chars().peekable(),
            state: LexState::ExpectOperand,
        }
    }

    /// Consume the whole input and return its tokens in order
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut output = Vec::new();
        while let Some(token) = self.next_token()? {
            self.state = LexState::after(&token);
            output.push(token);
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let c = loop {
            match self.input.next() {
                Some(c) if c.is_whitespace() => continue,
                Some(c) => break c,
                None => return Ok(None),
            }
        };
        let token = match c {
            c if is_number_part(c) => self.number(c)?,
            c if is_word_part(c) => self.word(c)?,
            '-' if self.state == LexState::ExpectOperand => Token::Op(Op::Neg),
            '-' => Token::Op(Op::Minus),
            '+' => Token::Op(Op::Plus),
            '*' => Token::Op(Op::Mul),
            '/' => Token::Op(Op::Div),
            '^' => Token::Op(Op::Exp),
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(Error::Lex(format!("unrecognized character: {}", other)));
            }
        };
        Ok(Some(token))
    }

    fn number(&mut self, first: char) -> Result<Token> {
        let mut literal = String::new();
        literal.push(first);
        while let Some(&c) = self.input.peek() {
            if !is_number_part(c) {
                break;
            }
            self.input.next();
            literal.push(c);
            if c == '.' && literal.matches('.').count() > 1 {
                return Err(Error::Lex(format!(
                    "multiple decimal points in {}",
                    literal
                )));
            }
        }
        if !literal.chars().any(|c| c.is_ascii_digit()) {
            return Err(Error::Lex(format!("invalid number: {}", literal)));
        }
        Ok(Token::Number(literal))
    }

    fn word(&mut self, first: char) -> Result<Token> {
        let mut word = String::new();
        word.push(first);
        while let Some(&c) = self.input.peek() {
            if !is_word_part(c) {
                break;
            }
            self.input.next();
            word.push(c);
        }
        if word.eq_ignore_ascii_case("pi") {
            Ok(Token::Number(PI.to_string()))
        } else if let Some(&func) = FUNCTIONS.get(word.as_str()) {
            Ok(Token::Function(func))
        } else {
            Err(Error::Lex(format!("unrecognized function: {}", word)))
        }
    }
}

/// Check if `c` can appear inside a number literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check if `c` can appear inside a constant or function name
fn is_word_part(c: char) -> bool {
    c.is_ascii_alphabetic()
}
