use crate::error::{Error, Result};
use crate::token::Token;

/// Reorder infix `tokens` into postfix (reverse polish) order with the
/// Shunting-Yard algorithm.
///
/// Unary operators and functions are prefix: they are pushed on the
/// operator stack without popping anything, and leave it once an operator
/// with lower precedence (or a closing parenthesis) shows up.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators = Vec::new();

    'tokens: for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Function(_) | Token::LParen => operators.push(token),
            Token::Op(o1) if o1.is_unary() => operators.push(token),
            Token::Op(o1) => {
                'operators: while let Some(top) = operators.last() {
                    let pop_me = match top.precedence() {
                        Some(p2) => {
                            p2 > o1.precedence()
                                || (p2 == o1.precedence() && o1.is_left_associative())
                        }
                        None => false,
                    };
                    if !pop_me {
                        break 'operators;
                    }
                    output.extend(operators.pop());
                }
                operators.push(token);
            }
            Token::RParen => {
                while let Some(top) = operators.pop() {
                    if top == Token::LParen {
                        continue 'tokens;
                    }
                    output.push(top);
                }
                return Err(Error::Syntax("mismatched parenthesis, missing '('".into()));
            }
        }
    }

    while let Some(token) = operators.pop() {
        if token == Token::LParen {
            return Err(Error::Syntax("mismatched parenthesis, missing ')'".into()));
        }
        output.push(token);
    }
    Ok(output)
}
