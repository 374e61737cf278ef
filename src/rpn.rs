use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::token::{Op, Token};
use libm::pow;

/// Evaluate `postfix` tokens, as produced by
/// [`to_postfix`](crate::to_postfix), with an operand stack.
///
/// The tokens are consumed. Evaluation fails unless exactly one value is
/// left on the stack at the end.
pub fn evaluate_postfix(postfix: Vec<Token>, settings: &Settings) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(literal) => {
                let value = literal
                    .parse()
                    .map_err(|_| Error::Eval(format!("invalid number {}", literal)))?;
                stack.push(value);
            }
            Token::Op(Op::Neg) => {
                let value = pop(&mut stack)?;
                stack.push(-value);
            }
            Token::Op(op) => {
                if stack.len() < 2 {
                    return Err(not_enough_operands());
                }
                let num2 = pop(&mut stack)?;
                let num1 = pop(&mut stack)?;
                stack.push(apply_binary(op, num1, num2)?);
            }
            Token::Function(func) => {
                let value = pop(&mut stack)?;
                stack.push(func.apply(value, settings)?);
            }
            Token::LParen | Token::RParen => {
                return Err(Error::Eval(
                    "unexpected parenthesis in postfix expression".into(),
                ));
            }
        }
    }

    match stack.len() {
        1 => pop(&mut stack),
        0 => Err(Error::Eval("invalid expression: too few operands".into())),
        _ => Err(Error::Eval("invalid expression: too many operands".into())),
    }
}

fn apply_binary(op: Op, num1: f64, num2: f64) -> Result<f64> {
    let value = match op {
        Op::Plus => num1 + num2,
        Op::Minus => num1 - num2,
        Op::Mul => num1 * num2,
        Op::Div => {
            if num2 == 0.0 {
                return Err(Error::Arithmetic("division by zero".into()));
            }
            num1 / num2
        }
        Op::Exp => pow(num1, num2),
        Op::Neg => {
            return Err(Error::Eval("unary minus used as a binary operator".into()));
        }
    };
    Ok(value)
}

fn pop(stack: &mut Vec<f64>) -> Result<f64> {
    stack.pop().ok_or_else(not_enough_operands)
}

fn not_enough_operands() -> Error {
    Error::Eval("invalid expression: not enough operands".into())
}
