//! Pratt evaluation of numeric expressions.
//!
//! Classic top-down operator precedence: each token has a binding power, a
//! prefix meaning (`nud`) and an infix meaning (`led`). Values stay in the
//! integer domain as long as every operand is an integer; any decimal operand
//! promotes the computation, and duration suffixes promote unconditionally.

use crate::{
    error::{ErrorKind, Result},
    input::{Input, Pos},
    number::lexer::{NumLexer, NumToken, NumTokenKind},
};

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_DURATION: u8 = 4;

fn precedence(kind: NumTokenKind) -> u8 {
    match kind {
        NumTokenKind::Plus | NumTokenKind::Minus | NumTokenKind::Or | NumTokenKind::Xor => PREC_ADD,
        NumTokenKind::Star | NumTokenKind::Slash | NumTokenKind::Percent | NumTokenKind::And => {
            PREC_MUL
        }
        NumTokenKind::Weeks
        | NumTokenKind::Days
        | NumTokenKind::Hours
        | NumTokenKind::Minutes
        | NumTokenKind::Seconds => PREC_DURATION,
        _ => 0,
    }
}

fn duration_factor(kind: NumTokenKind) -> f64 {
    match kind {
        NumTokenKind::Weeks => 604_800.0,
        NumTokenKind::Days => 86_400.0,
        NumTokenKind::Hours => 3_600.0,
        NumTokenKind::Minutes => 60.0,
        _ => 1.0,
    }
}

/// An intermediate value of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Int(i64),
    Dec(f64),
}

impl Num {
    #[allow(clippy::cast_precision_loss)]
    fn widen(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Dec(v) => v,
        }
    }
}

pub(crate) struct Evaluator<'a> {
    lexer: NumLexer<'a>,
    current: NumToken,
}

/// Evaluates the body of a quoteless string as a numeric expression and
/// returns the result widened to a decimal.
pub(crate) fn evaluate(body: &[u8], input: Input<'_>, base: Pos) -> Result<f64> {
    let mut lexer = NumLexer::new(body, input, base);
    let current = lexer.next()?;
    let mut eval = Evaluator { lexer, current };
    let value = eval.expression(0)?;
    if eval.current.kind != NumTokenKind::End {
        return Err(eval
            .lexer
            .error_at(ErrorKind::InvalidNumericExpression, eval.current.offset));
    }
    let value = value.widen();
    // Decimal arithmetic can leave the representable range; an `inf` or
    // `NaN` could never be emitted as a JSON number.
    if !value.is_finite() {
        return Err(eval.lexer.error_at(ErrorKind::NumberOverflow, 0));
    }
    Ok(value)
}

impl Evaluator<'_> {
    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next()?;
        Ok(())
    }

    fn expression(&mut self, rbp: u8) -> Result<Num> {
        let token = self.current;
        self.advance()?;
        let mut left = self.nud(token)?;
        while precedence(self.current.kind) > rbp {
            let token = self.current;
            self.advance()?;
            left = self.led(token, left)?;
        }
        Ok(left)
    }

    fn nud(&mut self, token: NumToken) -> Result<Num> {
        match token.kind {
            NumTokenKind::Int(v) => Ok(Num::Int(v)),
            NumTokenKind::Dec(v) => Ok(Num::Dec(v)),
            NumTokenKind::Plus => self.unary_operand(token),
            NumTokenKind::Minus => match self.unary_operand(token)? {
                Num::Int(v) => v
                    .checked_neg()
                    .map(Num::Int)
                    .ok_or_else(|| self.error(ErrorKind::NumberOverflow, token)),
                Num::Dec(v) => Ok(Num::Dec(-v)),
            },
            NumTokenKind::Tilde => match self.unary_operand(token)? {
                Num::Int(v) => Ok(Num::Int(!v)),
                Num::Dec(_) => Err(self.error(ErrorKind::OperandMustBeInteger, token)),
            },
            NumTokenKind::OpenParen => {
                let inner = self.expression(0)?;
                if self.current.kind != NumTokenKind::CloseParen {
                    return Err(self.error(ErrorKind::UnclosedParenthesis, token));
                }
                self.advance()?;
                Ok(inner)
            }
            NumTokenKind::CloseParen => Err(self.error(ErrorKind::UnopenedParenthesis, token)),
            NumTokenKind::End => Err(self.error(ErrorKind::MissingOperand, token)),
            _ => Err(self.error(ErrorKind::InvalidNumericExpression, token)),
        }
    }

    /// Operand of a unary operator; end-of-expression here is the dedicated
    /// missing-operand diagnostic at the operator.
    fn unary_operand(&mut self, op: NumToken) -> Result<Num> {
        if self.current.kind == NumTokenKind::End {
            return Err(self.error(ErrorKind::MissingOperand, op));
        }
        self.expression(PREC_ADD)
    }

    fn led(&mut self, token: NumToken, left: Num) -> Result<Num> {
        match token.kind {
            NumTokenKind::Plus => self.arith(token, left, i64::checked_add, |a, b| a + b),
            NumTokenKind::Minus => self.arith(token, left, i64::checked_sub, |a, b| a - b),
            NumTokenKind::Star => self.arith(token, left, i64::checked_mul, |a, b| a * b),
            NumTokenKind::Slash => {
                let right = self.expression(PREC_MUL)?;
                match (left, right) {
                    (Num::Int(a), Num::Int(b)) => {
                        if b == 0 {
                            return Err(self.error(ErrorKind::DivisionByZero, token));
                        }
                        a.checked_div(b)
                            .map(Num::Int)
                            .ok_or_else(|| self.error(ErrorKind::NumberOverflow, token))
                    }
                    _ => {
                        if right.widen() == 0.0 {
                            return Err(self.error(ErrorKind::DivisionByZero, token));
                        }
                        Ok(Num::Dec(left.widen() / right.widen()))
                    }
                }
            }
            NumTokenKind::Percent => {
                let (a, b) = self.integer_operands(token, left)?;
                if b == 0 {
                    return Err(self.error(ErrorKind::DivisionByZero, token));
                }
                a.checked_rem(b)
                    .map(Num::Int)
                    .ok_or_else(|| self.error(ErrorKind::NumberOverflow, token))
            }
            NumTokenKind::And => {
                let (a, b) = self.integer_operands(token, left)?;
                Ok(Num::Int(a & b))
            }
            NumTokenKind::Or => {
                let (a, b) = self.integer_operands(token, left)?;
                Ok(Num::Int(a | b))
            }
            NumTokenKind::Xor => {
                let (a, b) = self.integer_operands(token, left)?;
                Ok(Num::Int(a ^ b))
            }
            NumTokenKind::Weeks
            | NumTokenKind::Days
            | NumTokenKind::Hours
            | NumTokenKind::Minutes
            | NumTokenKind::Seconds => {
                let mut value = left.widen() * duration_factor(token.kind);
                // `2h30m15s`: a value token directly after a duration starts
                // the next component, summed into the total.
                if matches!(
                    self.current.kind,
                    NumTokenKind::Int(_) | NumTokenKind::Dec(_)
                ) {
                    value += self.expression(PREC_DURATION - 1)?.widen();
                }
                Ok(Num::Dec(value))
            }
            _ => Err(self.error(ErrorKind::InvalidNumericExpression, token)),
        }
    }

    /// Add/sub/mul with integer preservation and decimal promotion.
    fn arith(
        &mut self,
        token: NumToken,
        left: Num,
        int_op: fn(i64, i64) -> Option<i64>,
        dec_op: fn(f64, f64) -> f64,
    ) -> Result<Num> {
        let rbp = precedence(token.kind);
        let right = self.expression(rbp)?;
        match (left, right) {
            (Num::Int(a), Num::Int(b)) => int_op(a, b)
                .map(Num::Int)
                .ok_or_else(|| self.error(ErrorKind::NumberOverflow, token)),
            _ => Ok(Num::Dec(dec_op(left.widen(), right.widen()))),
        }
    }

    fn integer_operands(&mut self, token: NumToken, left: Num) -> Result<(i64, i64)> {
        let right = self.expression(precedence(token.kind))?;
        match (left, right) {
            (Num::Int(a), Num::Int(b)) => Ok((a, b)),
            _ => Err(self.error(ErrorKind::OperandMustBeInteger, token)),
        }
    }

    fn error(&self, kind: ErrorKind, token: NumToken) -> crate::error::DecodeError {
        self.lexer.error_at(kind, token.offset)
    }
}
