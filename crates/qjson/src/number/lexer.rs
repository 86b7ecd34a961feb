//! The numeric sub-engine's tokenizer.
//!
//! Re-scans the body of a quoteless string under the numeric grammar:
//! operators, duration suffixes, ISO-8601 stamps, and integer literals in
//! four bases plus decimals, all with `_` digit separators. Offsets are
//! relative to the quoteless body; errors are mapped back onto the original
//! input line through the body's base position.

use alloc::string::String;

use crate::{
    error::{DecodeError, ErrorKind, Result},
    input::{Input, Pos, whitespace_width},
    number::datetime::{self, IsoError},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumTokenKind {
    Int(i64),
    Dec(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    And,
    Or,
    Xor,
    Tilde,
    OpenParen,
    CloseParen,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumToken {
    pub kind: NumTokenKind,
    /// Byte offset of the token inside the quoteless body.
    pub offset: usize,
}

pub(crate) struct NumLexer<'a> {
    body: &'a [u8],
    at: usize,
    input: Input<'a>,
    base: Pos,
}

impl<'a> NumLexer<'a> {
    pub(crate) fn new(body: &'a [u8], input: Input<'a>, base: Pos) -> Self {
        NumLexer {
            body,
            at: 0,
            input,
            base,
        }
    }

    /// Builds an error anchored at a body offset. Quoteless strings never
    /// span lines, so shifting within the line is exact.
    pub(crate) fn error_at(&self, kind: ErrorKind, offset: usize) -> DecodeError {
        self.input.error(kind, self.base.shifted(offset))
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.body.get(self.at + ahead).copied()
    }

    pub(crate) fn next(&mut self) -> Result<NumToken> {
        loop {
            let w = whitespace_width(self.body, self.at);
            if w == 0 {
                break;
            }
            self.at += w;
        }
        let offset = self.at;
        let Some(b) = self.peek(0) else {
            return Ok(NumToken {
                kind: NumTokenKind::End,
                offset,
            });
        };
        let kind = match b {
            b'+' => self.single(NumTokenKind::Plus),
            b'-' => self.single(NumTokenKind::Minus),
            b'*' => self.single(NumTokenKind::Star),
            b'/' => self.single(NumTokenKind::Slash),
            b'%' => self.single(NumTokenKind::Percent),
            b'&' => self.single(NumTokenKind::And),
            b'|' => self.single(NumTokenKind::Or),
            b'^' => self.single(NumTokenKind::Xor),
            b'~' => self.single(NumTokenKind::Tilde),
            b'(' => self.single(NumTokenKind::OpenParen),
            b')' => self.single(NumTokenKind::CloseParen),
            b'w' => self.single(NumTokenKind::Weeks),
            b'd' => self.single(NumTokenKind::Days),
            b'h' => self.single(NumTokenKind::Hours),
            b'm' => self.single(NumTokenKind::Minutes),
            b's' => self.single(NumTokenKind::Seconds),
            b'0'..=b'9' | b'.' => self.literal(offset)?,
            _ => return Err(self.error_at(ErrorKind::InvalidNumericExpression, offset)),
        };
        Ok(NumToken { kind, offset })
    }

    fn single(&mut self, kind: NumTokenKind) -> NumTokenKind {
        self.at += 1;
        kind
    }

    /// Literal dispatch: ISO date-time, then binary, hexadecimal, decimal
    /// (a digit run counts as decimal only when `.` or an exponent follows),
    /// octal (explicit `0o` or leading-zero), and finally plain integers.
    fn literal(&mut self, start: usize) -> Result<NumTokenKind> {
        match datetime::parse_iso(&self.body[start..]) {
            Ok(stamp) => {
                self.at = start + stamp.len;
                return Ok(match stamp.fraction {
                    #[allow(clippy::cast_precision_loss)]
                    Some(fraction) => NumTokenKind::Dec(stamp.seconds as f64 + fraction),
                    None => NumTokenKind::Int(stamp.seconds),
                });
            }
            Err(IsoError::Invalid) => {
                return Err(self.error_at(ErrorKind::InvalidIsoDateTime, start));
            }
            Err(IsoError::NotIso) => {}
        }

        if self.body[start] == b'0' {
            match self.peek(1) {
                Some(b'b' | b'B') => {
                    return self.radix_literal(start, 2, 2, ErrorKind::InvalidBinaryNumber);
                }
                Some(b'x' | b'X') => {
                    return self.radix_literal(start, 2, 16, ErrorKind::InvalidHexadecimalNumber);
                }
                Some(b'o' | b'O') => {
                    return self.radix_literal(start, 2, 8, ErrorKind::InvalidOctalNumber);
                }
                _ => {}
            }
        }

        if self.looks_decimal(start) {
            return self.decimal(start);
        }

        if self.body[start] == b'0' && matches!(self.peek(1), Some(b'0'..=b'9' | b'_')) {
            return self.radix_literal(start, 1, 8, ErrorKind::InvalidOctalNumber);
        }

        self.radix_literal(start, 0, 10, ErrorKind::InvalidIntegerNumber)
    }

    /// True when the digit run starting at `start` is followed by `.` or an
    /// exponent marker, or starts with `.` outright.
    fn looks_decimal(&self, start: usize) -> bool {
        if self.body[start] == b'.' {
            return true;
        }
        let mut i = start;
        while matches!(self.body.get(i), Some(b'0'..=b'9' | b'_')) {
            i += 1;
        }
        matches!(self.body.get(i), Some(b'.' | b'e' | b'E'))
    }

    /// Integer literal in the given radix. `prefix` is the byte length of
    /// `0b`/`0x`/`0o` (2), the bare leading zero of octals (1), or 0.
    /// One `_` may separate the prefix from the first digit; every other `_`
    /// must sit between digits.
    fn radix_literal(
        &mut self,
        start: usize,
        prefix: usize,
        radix: u32,
        invalid: ErrorKind,
    ) -> Result<NumTokenKind> {
        let mut i = start + prefix;
        if prefix > 0 && self.body.get(i) == Some(&b'_') {
            i += 1;
        }
        let mut value: i64 = match self.body.get(i).copied().and_then(|b| digit(b, radix)) {
            Some(d) => i64::from(d),
            None => return Err(self.error_at(invalid, start)),
        };
        i += 1;
        loop {
            match self.body.get(i).copied() {
                Some(b'_') => {
                    let Some(d) = self.body.get(i + 1).copied().and_then(|b| digit(b, radix))
                    else {
                        return Err(self.error_at(invalid, start));
                    };
                    value = push_digit(value, d, radix)
                        .ok_or_else(|| self.error_at(ErrorKind::NumberOverflow, start))?;
                    i += 2;
                }
                Some(b) => match digit(b, radix) {
                    Some(d) => {
                        value = push_digit(value, d, radix)
                            .ok_or_else(|| self.error_at(ErrorKind::NumberOverflow, start))?;
                        i += 1;
                    }
                    // 8 or 9 inside an octal literal.
                    None if radix == 8 && b.is_ascii_digit() => {
                        return Err(self.error_at(invalid, start));
                    }
                    None => break,
                },
                None => break,
            }
        }
        self.at = i;
        Ok(NumTokenKind::Int(value))
    }

    /// Decimal literal: `digits[.digits][e[+-]digits]` with separators,
    /// or `.digits` forms. Underscores are stripped before the final parse.
    fn decimal(&mut self, start: usize) -> Result<NumTokenKind> {
        let mut cleaned = String::new();
        let mut i = start;
        let mut any_digits = false;

        if self.body[start] != b'.' {
            i = self.copy_digit_run(i, &mut cleaned, start)?;
            any_digits = true;
        }
        if self.body.get(i) == Some(&b'.') {
            i += 1;
            if matches!(self.body.get(i), Some(b'0'..=b'9')) {
                cleaned.push('.');
                i = self.copy_digit_run(i, &mut cleaned, start)?;
                any_digits = true;
            } else if !any_digits {
                // A bare `.` with no digits on either side.
                return Err(self.error_at(ErrorKind::InvalidDecimalNumber, start));
            }
        }
        if matches!(self.body.get(i), Some(b'e' | b'E')) {
            i += 1;
            cleaned.push('e');
            if matches!(self.body.get(i), Some(b'+' | b'-')) {
                cleaned.push(self.body[i] as char);
                i += 1;
            }
            if !matches!(self.body.get(i), Some(b'0'..=b'9')) {
                return Err(self.error_at(ErrorKind::InvalidDecimalNumber, start));
            }
            i = self.copy_digit_run(i, &mut cleaned, start)?;
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| self.error_at(ErrorKind::InvalidDecimalNumber, start))?;
        if !value.is_finite() {
            return Err(self.error_at(ErrorKind::InvalidDecimalNumber, start));
        }
        self.at = i;
        Ok(NumTokenKind::Dec(value))
    }

    /// Copies one digit run, stripping `_` separators; the run must start
    /// with a digit and every `_` must be followed by a digit.
    fn copy_digit_run(&self, mut i: usize, cleaned: &mut String, start: usize) -> Result<usize> {
        loop {
            match self.body.get(i).copied() {
                Some(b @ b'0'..=b'9') => {
                    cleaned.push(b as char);
                    i += 1;
                }
                Some(b'_') => {
                    if !matches!(self.body.get(i + 1), Some(b'0'..=b'9')) {
                        return Err(self.error_at(ErrorKind::InvalidDecimalNumber, start));
                    }
                    i += 1;
                }
                _ => return Ok(i),
            }
        }
    }
}

fn digit(b: u8, radix: u32) -> Option<u32> {
    (b as char).to_digit(radix)
}

fn push_digit(value: i64, d: u32, radix: u32) -> Option<i64> {
    value
        .checked_mul(i64::from(radix))
        .and_then(|v| v.checked_add(i64::from(d)))
}
