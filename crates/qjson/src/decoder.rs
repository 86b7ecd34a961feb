//! The structure builder: drives the tokenizer and writes canonical JSON.
//!
//! Grammar, with the outermost braces optional:
//!
//! ```text
//! document := '{' members '}' | members
//! members  := member (','? member)*
//! member   := identifier ':' value
//! elements := value (','? value)*
//! ```
//!
//! End-of-input reached while a container is open is promoted to the
//! container's `Unclosed*` diagnostic, anchored at its opening byte. The one
//! exception is end-of-input directly after a consumed comma, which keeps its
//! dedicated expect-after-comma diagnostic.

use alloc::string::String;

use crate::{
    emit,
    error::{ErrorKind, Result},
    input::{Input, Pos},
    number,
    outbuf::OutBuf,
    tokenizer::{Token, TokenKind, Tokenizer},
};

/// Open `{` and `[` containers may nest at most this deep.
const MAX_DEPTH: usize = 200;

pub(crate) struct Decoder<'a> {
    input: Input<'a>,
    tokens: Tokenizer<'a>,
    current: Token<'a>,
    depth: usize,
    out: OutBuf,
}

/// Decodes QJSON text into canonical JSON text.
pub(crate) fn decode(bytes: &[u8]) -> Result<String> {
    let input = Input::new(bytes);
    let mut tokens = Tokenizer::new(input);
    let current = tokens.next_token()?;
    let mut decoder = Decoder {
        input,
        tokens,
        current,
        depth: 0,
        out: OutBuf::new(),
    };
    decoder.document()?;
    Ok(decoder.out.into_string())
}

impl<'a> Decoder<'a> {
    fn advance(&mut self) -> Result<()> {
        self.current = self.tokens.next_token()?;
        Ok(())
    }

    fn error(&self, kind: ErrorKind, pos: Pos) -> crate::error::DecodeError {
        self.input.error(kind, pos)
    }

    fn document(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::EndOfInput => {
                self.out.push_str("{}");
                return Ok(());
            }
            TokenKind::OpenBrace => {
                let open = self.current.pos;
                self.enter(open)?;
                self.advance()?;
                self.members(Some(open))?;
                self.leave();
                self.advance()?;
            }
            _ => self.members(None)?,
        }
        match self.current.kind {
            TokenKind::EndOfInput => Ok(()),
            _ => Err(self.error(ErrorKind::SyntaxError, self.current.pos)),
        }
    }

    /// Parses `members` and emits the surrounding braces. `open` is the
    /// position of the explicit `{`, absent for the top-level bare form.
    fn members(&mut self, open: Option<Pos>) -> Result<()> {
        self.out.push_byte(b'{');
        let mut first = true;
        loop {
            match self.current.kind {
                TokenKind::CloseBrace => break,
                TokenKind::EndOfInput => match open {
                    Some(pos) => return Err(self.error(ErrorKind::UnclosedObject, pos)),
                    None => break,
                },
                _ => {}
            }
            if first {
                first = false;
            } else {
                self.out.push_byte(b',');
                if matches!(self.current.kind, TokenKind::Comma) {
                    self.advance()?;
                    if matches!(
                        self.current.kind,
                        TokenKind::EndOfInput | TokenKind::CloseBrace | TokenKind::CloseSquare
                    ) {
                        return Err(
                            self.error(ErrorKind::ExpectIdentifierAfterComma, self.current.pos)
                        );
                    }
                }
            }
            self.member(open)?;
        }
        self.out.push_byte(b'}');
        Ok(())
    }

    fn member(&mut self, open: Option<Pos>) -> Result<()> {
        let token = self.current;
        match token.kind {
            TokenKind::DoubleQuoted(body) => {
                emit::double_quoted(&mut self.out, &self.input, body, token.pos)?;
            }
            TokenKind::SingleQuoted(body) => {
                emit::single_quoted(&mut self.out, &self.input, body, token.pos)?;
            }
            TokenKind::Quoteless(body) => emit::quoteless(&mut self.out, body),
            _ => return Err(self.error(ErrorKind::ExpectStringIdentifier, token.pos)),
        }
        self.advance()?;
        match self.current.kind {
            TokenKind::Colon => {}
            TokenKind::EndOfInput => {
                return Err(match open {
                    Some(pos) => self.error(ErrorKind::UnclosedObject, pos),
                    None => self.error(ErrorKind::ExpectColon, self.current.pos),
                });
            }
            _ => return Err(self.error(ErrorKind::ExpectColon, self.current.pos)),
        }
        self.advance()?;
        self.out.push_byte(b':');
        self.value(open.map(|pos| (ErrorKind::UnclosedObject, pos)))
    }

    /// Parses `elements` and emits the surrounding brackets.
    fn elements(&mut self, open: Pos) -> Result<()> {
        self.out.push_byte(b'[');
        let mut first = true;
        loop {
            match self.current.kind {
                TokenKind::CloseSquare => break,
                TokenKind::EndOfInput => {
                    return Err(self.error(ErrorKind::UnclosedArray, open));
                }
                _ => {}
            }
            if first {
                first = false;
            } else {
                self.out.push_byte(b',');
                if matches!(self.current.kind, TokenKind::Comma) {
                    self.advance()?;
                    if matches!(
                        self.current.kind,
                        TokenKind::EndOfInput | TokenKind::CloseBrace | TokenKind::CloseSquare
                    ) {
                        return Err(self.error(ErrorKind::ExpectValueAfterComma, self.current.pos));
                    }
                }
            }
            self.value(Some((ErrorKind::UnclosedArray, open)))?;
        }
        self.out.push_byte(b']');
        Ok(())
    }

    /// Emits one value. `enclosing` names the diagnostic and opening position
    /// of the directly surrounding container, for end-of-input promotion.
    fn value(&mut self, enclosing: Option<(ErrorKind, Pos)>) -> Result<()> {
        let token = self.current;
        match token.kind {
            TokenKind::CloseSquare => {
                return Err(self.error(ErrorKind::UnexpectedCloseSquare, token.pos));
            }
            TokenKind::CloseBrace => {
                return Err(self.error(ErrorKind::UnexpectedCloseBrace, token.pos));
            }
            TokenKind::DoubleQuoted(body) => {
                emit::double_quoted(&mut self.out, &self.input, body, token.pos)?;
                self.advance()?;
            }
            TokenKind::SingleQuoted(body) => {
                emit::single_quoted(&mut self.out, &self.input, body, token.pos)?;
                self.advance()?;
            }
            TokenKind::Multiline(ml) => {
                emit::multiline(&mut self.out, &ml);
                self.advance()?;
            }
            TokenKind::Quoteless(body) => {
                self.quoteless_value(body, token.pos)?;
                self.advance()?;
            }
            TokenKind::OpenBrace => {
                let open = token.pos;
                self.enter(open)?;
                self.advance()?;
                self.members(Some(open))?;
                self.leave();
                self.advance()?;
            }
            TokenKind::OpenSquare => {
                let open = token.pos;
                self.enter(open)?;
                self.advance()?;
                self.elements(open)?;
                self.leave();
                self.advance()?;
            }
            TokenKind::EndOfInput => {
                return Err(match enclosing {
                    Some((kind, pos)) => self.error(kind, pos),
                    None => self.error(ErrorKind::SyntaxError, token.pos),
                });
            }
            TokenKind::Comma | TokenKind::Colon => {
                return Err(self.error(ErrorKind::SyntaxError, token.pos));
            }
        }
        Ok(())
    }

    /// A quoteless value is a literal name, a numeric expression, or a plain
    /// string, decided in that order.
    fn quoteless_value(&mut self, body: &[u8], pos: Pos) -> Result<()> {
        if let Some(name) = literal_name(body) {
            self.out.push_str(name);
            return Ok(());
        }
        if number::is_number_expr(body) {
            let value = number::evaluate(body, self.input, pos)?;
            self.out.push_str(&number::format_number(value));
            return Ok(());
        }
        emit::quoteless(&mut self.out, body);
        Ok(())
    }

    fn enter(&mut self, open: Pos) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(ErrorKind::MaxObjectArrayDepth, open));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// The spelled-out literal names and the JSON value each maps to.
fn literal_name(body: &[u8]) -> Option<&'static str> {
    match body {
        b"true" | b"True" | b"TRUE" | b"yes" | b"Yes" | b"YES" | b"on" | b"On" | b"ON" => {
            Some("true")
        }
        b"false" | b"False" | b"FALSE" | b"no" | b"No" | b"NO" | b"off" | b"Off" | b"OFF" => {
            Some("false")
        }
        b"null" | b"Null" | b"NULL" => Some("null"),
        _ => None,
    }
}
