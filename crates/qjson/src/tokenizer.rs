//! The outer tokenizer: delimiters, comments, and the four string styles.
//!
//! Tokens borrow their value bytes from the input. The tokenizer owns all
//! line/column bookkeeping; everything downstream only shifts a [`Pos`]
//! within a single line.

use crate::{
    error::{ErrorKind, Result},
    input::{Input, Pos, Scanned, newline_width, scan_char, whitespace_width},
    number::datetime,
};

/// One outer token, tagged with the position of its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub pos: Pos,
}

/// The outer token tags.
///
/// String payloads are the interior bytes: quotes stripped for the quoted
/// styles, trailing whitespace trimmed for the quoteless style. End of input
/// is a sentinel tag of its own so the structure builder can promote it to an
/// `Unclosed*` diagnostic when a container is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    OpenBrace,
    CloseBrace,
    OpenSquare,
    CloseSquare,
    Comma,
    Colon,
    DoubleQuoted(&'a [u8]),
    SingleQuoted(&'a [u8]),
    Quoteless(&'a [u8]),
    Multiline(MultilineRef<'a>),
    EndOfInput,
}

/// A scanned multiline string, ready for emission.
///
/// `body` spans from the first byte after the opening line's newline up to
/// (not including) the terminating backtick; it still contains the margin of
/// every line, which the emitter skips using `margin.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MultilineRef<'a> {
    pub body: &'a [u8],
    pub margin: &'a [u8],
    /// True when the newline specifier was `\r\n`.
    pub crlf: bool,
}

pub(crate) struct Tokenizer<'a> {
    input: Input<'a>,
    pos: Pos,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: Input<'a>) -> Self {
        Tokenizer {
            input,
            pos: Pos::start(),
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.bytes
    }

    fn at_end(&self) -> bool {
        self.pos.offset >= self.bytes().len()
    }

    fn byte(&self) -> u8 {
        self.bytes()[self.pos.offset]
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes().get(self.pos.offset + ahead).copied()
    }

    #[inline]
    fn bump(&mut self, n: usize) {
        self.pos.offset += n;
    }

    /// Consumes a newline of the given width and opens a new line.
    #[inline]
    fn bump_newline(&mut self, width: usize) {
        self.pos.offset += width;
        self.pos.line_start = self.pos.offset;
        self.pos.line += 1;
    }

    fn error(&self, kind: ErrorKind, pos: Pos) -> crate::error::DecodeError {
        self.input.error(kind, pos)
    }

    /// Consumes one validated character, `controls` deciding whether C0
    /// bytes are acceptable here.
    fn bump_char(&mut self, controls: bool) -> Result<()> {
        match scan_char(self.bytes(), self.pos.offset) {
            Ok(Scanned::Control(_)) if !controls => {
                Err(self.error(ErrorKind::InvalidChar, self.pos))
            }
            Ok(scanned) => {
                self.bump(scanned.width());
                Ok(())
            }
            Err(kind) => Err(self.error(kind, self.pos)),
        }
    }

    /// Produces the next non-trivial token.
    pub(crate) fn next_token(&mut self) -> Result<Token<'a>> {
        self.skip_trivia()?;
        let pos = self.pos;
        if self.at_end() {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                pos,
            });
        }
        let kind = match self.byte() {
            b'{' => self.delimiter(TokenKind::OpenBrace),
            b'}' => self.delimiter(TokenKind::CloseBrace),
            b'[' => self.delimiter(TokenKind::OpenSquare),
            b']' => self.delimiter(TokenKind::CloseSquare),
            b',' => self.delimiter(TokenKind::Comma),
            b':' => self.delimiter(TokenKind::Colon),
            b'"' => self.quoted(
                b'"',
                ErrorKind::UnclosedDoubleQuoteString,
                ErrorKind::NewlineInDoubleQuoteString,
            )?,
            b'\'' => self.quoted(
                b'\'',
                ErrorKind::UnclosedSingleQuoteString,
                ErrorKind::NewlineInSingleQuoteString,
            )?,
            b'`' => self.multiline()?,
            _ => self.quoteless()?,
        };
        Ok(Token { kind, pos })
    }

    fn delimiter(&mut self, kind: TokenKind<'a>) -> TokenKind<'a> {
        self.bump(1);
        kind
    }

    /// Skips whitespace, newlines, and all three comment forms.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            let w = whitespace_width(self.bytes(), self.pos.offset);
            if w > 0 {
                self.bump(w);
                continue;
            }
            let n = newline_width(self.bytes(), self.pos.offset);
            if n > 0 {
                self.bump_newline(n);
                continue;
            }
            match self.peek(0) {
                Some(b'#') => self.line_comment(1)?,
                Some(b'/') if self.peek(1) == Some(b'/') => self.line_comment(2)?,
                Some(b'/') if self.peek(1) == Some(b'*') => self.block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Consumes a line comment up to, but not past, the next newline.
    fn line_comment(&mut self, marker: usize) -> Result<()> {
        self.bump(marker);
        while !self.at_end() && newline_width(self.bytes(), self.pos.offset) == 0 {
            self.bump_char(true)?;
        }
        Ok(())
    }

    fn block_comment(&mut self) -> Result<()> {
        let open = self.pos;
        self.bump(2);
        loop {
            if self.at_end() {
                return Err(self.error(ErrorKind::UnclosedSlashStarComment, open));
            }
            if self.byte() == b'*' && self.peek(1) == Some(b'/') {
                self.bump(2);
                return Ok(());
            }
            let n = newline_width(self.bytes(), self.pos.offset);
            if n > 0 {
                self.bump_newline(n);
            } else {
                self.bump_char(true)?;
            }
        }
    }

    /// Scans a single-line quoted string. Escape *validity* is checked by the
    /// emitter; the scan only needs to not mistake an escaped quote for the
    /// terminator.
    fn quoted(
        &mut self,
        quote: u8,
        unclosed: ErrorKind,
        newline_err: ErrorKind,
    ) -> Result<TokenKind<'a>> {
        let open = self.pos;
        self.bump(1);
        loop {
            if self.at_end() {
                return Err(self.error(unclosed, open));
            }
            let b = self.byte();
            if b == quote {
                let body = &self.bytes()[open.offset + 1..self.pos.offset];
                self.bump(1);
                return Ok(if quote == b'"' {
                    TokenKind::DoubleQuoted(body)
                } else {
                    TokenKind::SingleQuoted(body)
                });
            }
            if b == b'\\' {
                self.bump(1);
                if self.at_end() {
                    return Err(self.error(unclosed, open));
                }
            }
            if newline_width(self.bytes(), self.pos.offset) > 0 {
                return Err(self.error(newline_err, self.pos));
            }
            self.bump_char(false)?;
        }
    }

    fn skip_inline_whitespace(&mut self) {
        loop {
            let w = whitespace_width(self.bytes(), self.pos.offset);
            if w == 0 {
                return;
            }
            self.bump(w);
        }
    }

    /// Scans a multiline string, validating the margin of every line.
    fn multiline(&mut self) -> Result<TokenKind<'a>> {
        let open = self.pos;
        let margin = &self.bytes()[open.line_start..open.offset];
        let mut i = open.line_start;
        while i < open.offset {
            let w = whitespace_width(self.bytes(), i);
            if w == 0 {
                let at = Pos {
                    offset: i,
                    ..open
                };
                return Err(self.error(ErrorKind::MarginMustBeWhitespaceOnly, at));
            }
            i += w;
        }
        self.bump(1);
        self.skip_inline_whitespace();

        // The newline specifier is the literal two- or four-byte text `\n`
        // or `\r\n`, not an actual newline.
        let crlf = match self.peek(0) {
            Some(b'\\') => {
                if self.peek(1) == Some(b'n') {
                    self.bump(2);
                    false
                } else if self.peek(1) == Some(b'r')
                    && self.peek(2) == Some(b'\\')
                    && self.peek(3) == Some(b'n')
                {
                    self.bump(4);
                    true
                } else {
                    return Err(self.error(ErrorKind::InvalidNewlineSpecifier, self.pos));
                }
            }
            _ => return Err(self.error(ErrorKind::MissingNewlineSpecifier, self.pos)),
        };

        self.skip_inline_whitespace();
        match self.peek(0) {
            Some(b'#') => self.line_comment(1)?,
            Some(b'/') if self.peek(1) == Some(b'/') => self.line_comment(2)?,
            _ => {}
        }
        if self.at_end() {
            return Err(self.error(ErrorKind::UnclosedMultiline, open));
        }
        let n = newline_width(self.bytes(), self.pos.offset);
        if n == 0 {
            return Err(self.error(ErrorKind::InvalidMultilineStart, self.pos));
        }
        self.bump_newline(n);

        let body_start = self.pos.offset;
        loop {
            self.match_margin(margin, open)?;
            // Content bytes of one line.
            loop {
                if self.at_end() {
                    return Err(self.error(ErrorKind::UnclosedMultiline, open));
                }
                if self.byte() == b'`' {
                    if self.peek(1) == Some(b'\\') {
                        // Literal backtick in content.
                        self.bump(2);
                        continue;
                    }
                    let body = &self.bytes()[body_start..self.pos.offset];
                    self.bump(1);
                    return Ok(TokenKind::Multiline(MultilineRef { body, margin, crlf }));
                }
                let n = newline_width(self.bytes(), self.pos.offset);
                if n > 0 {
                    self.bump_newline(n);
                    break;
                }
                self.bump_char(true)?;
            }
        }
    }

    /// Requires the current line to start with the exact margin bytes.
    fn match_margin(&mut self, margin: &[u8], open: Pos) -> Result<()> {
        for &m in margin {
            if self.at_end() {
                return Err(self.error(ErrorKind::UnclosedMultiline, open));
            }
            if self.byte() != m {
                return Err(self.error(ErrorKind::InvalidMarginChar, self.pos));
            }
            self.bump(1);
        }
        Ok(())
    }

    /// Scans a quoteless string.
    ///
    /// Stops at structural punctuation, comments, and newlines. A `:` only
    /// stops the scan when the 13 bytes before it do not open an ISO-8601
    /// date-time that continues through the remaining input.
    fn quoteless(&mut self) -> Result<TokenKind<'a>> {
        let start = self.pos;
        let mut end = start.offset;
        loop {
            if self.at_end() {
                break;
            }
            let b = self.byte();
            match b {
                b',' | b'{' | b'}' | b'[' | b']' | b'#' => break,
                b'/' if matches!(self.peek(1), Some(b'/' | b'*')) => break,
                b':' => {
                    let at = self.pos.offset;
                    if at - self.pos.line_start >= 13 {
                        if let Some(len) = datetime::match_len(&self.bytes()[at - 13..]) {
                            self.bump(len - 13);
                            end = self.pos.offset;
                            continue;
                        }
                    }
                    break;
                }
                _ => {}
            }
            if newline_width(self.bytes(), self.pos.offset) > 0 {
                break;
            }
            let w = whitespace_width(self.bytes(), self.pos.offset);
            if w > 0 {
                // Interior whitespace stays in the slice; it only counts as
                // content once a non-whitespace byte follows it.
                self.bump(w);
                continue;
            }
            self.bump_char(false)?;
            end = self.pos.offset;
        }
        let body = &self.bytes()[start.offset..end];
        if body.is_empty() {
            return Ok(TokenKind::EndOfInput);
        }
        Ok(TokenKind::Quoteless(body))
    }
}
