//! JSON string emission for the four input string styles.
//!
//! Escape *scanning* happened in the tokenizer; this module decides what each
//! interior byte means and writes the JSON-quoted form. The only diagnosis
//! left at this stage is a malformed escape inside a quoted string, reported
//! at the byte offset of its backslash.

use crate::{
    error::{ErrorKind, Result},
    input::{Input, Pos, newline_width},
    outbuf::OutBuf,
    tokenizer::MultilineRef,
};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Emits a double-quoted input string as a JSON string.
pub(crate) fn double_quoted(
    out: &mut OutBuf,
    input: &Input<'_>,
    body: &[u8],
    open: Pos,
) -> Result<()> {
    quoted(out, input, body, open, b'"')
}

/// Emits a single-quoted input string as a JSON string.
pub(crate) fn single_quoted(
    out: &mut OutBuf,
    input: &Input<'_>,
    body: &[u8],
    open: Pos,
) -> Result<()> {
    quoted(out, input, body, open, b'\'')
}

fn quoted(out: &mut OutBuf, input: &Input<'_>, body: &[u8], open: Pos, quote: u8) -> Result<()> {
    out.push_byte(b'"');
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        match b {
            b'\\' => {
                // The tokenizer guarantees a byte follows every backslash.
                let e = body[i + 1];
                match e {
                    b'b' | b't' | b'n' | b'f' | b'r' | b'/' | b'\\' => {
                        out.push_slice(&body[i..i + 2]);
                        i += 2;
                    }
                    _ if e == quote => {
                        // The escaped own-quote: `\"` stays escaped, `\'`
                        // needs no escape in JSON.
                        if quote == b'"' {
                            out.push_slice(b"\\\"");
                        } else {
                            out.push_byte(b'\'');
                        }
                        i += 2;
                    }
                    b'u' if is_hex4(&body[i + 2..]) => {
                        out.push_slice(&body[i..i + 6]);
                        i += 6;
                    }
                    _ => {
                        return Err(input.error(ErrorKind::InvalidEscapeSequence, open.shifted(1 + i)));
                    }
                }
            }
            b'\t' => {
                out.push_slice(b"\\t");
                i += 1;
            }
            b'"' => {
                // Only reachable in single-quoted input; the double-quoted
                // scan stops at an unescaped quote.
                out.push_slice(b"\\\"");
                i += 1;
            }
            b'/' if i > 0 && body[i - 1] == b'<' => {
                out.push_slice(b"\\/");
                i += 1;
            }
            _ => {
                out.push_byte(b);
                i += 1;
            }
        }
    }
    out.push_byte(b'"');
    Ok(())
}

fn is_hex4(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4].iter().all(u8::is_ascii_hexdigit)
}

/// Emits a quoteless string as a JSON string. Backslash and double quote are
/// the only bytes with meaning to JSON here; nothing in the body is an
/// escape.
pub(crate) fn quoteless(out: &mut OutBuf, body: &[u8]) {
    out.push_byte(b'"');
    for (i, &b) in body.iter().enumerate() {
        match b {
            b'\\' => out.push_slice(b"\\\\"),
            b'"' => out.push_slice(b"\\\""),
            b'\t' => out.push_slice(b"\\t"),
            b'/' if i > 0 && body[i - 1] == b'<' => out.push_slice(b"\\/"),
            _ => out.push_byte(b),
        }
    }
    out.push_byte(b'"');
}

/// Emits a multiline string as a JSON string.
///
/// Walks the raw body, skipping the margin of every line. Each interior
/// newline becomes the escape selected by the newline specifier, except the
/// one directly in front of the terminator line. Control bytes are permitted
/// in multiline content and escaped here.
pub(crate) fn multiline(out: &mut OutBuf, ml: &MultilineRef<'_>) {
    let body = ml.body;
    let newline: &[u8] = if ml.crlf { b"\\r\\n" } else { b"\\n" };
    out.push_byte(b'"');
    let mut i = ml.margin.len();
    while i < body.len() {
        let b = body[i];
        let n = newline_width(body, i);
        if n > 0 {
            i += n + ml.margin.len();
            if i >= body.len() {
                // The closing backtick sat right after this line's margin;
                // its newline is not content.
                break;
            }
            out.push_slice(newline);
            continue;
        }
        match b {
            b'`' if body.get(i + 1) == Some(&b'\\') => {
                out.push_byte(b'`');
                i += 2;
            }
            b'\\' => {
                out.push_slice(b"\\\\");
                i += 1;
            }
            b'"' => {
                out.push_slice(b"\\\"");
                i += 1;
            }
            b'\t' => {
                out.push_slice(b"\\t");
                i += 1;
            }
            0x08 => {
                out.push_slice(b"\\b");
                i += 1;
            }
            0x0C => {
                out.push_slice(b"\\f");
                i += 1;
            }
            b'\r' => {
                // A carriage return not followed by a line feed.
                out.push_slice(b"\\r");
                i += 1;
            }
            _ if b < 0x20 => {
                out.push_slice(&[b'\\', b'u', b'0', b'0']);
                out.push_byte(HEX[(b >> 4) as usize]);
                out.push_byte(HEX[(b & 0x0F) as usize]);
                i += 1;
            }
            b'/' if i > 0 && body[i - 1] == b'<' => {
                out.push_slice(b"\\/");
                i += 1;
            }
            _ => {
                out.push_byte(b);
                i += 1;
            }
        }
    }
    out.push_byte(b'"');
}
