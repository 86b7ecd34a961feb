//! Decoder for QJSON, a human-friendly superset of JSON.
//!
//! QJSON relaxes JSON with comments (`#`, `//`, `/* */`), optional commas,
//! optional top-level braces, unquoted and single-quoted strings, multiline
//! strings with explicit margins, literal names (`on`, `off`, `yes`, `no`,
//! …), numeric expressions (`0xff | 0b1`, `(1 + 2) * 3`), ISO-8601
//! date-times converted to epoch seconds, and duration values such as
//! `1w2d3h4m5s`. The decoder turns such text into canonical JSON.
//!
//! Decoding is a single pass over borrowed bytes; the input does not need to
//! be pre-validated UTF-8.
//!
//! ```rust
//! let json = qjson::decode(b"a: 1, b: on  // enabled").unwrap();
//! assert_eq!(json, r#"{"a":1,"b":true}"#);
//!
//! let err = qjson::decode(b"{ a: 1").unwrap_err();
//! assert_eq!(err.to_string(), "unclosed object at line 1 col 1");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod emit;
mod error;
mod input;
mod number;
mod outbuf;
mod tokenizer;

#[cfg(test)]
mod tests;

use alloc::string::String;

pub use error::{DecodeError, ErrorKind};

/// Decodes QJSON text into canonical JSON text.
///
/// The input is an arbitrary byte sequence; UTF-8 validity is checked during
/// decoding and reported like any other diagnostic. Empty input decodes to
/// `"{}"`; every successful result is a JSON object.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first diagnosed problem and the
/// 1-based line and code-point column of the offending byte.
pub fn decode(input: &[u8]) -> Result<String, DecodeError> {
    decoder::decode(input)
}

/// Decodes QJSON text, rendering failures as a flat diagnostic string.
///
/// On success the result is a JSON document starting with `{`; on failure it
/// is `"<error text> at line L col C"`, which never starts with `{`. Useful
/// at boundaries where only one string can travel, such as an FFI surface.
#[must_use]
pub fn decode_to_string(input: &[u8]) -> String {
    match decode(input) {
        Ok(json) => json,
        Err(err) => {
            use alloc::string::ToString;
            err.to_string()
        }
    }
}

/// The decoder version and the QJSON syntax version it implements.
#[must_use]
pub fn version() -> &'static str {
    concat!("qjson-rs: v", env!("CARGO_PKG_VERSION"), " syntax: v0.9.0")
}
