mod decode_bad;
mod multiline;

use alloc::string::{String, ToString};

/// Decodes and panics with the diagnostic on failure.
pub(crate) fn ok(input: &str) -> String {
    match crate::decode(input.as_bytes()) {
        Ok(json) => json,
        Err(err) => panic!("expected success for {input:?}, got: {err}"),
    }
}

/// Decodes and returns the flat diagnostic, panicking on success.
pub(crate) fn fail(input: &str) -> String {
    match crate::decode(input.as_bytes()) {
        Ok(json) => panic!("expected failure for {input:?}, got: {json}"),
        Err(err) => err.to_string(),
    }
}
