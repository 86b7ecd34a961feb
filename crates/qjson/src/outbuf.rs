//! The append-only JSON output buffer.

use alloc::{string::String, vec::Vec};

use bstr::ByteVec;

/// Accumulates the JSON output of one decode call.
///
/// Owned by the engine for the duration of the call, then surrendered as a
/// `String`. Every byte pushed into it is either ASCII punctuation produced
/// by the structure builder or a validated slice of the input, so the final
/// conversion never has anything to replace.
#[derive(Debug)]
pub(crate) struct OutBuf {
    bytes: Vec<u8>,
}

impl OutBuf {
    const INITIAL_CAPACITY: usize = 1024;

    pub(crate) fn new() -> Self {
        OutBuf {
            bytes: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    #[inline]
    pub(crate) fn push_byte(&mut self, b: u8) {
        self.bytes.push(b);
    }

    #[inline]
    pub(crate) fn push_slice(&mut self, s: &[u8]) {
        self.bytes.extend_from_slice(s);
    }

    #[inline]
    pub(crate) fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    /// Hands the accumulated JSON to the caller.
    pub(crate) fn into_string(self) -> String {
        self.bytes.into_string_lossy()
    }
}
