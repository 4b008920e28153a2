use super::{non_empty, EncodeContext};

/// Only when the bytes are valid UTF-8.
pub fn encode_string(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    std::str::from_utf8(bytes).ok().map(str::to_owned).and_then(non_empty)
}

/// Passes anything through. Rust strings are UTF-8, so invalid sequences
/// come out as U+FFFD; use `hex` when the exact bytes matter.
pub fn encode_binary(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    non_empty(String::from_utf8_lossy(bytes).into_owned())
}
