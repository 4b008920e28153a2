//! RFC 4648 base32 without padding, in three flavors.
//!
//! `path` uses the alphabet `abcdefghijklmnopqrstuvwxyz234567`, which is the
//! standard alphabet lowercased, so it is expressed as a case mapping over
//! [`BASE32_NOPAD`].

use data_encoding::BASE32_NOPAD;

use super::{non_empty, EncodeContext};
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

/// Strict: uppercase alphabet only.
pub fn decode_base32(input: &str) -> Result<IdentifierBytes, DecodeError> {
    BASE32_NOPAD
        .decode(input.as_bytes())
        .map(IdentifierBytes::from)
        .map_err(|err| DecodeError::malformed("base32", err))
}

/// Case-insensitive, as used by auth tokens and access grants.
pub fn decode_auth_base32(input: &str) -> Result<IdentifierBytes, DecodeError> {
    BASE32_NOPAD
        .decode(input.to_ascii_uppercase().as_bytes())
        .map(IdentifierBytes::from)
        .map_err(|err| DecodeError::malformed("auth-base32", err))
}

/// Lowercase-only path segment encoding.
pub fn decode_path(input: &str) -> Result<IdentifierBytes, DecodeError> {
    if let Some(position) = input.find(|c: char| c.is_ascii_uppercase()) {
        return Err(DecodeError::malformed(
            "path",
            format!("uppercase symbol at position {position}"),
        ));
    }
    BASE32_NOPAD
        .decode(input.to_ascii_uppercase().as_bytes())
        .map(IdentifierBytes::from)
        .map_err(|err| DecodeError::malformed("path", err))
}

pub fn encode_base32(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    non_empty(BASE32_NOPAD.encode(bytes))
}

pub fn encode_path(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    non_empty(BASE32_NOPAD.encode(bytes).to_ascii_lowercase())
}
