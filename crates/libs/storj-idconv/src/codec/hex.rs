use super::{non_empty, EncodeContext};
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

/// Accepts either case.
pub fn decode_hex(input: &str) -> Result<IdentifierBytes, DecodeError> {
    hex::decode(input).map(IdentifierBytes::from).map_err(|err| DecodeError::malformed("hex", err))
}

pub fn encode_hex(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    non_empty(hex::encode(bytes))
}
