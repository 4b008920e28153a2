//! Base58Check: payload prefixed by a version byte and followed by the first
//! four bytes of its double SHA-256.

use super::{non_empty, EncodeContext};
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

/// Version byte written by [`encode_base58`].
pub const DEFAULT_VERSION: u8 = 0;

/// Returns the payload and the version byte it was stored under.
pub fn check_decode(input: &str) -> Result<(Vec<u8>, u8), DecodeError> {
    let mut decoded = bs58::decode(input).with_check(None).into_vec().map_err(|err| match err {
        bs58::decode::Error::InvalidChecksum { .. } => DecodeError::Checksum,
        other => DecodeError::malformed("base58", other),
    })?;
    if decoded.is_empty() {
        return Err(DecodeError::malformed("base58", "missing version byte"));
    }
    let version = decoded.remove(0);
    Ok((decoded, version))
}

pub fn check_encode(payload: &[u8], version: u8) -> String {
    bs58::encode(payload).with_check_version(version).into_string()
}

/// Verifies the checksum; the version byte is dropped.
pub fn decode_base58(input: &str) -> Result<IdentifierBytes, DecodeError> {
    check_decode(input).map(|(payload, _version)| IdentifierBytes::from(payload))
}

pub fn encode_base58(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    non_empty(check_encode(bytes, DEFAULT_VERSION))
}
