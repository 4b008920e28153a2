//! Padded base64, decoded leniently: non-zero trailing bits in the final
//! symbol are accepted, matching Go's `encoding/base64`.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use super::{non_empty, EncodeContext};
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true);

const BASE64_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const BASE64_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet, padded.
pub fn decode_base64(input: &str) -> Result<IdentifierBytes, DecodeError> {
    BASE64_URL_SAFE
        .decode(input)
        .map(IdentifierBytes::from)
        .map_err(|err| DecodeError::malformed("base64", err))
}

/// Standard alphabet, padded.
pub fn decode_base64_standard(input: &str) -> Result<IdentifierBytes, DecodeError> {
    BASE64_STANDARD
        .decode(input)
        .map(IdentifierBytes::from)
        .map_err(|err| DecodeError::malformed("base64s", err))
}

pub fn encode_base64(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    non_empty(BASE64_URL_SAFE.encode(bytes))
}
