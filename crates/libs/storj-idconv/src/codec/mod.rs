//! Individual decoders and encoders.
//!
//! Decoders turn a string into bytes or say why they can't. Encoders turn
//! bytes into a string or return `None` when the format is not a meaningful
//! representation of those bytes. An empty string is never a valid rendering.

pub mod base32;
pub mod base58;
pub mod base64;
pub mod file;
pub mod hex;
pub mod node;
pub mod text;

use crate::error::DecodeError;
use crate::types::IdentifierBytes;

pub trait Decode: Send + Sync {
    fn decode(&self, input: &str) -> Result<IdentifierBytes, DecodeError>;
}

impl<F> Decode for F
where
    F: Fn(&str) -> Result<IdentifierBytes, DecodeError> + Send + Sync,
{
    fn decode(&self, input: &str) -> Result<IdentifierBytes, DecodeError> {
        self(input)
    }
}

/// Out-of-band facts about the request an encoder may need.
///
/// Passed explicitly on every call; encoders hold no state of their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeContext<'a> {
    /// `host:port` the bytes were resolved from, if any.
    pub address: Option<&'a str>,
}

impl<'a> EncodeContext<'a> {
    pub fn with_address(address: &'a str) -> Self {
        Self { address: Some(address) }
    }
}

pub trait Encode: Send + Sync {
    fn encode(&self, bytes: &[u8], context: &EncodeContext<'_>) -> Option<String>;
}

impl<F> Encode for F
where
    F: Fn(&[u8], &EncodeContext<'_>) -> Option<String> + Send + Sync,
{
    fn encode(&self, bytes: &[u8], context: &EncodeContext<'_>) -> Option<String> {
        self(bytes, context)
    }
}

pub(crate) fn non_empty(rendered: String) -> Option<String> {
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}
