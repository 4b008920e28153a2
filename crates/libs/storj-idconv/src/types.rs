use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// Raw bytes produced by a decoder.
///
/// Node IDs are 32 bytes, but other payloads (certificate-derived IDs,
/// arbitrary hex) can be any length, so nothing here assumes a size.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct IdentifierBytes(Vec<u8>);

impl IdentifierBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for IdentifierBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for IdentifierBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for IdentifierBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for IdentifierBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for IdentifierBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentifierBytes({})", hex::encode(&self.0))
    }
}

/// One row of a resolution: `rendered` is `source_format` input re-encoded
/// as `destination_format`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub source_format: &'static str,
    pub destination_format: &'static str,
    pub rendered: String,
}
