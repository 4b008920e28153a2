use std::fmt;
use std::io;

use crate::cert::CertError;
use crate::remote::ResolveError;

/// Why a decoder rejected its input.
///
/// Every variant is recoverable: the engine treats any of them as "this
/// format does not apply" and moves on to the next decoder.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("malformed {format} input: {reason}")]
    Malformed { format: &'static str, reason: String },

    #[error("checksum mismatch")]
    Checksum,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("certificate error: {0}")]
    Certificate(#[from] CertError),

    #[error("remote lookup failed: {0}")]
    Remote(#[from] ResolveError),
}

impl DecodeError {
    pub fn malformed(format: &'static str, reason: impl fmt::Display) -> Self {
        Self::Malformed { format, reason: reason.to_string() }
    }
}

/// Which side of a conversion a format name was requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatRole {
    Source,
    Destination,
}

impl fmt::Display for FormatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("decoding"),
            Self::Destination => f.write_str("encoding"),
        }
    }
}

/// Hard errors of a resolution. Decoder and encoder failures never show up
/// here; only a caller naming a format that is not registered does.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown {role} format {name}. Use one of {}.", .known.join(","))]
    UnknownFormat { role: FormatRole, name: String, known: Vec<&'static str> },
}
