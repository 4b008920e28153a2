use std::path::Path;

use crate::cert;
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

/// Treats the input as a path to a PEM identity certificate chain.
pub fn decode_identity_file(input: &str) -> Result<IdentifierBytes, DecodeError> {
    let path = Path::new(input);
    std::fs::metadata(path)?;
    let id = cert::node_id_from_cert_path(path)?;
    Ok(id.into())
}
