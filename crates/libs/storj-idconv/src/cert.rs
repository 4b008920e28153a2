//! Reading Storj identity certificates.
//!
//! A Storj peer presents the chain `[leaf, ca, ...]`. Its node ID is derived
//! from the CA certificate, never from the leaf.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use rustls::pki_types::CertificateDer;
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::node_id::{IdVersion, NodeId};

/// Position of the CA certificate in a presented chain. The leaf is at 0.
pub const CA_INDEX: usize = 1;

/// Extension a CA certificate uses to declare its node ID version.
pub const ID_VERSION_EXTENSION_OID: &str = "2.999.2.1";

#[derive(Debug, thiserror::Error)]
pub enum CertError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse PEM certs from {}: {source}", .path.display())]
    Pem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no certificates found in {}", .0.display())]
    Empty(PathBuf),

    #[error("no CA in identity certificate chain of {0} certificate(s)")]
    MissingCa(usize),

    #[error("invalid certificate: {0}")]
    Der(String),

    #[error("empty node id version extension")]
    EmptyVersionExtension,

    #[error("unknown node id version {0}")]
    UnknownVersion(u8),
}

pub fn load_cert_chain(path: &Path) -> Result<Vec<CertificateDer<'static>>, CertError> {
    let file =
        File::open(path).map_err(|source| CertError::Read { path: path.to_path_buf(), source })?;
    let mut reader = BufReader::new(file);
    let certificates = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| CertError::Pem { path: path.to_path_buf(), source })?;
    if certificates.is_empty() {
        return Err(CertError::Empty(path.to_path_buf()));
    }
    Ok(certificates)
}

/// Node ID of the identity stored at `path` (PEM chain with the CA second).
pub fn node_id_from_cert_path(path: &Path) -> Result<NodeId, CertError> {
    let chain = load_cert_chain(path)?;
    node_id_from_chain(&chain)
}

pub fn node_id_from_chain(chain: &[CertificateDer<'_>]) -> Result<NodeId, CertError> {
    let ca = chain.get(CA_INDEX).ok_or(CertError::MissingCa(chain.len()))?;
    node_id_from_cert(ca.as_ref())
}

/// Node ID of a single DER certificate treated as the identity's CA.
pub fn node_id_from_cert(cert_der: &[u8]) -> Result<NodeId, CertError> {
    let (_remaining, cert) =
        X509Certificate::from_der(cert_der).map_err(|err| CertError::Der(err.to_string()))?;
    let version = id_version(&cert)?;
    Ok(NodeId::from_public_key_der(cert.public_key().raw, version))
}

fn id_version(cert: &X509Certificate<'_>) -> Result<IdVersion, CertError> {
    let Some(extension) =
        cert.extensions().iter().find(|ext| ext.oid.to_id_string() == ID_VERSION_EXTENSION_OID)
    else {
        return Ok(IdVersion::V0);
    };
    let number = *extension.value.first().ok_or(CertError::EmptyVersionExtension)?;
    IdVersion::from_number(number).ok_or(CertError::UnknownVersion(number))
}
