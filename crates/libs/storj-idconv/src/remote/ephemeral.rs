//! Single-use TLS identities.
//!
//! An identity is a CA certificate plus a leaf signed by it, both over fresh
//! ECDSA P-256 keys. Storj identities normally grind the CA key until its
//! node ID meets a difficulty target; a throwaway identity skips that search
//! (difficulty 0). Nothing is ever written to disk.

use std::fmt;
use std::time::Duration;

use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyPair, KeyUsagePurpose,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use zeroize::Zeroizing;

use crate::cert::{self, CertError};
use crate::node_id::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("certificate generation failed: {0}")]
    Generation(#[from] rcgen::Error),

    #[error("generated certificate unreadable: {0}")]
    Certificate(#[from] CertError),

    #[error("identity generation exceeded {0:?}")]
    Timeout(Duration),

    #[error("identity generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub struct EphemeralIdentity {
    ca: CertificateDer<'static>,
    leaf: CertificateDer<'static>,
    leaf_key: Zeroizing<Vec<u8>>,
    node_id: NodeId,
}

impl EphemeralIdentity {
    /// Generates an identity on the calling thread.
    pub fn generate_blocking() -> Result<Self, IdentityError> {
        let ca_key = KeyPair::generate()?;
        let mut ca_params = CertificateParams::default();
        ca_params.distinguished_name = common_name("ephemeral ca");
        ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        ca_params.key_usages = vec![
            KeyUsagePurpose::KeyCertSign,
            KeyUsagePurpose::CrlSign,
            KeyUsagePurpose::DigitalSignature,
        ];
        let ca_cert = ca_params.self_signed(&ca_key)?;

        let leaf_key = KeyPair::generate()?;
        let mut leaf_params = CertificateParams::default();
        leaf_params.distinguished_name = common_name("ephemeral leaf");
        leaf_params.is_ca = IsCa::NoCa;
        leaf_params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
        leaf_params.extended_key_usages =
            vec![ExtendedKeyUsagePurpose::ServerAuth, ExtendedKeyUsagePurpose::ClientAuth];
        let leaf_cert = leaf_params.signed_by(&leaf_key, &ca_cert, &ca_key)?;

        let node_id = cert::node_id_from_cert(ca_cert.der())?;
        Ok(Self {
            ca: ca_cert.der().clone(),
            leaf: leaf_cert.der().clone(),
            leaf_key: Zeroizing::new(leaf_key.serialize_der()),
            node_id,
        })
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The chain presented to the peer: leaf first, then the CA.
    pub fn chain(&self) -> Vec<CertificateDer<'static>> {
        vec![self.leaf.clone(), self.ca.clone()]
    }

    pub fn private_key(&self) -> PrivateKeyDer<'static> {
        PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(self.leaf_key.to_vec()))
    }
}

impl fmt::Debug for EphemeralIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralIdentity").field("node_id", &self.node_id).finish_non_exhaustive()
    }
}

/// Generates an identity off the async executor, giving up after `deadline`.
pub async fn generate(deadline: Duration) -> Result<EphemeralIdentity, IdentityError> {
    let task = tokio::task::spawn_blocking(EphemeralIdentity::generate_blocking);
    match tokio::time::timeout(deadline, task).await {
        Ok(joined) => joined?,
        Err(_) => Err(IdentityError::Timeout(deadline)),
    }
}

fn common_name(name: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, name);
    dn
}
