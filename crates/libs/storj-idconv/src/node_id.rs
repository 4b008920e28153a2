use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::types::IdentifierBytes;

pub const NODE_ID_SIZE: usize = 32;

/// Node ID derivation scheme. The number is stored in the last byte of the
/// ID and used as the Base58Check version prefix of its textual form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdVersion {
    /// Double SHA-256 over the CA certificate's SubjectPublicKeyInfo.
    #[default]
    V0,
}

impl IdVersion {
    pub const fn number(self) -> u8 {
        match self {
            Self::V0 => 0,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Self::V0),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NodeIdError {
    #[error("not enough bytes to make a node id; have {actual}, need {NODE_ID_SIZE}")]
    Length { actual: usize },

    #[error("invalid node id string: {0}")]
    Base58(#[from] bs58::decode::Error),
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId([u8; NODE_ID_SIZE]);

impl NodeId {
    pub const fn new(bytes: [u8; NODE_ID_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NodeIdError> {
        let bytes: [u8; NODE_ID_SIZE] =
            bytes.try_into().map_err(|_| NodeIdError::Length { actual: bytes.len() })?;
        Ok(Self(bytes))
    }

    /// Hashes a DER-encoded SubjectPublicKeyInfo twice with SHA-256 into a
    /// versioned node ID.
    pub fn from_public_key_der(spki_der: &[u8], version: IdVersion) -> Self {
        let digest: [u8; NODE_ID_SIZE] = Sha256::digest(Sha256::digest(spki_der)).into();
        Self(digest).with_version(version)
    }

    pub fn with_version(mut self, version: IdVersion) -> Self {
        self.0[NODE_ID_SIZE - 1] = version.number();
        self
    }

    /// Unknown version bytes read as [`IdVersion::V0`].
    pub fn version(&self) -> IdVersion {
        IdVersion::from_number(self.0[NODE_ID_SIZE - 1]).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8; NODE_ID_SIZE] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn unversioned(&self) -> [u8; NODE_ID_SIZE] {
        let mut bytes = self.0;
        bytes[NODE_ID_SIZE - 1] = 0;
        bytes
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bs58::encode(self.unversioned())
            .with_check_version(self.version().number())
            .into_string();
        f.write_str(&encoded)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}

impl FromStr for NodeId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s).with_check(None).into_vec()?;
        let Some((&version, payload)) = decoded.split_first() else {
            return Err(NodeIdError::Length { actual: 0 });
        };
        let version = IdVersion::from_number(version).unwrap_or_default();
        Ok(Self::from_bytes(payload)?.with_version(version))
    }
}

impl From<NodeId> for IdentifierBytes {
    fn from(id: NodeId) -> Self {
        IdentifierBytes::new(id.0.to_vec())
    }
}
