//! Looking up a remote peer's node ID.
//!
//! The peer is dialed with a throwaway identity over TLS that accepts any
//! server certificate, a no-op DRPC call is sent, and the node ID is read
//! from the CA certificate the peer presented during the handshake. Nothing
//! about the peer is authenticated; the result is only what it claims to be.

pub mod ephemeral;
pub mod probe;
pub mod resolver;
mod verifier;

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::cert::CertError;
use crate::codec::Decode;
use crate::error::DecodeError;
use crate::types::IdentifierBytes;

pub use ephemeral::{EphemeralIdentity, IdentityError};
pub use resolver::{resolve_remote_id, resolve_remote_id_with, split_host_port};

/// Written before the TLS ClientHello so Storj listeners route the
/// connection to their DRPC handler.
pub const DRPC_MUX_HEADER: &[u8; 8] = b"DRPC!!!1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Bound on the whole lookup, identity generation included.
    pub timeout: Duration,
    /// Bound on generating the ephemeral identity.
    pub identity_timeout: Duration,
    pub send_mux_header: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            identity_timeout: DEFAULT_IDENTITY_TIMEOUT,
            send_mux_header: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("doesn't look like a host:port: {0}")]
    InvalidAddress(String),

    #[error("ephemeral identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("tls configuration: {0}")]
    TlsConfig(#[from] rustls::Error),

    #[error("dial {address}: {source}")]
    Dial {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("tls handshake with {address}: {source}")]
    Handshake {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("peer presented no identity")]
    NoPeerIdentity,

    #[error("peer certificate: {0}")]
    PeerCertificate(#[from] CertError),
}

/// Opens the raw byte stream TLS runs over.
#[async_trait]
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(&self, address: &str) -> io::Result<Self::Stream>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, address: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(address).await?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

/// The `remote-id` decoder: treats the input as `host:port`.
///
/// Each call builds its own single-threaded runtime, so it can be used from
/// synchronous code. When invoked from inside a tokio runtime the lookup is
/// moved to a scoped thread.
#[derive(Clone, Debug, Default)]
pub struct RemoteIdDecoder {
    config: ResolverConfig,
}

impl RemoteIdDecoder {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    fn block_on_lookup(&self, address: &str) -> Result<IdentifierBytes, DecodeError> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        Ok(runtime.block_on(resolve_remote_id(address, &self.config))?)
    }
}

impl Decode for RemoteIdDecoder {
    fn decode(&self, input: &str) -> Result<IdentifierBytes, DecodeError> {
        split_host_port(input)?;
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_lookup(input);
        }
        std::thread::scope(|scope| {
            scope.spawn(|| self.block_on_lookup(input)).join().unwrap_or_else(|_| {
                warn!("remote-id lookup thread for {input} panicked");
                Err(DecodeError::Io(io::Error::other("remote-id lookup thread panicked")))
            })
        })
    }
}
