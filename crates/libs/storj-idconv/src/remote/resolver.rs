use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use rustls::pki_types::ServerName;
use rustls::ClientConfig;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_rustls::TlsConnector;

use super::ephemeral::{self, EphemeralIdentity};
use super::verifier::AcceptAnyServerCert;
use super::{probe, Connector, ResolveError, ResolverConfig, TcpConnector, DRPC_MUX_HEADER};
use crate::cert::{self, CA_INDEX};
use crate::types::IdentifierBytes;

/// Grace period for sending close_notify before the socket is dropped.
const CLOSE_GRACE: Duration = Duration::from_millis(250);

/// Splits `host:port`, accepting bracketed IPv6 hosts. Never touches the
/// network.
pub fn split_host_port(address: &str) -> Result<(&str, u16), ResolveError> {
    let invalid = || ResolveError::InvalidAddress(address.to_string());
    let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
    let host = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
    if host.is_empty() {
        return Err(invalid());
    }
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    Ok((host, port))
}

/// Dials `address` over TCP and returns the node ID the peer presents.
pub async fn resolve_remote_id(
    address: &str,
    config: &ResolverConfig,
) -> Result<IdentifierBytes, ResolveError> {
    resolve_remote_id_with(&TcpConnector, address, config).await
}

/// Same as [`resolve_remote_id`] over a caller-supplied connector.
///
/// The address is validated before the connector is touched. Every stream
/// the connector hands out is owned by this future, so it is released on
/// success, on error, on timeout and when the future is dropped.
pub async fn resolve_remote_id_with<C: Connector>(
    connector: &C,
    address: &str,
    config: &ResolverConfig,
) -> Result<IdentifierBytes, ResolveError> {
    let (host, _port) = split_host_port(address)?;
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| ResolveError::InvalidAddress(address.to_string()))?;

    let lookup = async {
        trace!("remote-id {address}: idle -> generating identity");
        let identity = ephemeral::generate(config.identity_timeout).await?;
        trace!("remote-id {address}: identity generated ({})", identity.node_id());
        let tls = client_config(&identity)?;
        handshake(connector, address, server_name, tls, config.send_mux_header).await
    };

    match tokio::time::timeout(config.timeout, lookup).await {
        Ok(Ok(id)) => {
            trace!("remote-id {address}: closed");
            Ok(id)
        }
        Ok(Err(err)) => {
            trace!("remote-id {address}: failed: {err}");
            Err(err)
        }
        Err(_) => {
            trace!("remote-id {address}: failed: timed out");
            Err(ResolveError::Timeout(config.timeout))
        }
    }
}

fn client_config(identity: &EphemeralIdentity) -> Result<Arc<ClientConfig>, ResolveError> {
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let verifier = AcceptAnyServerCert::new(&provider);
    let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_protocol_versions(&[&rustls::version::TLS13])?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_client_auth_cert(identity.chain(), identity.private_key())?;
    Ok(Arc::new(config))
}

async fn handshake<C: Connector>(
    connector: &C,
    address: &str,
    server_name: ServerName<'static>,
    tls: Arc<ClientConfig>,
    send_mux_header: bool,
) -> Result<IdentifierBytes, ResolveError> {
    trace!("remote-id {address}: connecting");
    let mut stream = connector
        .connect(address)
        .await
        .map_err(|source| ResolveError::Dial { address: address.to_string(), source })?;
    if send_mux_header {
        stream
            .write_all(DRPC_MUX_HEADER)
            .await
            .map_err(|source| ResolveError::Dial { address: address.to_string(), source })?;
    }

    let mut session = TlsConnector::from(tls)
        .connect(server_name, stream)
        .await
        .map_err(|source| ResolveError::Handshake { address: address.to_string(), source })?;
    trace!("remote-id {address}: connected");

    if let Err(err) = probe::invoke_noop(&mut session).await {
        debug!("remote-id {address}: no-op call failed (ignored): {err}");
    }

    let peer_chain = session.get_ref().1.peer_certificates().map(<[_]>::to_vec);
    trace!("remote-id {address}: handshake complete");
    close(&mut session).await;

    let chain = peer_chain.ok_or(ResolveError::NoPeerIdentity)?;
    if chain.len() <= CA_INDEX {
        return Err(ResolveError::NoPeerIdentity);
    }
    Ok(cert::node_id_from_chain(&chain)?.into())
}

async fn close<S: AsyncWrite + Unpin>(session: &mut S) {
    if tokio::time::timeout(CLOSE_GRACE, session.shutdown()).await.is_err() {
        debug!("tls shutdown did not finish within {CLOSE_GRACE:?}");
    }
}
