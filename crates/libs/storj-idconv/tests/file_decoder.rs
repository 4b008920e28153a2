use std::io::Write;

use rcgen::{BasicConstraints, CertificateParams, IsCa, KeyPair};
use storj_idconv::codec::file::decode_identity_file;
use storj_idconv::engine::{FormatEngine, ResolveRequest};
use sha2::{Digest, Sha256};
use storj_idconv::node_id::NodeId;
use storj_idconv::registry::{DecoderRegistry, EncoderRegistry};

struct Identity {
    pem: String,
    ca_id: NodeId,
    leaf_id: NodeId,
}

fn identity_chain() -> Identity {
    let ca_key = KeyPair::generate().expect("ca key");
    let mut ca_params = CertificateParams::default();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca = ca_params.self_signed(&ca_key).expect("ca cert");

    let leaf_key = KeyPair::generate().expect("leaf key");
    let leaf = CertificateParams::default()
        .signed_by(&leaf_key, &ca, &ca_key)
        .expect("leaf cert");

    Identity {
        pem: format!("{}{}", leaf.pem(), ca.pem()),
        ca_id: storj_node_id(&ca_key.public_key_der()),
        leaf_id: storj_node_id(&leaf_key.public_key_der()),
    }
}

/// sha256(sha256(spki)) with the version byte (0) in last position.
fn storj_node_id(spki_der: &[u8]) -> NodeId {
    let mut bytes: [u8; 32] = Sha256::digest(Sha256::digest(spki_der)).into();
    bytes[31] = 0;
    NodeId::new(bytes)
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write pem");
    file.flush().expect("flush pem");
    file
}

#[test]
fn file_decoder_reads_the_ca_certificate() {
    let identity = identity_chain();
    let file = write_temp(&identity.pem);
    let path = file.path().to_str().expect("utf-8 temp path");

    let bytes = decode_identity_file(path).expect("decode identity");
    assert_eq!(bytes.as_slice(), identity.ca_id.as_slice());
    assert_ne!(bytes.as_slice(), identity.leaf_id.as_slice());
}

#[test]
fn engine_renders_identity_file_as_node_id() {
    let identity = identity_chain();
    let file = write_temp(&identity.pem);
    let path = file.path().to_str().expect("utf-8 temp path");

    let engine = FormatEngine::new(DecoderRegistry::offline(), EncoderRegistry::standard());
    let results = engine
        .resolve(&ResolveRequest::new(path).from_format(Some("file")).to_format(Some("nodeid")))
        .expect("resolve");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rendered, identity.ca_id.to_string());
}

#[test]
fn single_certificate_is_not_an_identity() {
    let key = KeyPair::generate().expect("key");
    let cert = CertificateParams::default().self_signed(&key).expect("cert");
    let file = write_temp(&cert.pem());
    let path = file.path().to_str().expect("utf-8 temp path");
    assert!(decode_identity_file(path).is_err());
}

#[test]
fn missing_and_non_pem_files_are_rejected() {
    assert!(decode_identity_file("/definitely/not/here/identity.cert").is_err());

    let file = write_temp("not a certificate\n");
    let path = file.path().to_str().expect("utf-8 temp path");
    assert!(decode_identity_file(path).is_err());
}
