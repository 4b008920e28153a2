//! Storj identifier conversion.
//!
//! This crate turns the many textual shapes a Storj identifier shows up in
//! (node ID strings, hex dumps, base32 path segments, identity certificate
//! files, a live `host:port`) into raw bytes, and renders those bytes back
//! out in every representation that makes sense for them.
//!
//! - [`codec`] holds the individual decoders and encoders
//! - [`registry`] maps stable format names to them
//! - [`engine`] answers "what is this string, and what else could it be"
//! - [`remote`] fetches a peer's node ID over an insecure-trust TLS session
//!
//! ```no_run
//! use storj_idconv::engine::{FormatEngine, ResolveRequest};
//! use storj_idconv::remote::ResolverConfig;
//!
//! let engine = FormatEngine::standard(ResolverConfig::default());
//! for result in engine.resolve(&ResolveRequest::new("48656c6c6f"))? {
//!     println!("{} -> {}: {}", result.source_format, result.destination_format, result.rendered);
//! }
//! # Ok::<(), storj_idconv::error::EngineError>(())
//! ```

pub mod cert;
pub mod codec;
pub mod engine;
pub mod error;
pub mod node_id;
pub mod registry;
pub mod remote;
pub mod satellites;
pub mod types;

pub use engine::{ConvertOutcome, DedupPolicy, FormatEngine, ResolveRequest, SourceMatch};
pub use error::{DecodeError, EngineError, FormatRole};
pub use node_id::{IdVersion, NodeId, NodeIdError, NODE_ID_SIZE};
pub use registry::{DecoderRegistry, EncoderRegistry, Registry};
pub use types::{ConversionResult, IdentifierBytes};
