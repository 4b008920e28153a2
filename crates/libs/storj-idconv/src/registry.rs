//! Name → codec tables.
//!
//! Names are part of the external interface (CLI flags, tool arguments) and
//! iteration is always lexicographic by name.

use std::collections::BTreeMap;
use std::fmt;

use crate::codec::{base32, base58, base64, file, hex, node, text, Decode, Encode};
use crate::error::{EngineError, FormatRole};
use crate::remote::{RemoteIdDecoder, ResolverConfig};

pub struct Registry<T: ?Sized> {
    entries: BTreeMap<&'static str, Box<T>>,
}

pub type DecoderRegistry = Registry<dyn Decode>;
pub type EncoderRegistry = Registry<dyn Encode>;

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name).map(|entry| &**entry)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &T)> + '_ {
        self.entries.iter().map(|(name, entry)| (*name, &**entry))
    }

    /// Drops the named entries. Unknown names are ignored.
    pub fn without<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.entries.remove(name.as_ref());
        }
        self
    }

    /// Every entry, or exactly the forced one.
    pub fn select(
        &self,
        forced: Option<&str>,
        role: FormatRole,
    ) -> Result<Vec<(&'static str, &T)>, EngineError> {
        let Some(name) = forced else {
            return Ok(self.iter().collect());
        };
        match self.entries.get_key_value(name) {
            Some((name, entry)) => Ok(vec![(*name, &**entry)]),
            None => Err(EngineError::UnknownFormat {
                role,
                name: name.to_string(),
                known: self.names(),
            }),
        }
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl Registry<dyn Decode> {
    /// Registering an existing name replaces its decoder.
    pub fn with_decoder(mut self, name: &'static str, decoder: impl Decode + 'static) -> Self {
        self.entries.insert(name, Box::new(decoder));
        self
    }

    /// Every decoder that works without touching the network.
    pub fn offline() -> Self {
        Self::new()
            .with_decoder("auth-base32", base32::decode_auth_base32)
            .with_decoder("base32", base32::decode_base32)
            .with_decoder("base58", base58::decode_base58)
            .with_decoder("base64", base64::decode_base64)
            .with_decoder("base64s", base64::decode_base64_standard)
            .with_decoder("file", file::decode_identity_file)
            .with_decoder("hex", hex::decode_hex)
            .with_decoder("path", base32::decode_path)
    }

    pub fn standard(remote: ResolverConfig) -> Self {
        Self::offline().with_decoder("remote-id", RemoteIdDecoder::new(remote))
    }
}

impl Registry<dyn Encode> {
    /// Registering an existing name replaces its encoder.
    pub fn with_encoder(mut self, name: &'static str, encoder: impl Encode + 'static) -> Self {
        self.entries.insert(name, Box::new(encoder));
        self
    }

    pub fn standard() -> Self {
        Self::new()
            .with_encoder("base32", base32::encode_base32)
            .with_encoder("base58", base58::encode_base58)
            .with_encoder("base64", base64::encode_base64)
            .with_encoder("binary", text::encode_binary)
            .with_encoder("hex", hex::encode_hex)
            .with_encoder("nodeid", node::encode_node_id)
            .with_encoder("nodeurl", node::encode_node_url)
            .with_encoder("path", base32::encode_path)
            .with_encoder("string", text::encode_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted() {
        let names = DecoderRegistry::standard(ResolverConfig::default()).names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(
            names,
            vec![
                "auth-base32",
                "base32",
                "base58",
                "base64",
                "base64s",
                "file",
                "hex",
                "path",
                "remote-id"
            ]
        );
    }

    #[test]
    fn without_builds_a_filtered_view() {
        let encoders = EncoderRegistry::standard().without(["binary", "not-registered"]);
        assert!(!encoders.contains("binary"));
        assert!(encoders.contains("hex"));
        assert_eq!(encoders.len(), 8);
    }

    #[test]
    fn select_unknown_lists_known_names() {
        let encoders = EncoderRegistry::standard();
        let Err(EngineError::UnknownFormat { role, name, known }) =
            encoders.select(Some("nope"), FormatRole::Destination)
        else {
            panic!("expected unknown format");
        };
        assert_eq!(role, FormatRole::Destination);
        assert_eq!(name, "nope");
        assert!(known.contains(&"hex"));
    }
}
