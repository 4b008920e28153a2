//! Format resolution: try every plausible decoder on an input, feed every
//! success to every plausible encoder, and keep the renderings worth showing.

use std::collections::HashSet;

use log::{debug, trace};

use crate::codec::EncodeContext;
use crate::error::{EngineError, FormatRole};
use crate::registry::{DecoderRegistry, EncoderRegistry};
use crate::remote::ResolverConfig;
use crate::types::ConversionResult;

/// How repeated renderings are collapsed. The first one in name order wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep every rendering.
    None,
    /// Within one decoded value, drop encoders that repeat an earlier string.
    #[default]
    PerSource,
    /// Across all decoded values, keep each distinct string once.
    Global,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveRequest<'a> {
    pub input: &'a str,
    pub source: Option<&'a str>,
    pub destination: Option<&'a str>,
    /// Handed to encoders through [`EncodeContext`].
    pub address: Option<&'a str>,
    pub dedup: DedupPolicy,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, ..Self::default() }
    }

    pub fn from_format(mut self, source: Option<&'a str>) -> Self {
        self.source = source;
        self
    }

    pub fn to_format(mut self, destination: Option<&'a str>) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_address(mut self, address: Option<&'a str>) -> Self {
        self.address = address;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }
}

/// Every rendering produced from one successful decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMatch {
    pub source_format: &'static str,
    pub results: Vec<ConversionResult>,
}

/// Answer of the tool-style conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted(Vec<ConversionResult>),
    NoMatch { attempted: Vec<&'static str> },
}

impl ConvertOutcome {
    /// Human-readable lines, one per conversion.
    pub fn lines(&self, id: &str) -> Vec<String> {
        match self {
            Self::Converted(results) => results
                .iter()
                .map(|result| {
                    format!(
                        "ID {id} is converted from {} to {}: {}",
                        result.source_format, result.destination_format, result.rendered
                    )
                })
                .collect(),
            Self::NoMatch { attempted } => vec![format!(
                "Couldn't read the source string with any of the known encodings: {}",
                attempted.join(",")
            )],
        }
    }
}

#[derive(Debug)]
pub struct FormatEngine {
    decoders: DecoderRegistry,
    encoders: EncoderRegistry,
}

impl FormatEngine {
    pub fn new(decoders: DecoderRegistry, encoders: EncoderRegistry) -> Self {
        Self { decoders, encoders }
    }

    pub fn standard(remote: ResolverConfig) -> Self {
        Self::new(DecoderRegistry::standard(remote), EncoderRegistry::standard())
    }

    /// Removes the named formats from both registries.
    pub fn without<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|name| name.as_ref().to_owned()).collect();
        Self { decoders: self.decoders.without(&names), encoders: self.encoders.without(&names) }
    }

    pub fn decoders(&self) -> &DecoderRegistry {
        &self.decoders
    }

    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    pub fn resolve(
        &self,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<ConversionResult>, EngineError> {
        Ok(self.resolve_grouped(request)?.into_iter().flat_map(|found| found.results).collect())
    }

    /// Same as [`resolve`](Self::resolve), grouped by the decoder that
    /// accepted the input. A decoder that succeeded but yielded no rendering
    /// still gets an (empty) group.
    ///
    /// Conversions from a format to itself are skipped unless the caller
    /// forced the source format.
    pub fn resolve_grouped(
        &self,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<SourceMatch>, EngineError> {
        let decoders = self.decoders.select(request.source, FormatRole::Source)?;
        let encoders = self.encoders.select(request.destination, FormatRole::Destination)?;
        let context = EncodeContext { address: request.address };
        let mut seen_globally = HashSet::new();
        let mut matches = Vec::new();

        for (source_format, decoder) in decoders {
            let bytes = match decoder.decode(request.input) {
                Ok(bytes) => bytes,
                Err(err) => {
                    debug!("{source_format} rejected input: {err}");
                    continue;
                }
            };
            trace!("{source_format} decoded {} byte(s)", bytes.len());

            let mut seen_in_source = HashSet::new();
            let mut results = Vec::new();
            for &(destination_format, encoder) in &encoders {
                if request.source.is_none() && destination_format == source_format {
                    continue;
                }
                let Some(rendered) = encoder.encode(&bytes, &context) else {
                    continue;
                };
                if rendered.is_empty() {
                    continue;
                }
                let fresh = match request.dedup {
                    DedupPolicy::None => true,
                    DedupPolicy::PerSource => seen_in_source.insert(rendered.clone()),
                    DedupPolicy::Global => seen_globally.insert(rendered.clone()),
                };
                if !fresh {
                    trace!("{source_format} -> {destination_format} repeats an earlier rendering");
                    continue;
                }
                results.push(ConversionResult {
                    source_format,
                    destination_format,
                    rendered,
                });
            }
            matches.push(SourceMatch { source_format, results });
        }

        Ok(matches)
    }

    /// Tool-style conversion of `id` into `destination` from whatever
    /// format it happens to be in.
    ///
    /// The destination name is matched case-insensitively and nothing is
    /// reported from the decoder of the same name. Identical renderings
    /// reached through different decoders are reported once.
    pub fn convert(&self, id: &str, destination: &str) -> Result<ConvertOutcome, EngineError> {
        let destination = destination.to_lowercase();
        let request = ResolveRequest::new(id)
            .to_format(Some(&destination))
            .with_dedup(DedupPolicy::Global);
        let results = self.resolve(&request)?;
        if results.is_empty() {
            let attempted = self
                .decoders
                .names()
                .into_iter()
                .filter(|name| *name != destination)
                .collect();
            return Ok(ConvertOutcome::NoMatch { attempted });
        }
        Ok(ConvertOutcome::Converted(results))
    }
}
