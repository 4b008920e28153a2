use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use storj_idconv::remote::{ResolverConfig, DEFAULT_IDENTITY_TIMEOUT, DEFAULT_TIMEOUT};

/// Formats the tool server leaves out unless configured otherwise.
///
/// `remote-id` is hidden as well as `binary`, so a default tool call never
/// dials a peer.
pub const DEFAULT_HIDDEN_FORMATS: [&str; 2] = ["binary", "remote-id"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdconvConfig {
    pub remote: RemoteConfig,
    pub tool: ToolConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    pub timeout_secs: u64,
    pub identity_timeout_secs: u64,
    pub send_mux_header: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            identity_timeout_secs: DEFAULT_IDENTITY_TIMEOUT.as_secs(),
            send_mux_header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub hidden_formats: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { hidden_formats: DEFAULT_HIDDEN_FORMATS.iter().map(|name| name.to_string()).collect() }
    }
}

impl IdconvConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    /// Defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            timeout: Duration::from_secs(self.remote.timeout_secs),
            identity_timeout: Duration::from_secs(self.remote.identity_timeout_secs),
            send_mux_header: self.remote.send_mux_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let config = IdconvConfig::from_toml("").expect("parse");
        assert_eq!(config, IdconvConfig::default());
        assert_eq!(config.resolver_config(), ResolverConfig::default());
    }
}
