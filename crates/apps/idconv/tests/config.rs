use std::io::Write;
use std::time::Duration;

use idconv_cli::config::{IdconvConfig, DEFAULT_HIDDEN_FORMATS};

#[test]
fn parses_full_config() {
    let config = IdconvConfig::from_toml(
        r#"
[remote]
timeout_secs = 4
identity_timeout_secs = 1
send_mux_header = false

[tool]
hidden_formats = ["file"]
"#,
    )
    .expect("parse");

    let resolver = config.resolver_config();
    assert_eq!(resolver.timeout, Duration::from_secs(4));
    assert_eq!(resolver.identity_timeout, Duration::from_secs(1));
    assert!(!resolver.send_mux_header);
    assert_eq!(config.tool.hidden_formats, vec!["file".to_string()]);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config = IdconvConfig::from_toml("[remote]\ntimeout_secs = 2\n").expect("parse");
    assert_eq!(config.remote.timeout_secs, 2);
    assert_eq!(config.remote.identity_timeout_secs, 3);
    assert!(config.remote.send_mux_header);
    assert_eq!(config.tool.hidden_formats, DEFAULT_HIDDEN_FORMATS.map(String::from).to_vec());
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(IdconvConfig::from_toml("[remote]\ndial_timeout_secs = 2\n").is_err());
}

#[test]
fn loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[tool]\nhidden_formats = []").expect("write config");

    let config = IdconvConfig::from_path(file.path()).expect("load");
    assert!(config.tool.hidden_formats.is_empty());

    let missing = IdconvConfig::load(Some(std::path::Path::new("/definitely/not/here.toml")));
    assert!(missing.is_err());
    assert_eq!(IdconvConfig::load(None).expect("defaults"), IdconvConfig::default());
}

#[test]
fn invalid_toml_is_invalid_data() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[remote\n").expect("write config");
    let err = IdconvConfig::from_path(file.path()).expect_err("invalid");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
