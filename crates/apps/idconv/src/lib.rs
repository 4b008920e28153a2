//! Command-line and stdio tool surfaces over `storj_idconv`.

pub mod config;
pub mod output;
pub mod tool;

/// `host:port` context for encoders: an explicit address wins, otherwise the
/// input itself when it looks like one.
pub fn address_context<'a>(input: &'a str, explicit: Option<&'a str>) -> Option<&'a str> {
    explicit.or_else(|| input.contains(':').then_some(input))
}

/// `warn` by default, `debug` with `-v`, `trace` from `-vv` on.
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
