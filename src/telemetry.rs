//! Log subscriber setup for the binaries.
//!
//! Events go to stderr so stdout stays free for attachment records.
//! `RUST_LOG` selects the filter (default `info`); `TESTCATALOG_LOG_FORMAT=json`
//! switches to one JSON object per event.

use std::env;
use tracing_subscriber::EnvFilter;

const LOG_FORMAT_ENV: &str = "TESTCATALOG_LOG_FORMAT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init() {
    let format = LogFormat::from_env_value(env::var(LOG_FORMAT_ENV).ok().as_deref());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
