//! Tracing subscriber installation for embedding binaries.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot parse log filter '{directive}'")]
    BadFilter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber install failed: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the process-wide subscriber. An explicit `RUST_LOG` takes
/// precedence over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::BadFilter {
            directive: config.log_level.clone(),
            source,
        })
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}
