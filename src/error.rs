//! Crate-level failure aggregation for process startup.

use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Everything that can go wrong before the workflows are reachable:
/// reading configuration or installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::*;

    #[test]
    fn wraps_config_and_telemetry_failures() {
        let from_config: StartupError = ConfigError::InvalidNumber {
            key: "SLA_RESOLUTION_MINUTES",
        }
        .into();
        assert!(matches!(from_config, StartupError::Config(_)));

        let source = match EnvFilter::try_new("queue=verbose") {
            Err(err) => err,
            Ok(_) => panic!("directive should not parse"),
        };
        let from_telemetry: StartupError = TelemetryError::BadFilter {
            directive: "queue=verbose".to_string(),
            source,
        }
        .into();
        assert!(matches!(from_telemetry, StartupError::Telemetry(_)));
    }

    #[test]
    fn display_is_transparent_to_the_underlying_failure() {
        let err = StartupError::from(ConfigError::InvalidNumber { key: "APP_ENV" });
        assert_eq!(
            err.to_string(),
            ConfigError::InvalidNumber { key: "APP_ENV" }.to_string()
        );
    }
}
