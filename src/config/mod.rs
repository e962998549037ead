use std::env;
use std::fmt;

use chrono::Duration;

use crate::queue::{QueueConfig, RetryConfig};
use crate::workflows::ticketing::transitions::ReopenWindows;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Default SLA budgets applied when a ticket's policy leaves one unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaDefaults {
    pub first_response_minutes: i64,
    pub resolution_minutes: i64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Top-level configuration for the workflow core. Every timed rule the core
/// applies reads its constants from here, never from per-call literals.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub sla: SlaDefaults,
    pub reopen: ReopenWindows,
    pub queue: QueueConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sla = SlaDefaults {
            first_response_minutes: read_i64("SLA_FIRST_RESPONSE_MINUTES", 60)?,
            resolution_minutes: read_i64("SLA_RESOLUTION_MINUTES", 240)?,
        };

        let reopen = ReopenWindows {
            after_resolve: Duration::days(read_i64("REOPEN_AFTER_RESOLVE_DAYS", 3)?),
            after_close: Duration::days(read_i64("REOPEN_AFTER_CLOSE_DAYS", 14)?),
        };

        let max_attempts = match env::var("QUEUE_MAX_ATTEMPTS") {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                key: "QUEUE_MAX_ATTEMPTS",
            })?),
            Err(_) => None,
        };
        let queue = QueueConfig {
            retry: RetryConfig {
                base: Duration::seconds(read_i64("RETRY_BASE_SECONDS", 30)?),
                cap: Duration::seconds(read_i64("RETRY_CAP_SECONDS", 3600)?),
            },
            visibility_timeout: Duration::seconds(read_i64("QUEUE_VISIBILITY_SECONDS", 300)?),
            max_attempts,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            sla,
            reopen,
            queue,
        })
    }
}

fn read_i64(key: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a valid integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
