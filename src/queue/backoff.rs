use chrono::Duration;

/// Base and ceiling for the exponential retry curve. Values come from
/// configuration; see `config::AppConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub base: Duration,
    pub cap: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base: Duration::seconds(30),
            cap: Duration::hours(1),
        }
    }
}

/// Delay before the next attempt of a failed operation.
///
/// First attempts (and any non-positive attempt counter) get the base delay;
/// from the second attempt on the delay doubles per attempt, capped at the
/// configured maximum. The sequence is monotone non-decreasing in `attempt`.
pub fn retry_delay(config: &RetryConfig, attempt: i32) -> Duration {
    if attempt <= 1 {
        return config.base;
    }

    // Shift capped well below i64 range so the multiply saturates cleanly.
    let exponent = (attempt - 1).min(32) as u32;
    let multiplier = 1i64 << exponent;
    let seconds = config.base.num_seconds().saturating_mul(multiplier);
    Duration::seconds(seconds).min(config.cap)
}
