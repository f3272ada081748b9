use std::time::Duration;

use crate::manager::DEFAULT_COMPLETION_WINDOW_DAYS;
use crate::retry::RetryPolicy;

/// Engine configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum regeneration attempts per user (default: `3`).
    pub regen_max_attempts: u32,
    /// Base backoff between regeneration attempts in milliseconds
    /// (default: `100`).
    pub regen_backoff_ms: u64,
    /// Days of enrollment history used for completion averages
    /// (default: `30`).
    pub completion_window_days: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regen_max_attempts: 3,
            regen_backoff_ms: 100,
            completion_window_days: DEFAULT_COMPLETION_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default |
    /// |--------------------------|---------|
    /// | `REGEN_MAX_ATTEMPTS`     | `3`     |
    /// | `REGEN_BACKOFF_MS`       | `100`   |
    /// | `COMPLETION_WINDOW_DAYS` | `30`    |
    pub fn from_env() -> Self {
        let regen_max_attempts: u32 = std::env::var("REGEN_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("REGEN_MAX_ATTEMPTS must be a valid u32");

        let regen_backoff_ms: u64 = std::env::var("REGEN_BACKOFF_MS")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("REGEN_BACKOFF_MS must be a valid u64");

        let completion_window_days: i32 = std::env::var("COMPLETION_WINDOW_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("COMPLETION_WINDOW_DAYS must be a valid i32");

        Self {
            regen_max_attempts,
            regen_backoff_ms,
            completion_window_days,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.regen_max_attempts,
            base_delay: Duration::from_millis(self.regen_backoff_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
