//! Retry policy for the transactional regeneration protocol.
//!
//! Serializable transactions lose to concurrent writers with a
//! serialization failure; the whole regeneration is retried from a
//! fresh snapshot a bounded number of times with jittered exponential
//! backoff between attempts.

use std::time::Duration;

use rand::Rng;

/// Postgres serialization failure.
const CODE_SERIALIZATION_FAILURE: &str = "40001";
/// Postgres deadlock detected.
const CODE_DEADLOCK_DETECTED: &str = "40P01";
/// Postgres unique violation, raised when a concurrent confirm races
/// the one-active-enrollment index.
const CODE_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Policy without backoff, for tests that must not sleep.
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    /// Backoff before the retry following the given 1-based attempt.
    ///
    /// Doubles per attempt with up to half the base delay of jitter so
    /// that two writers backing off together do not collide again.
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        if base_ms == 0 {
            return Duration::ZERO;
        }
        let backoff_ms = base_ms.saturating_mul(1 << attempt.saturating_sub(1).min(16));
        let jitter_ms = rand::rng().random_range(0..=base_ms / 2);
        Duration::from_millis(backoff_ms + jitter_ms)
    }
}

/// Whether a database error is a transient write conflict worth
/// retrying from a fresh snapshot.
pub fn is_write_conflict(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref().is_some_and(is_conflict_code),
        _ => false,
    }
}

fn is_conflict_code(code: &str) -> bool {
    matches!(
        code,
        CODE_SERIALIZATION_FAILURE | CODE_DEADLOCK_DETECTED | CODE_UNIQUE_VIOLATION
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_exponentially_within_jitter() {
        let policy = RetryPolicy::default();

        let first = policy.delay(1);
        assert!(first >= Duration::from_millis(100));
        assert!(first <= Duration::from_millis(150));

        let second = policy.delay(2);
        assert!(second >= Duration::from_millis(200));
        assert!(second <= Duration::from_millis(250));
    }

    #[test]
    fn immediate_policy_never_sleeps() {
        let policy = RetryPolicy::immediate(3);
        assert_eq!(policy.delay(1), Duration::ZERO);
        assert_eq!(policy.delay(5), Duration::ZERO);
    }

    #[test]
    fn classifies_conflict_codes() {
        assert!(is_conflict_code("40001"));
        assert!(is_conflict_code("40P01"));
        assert!(is_conflict_code("23505"));
        assert!(!is_conflict_code("23503"));
        assert!(!is_conflict_code("42601"));
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        assert!(!is_write_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_write_conflict(&sqlx::Error::PoolTimedOut));
    }
}
