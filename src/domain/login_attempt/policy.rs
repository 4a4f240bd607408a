//! Lockout policy

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Failure count for one email and when the most recent failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLogin {
    pub count: u32,
    pub last_failure_at: DateTime<Utc>,
}

impl FailedLogin {
    pub fn first(at: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            last_failure_at: at,
        }
    }

    /// Add one failure at `at`
    pub fn increment(&mut self, at: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.last_failure_at = at;
    }
}

/// Outcome of checking a record against the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutStatus {
    /// Below the threshold, or no record
    Clear,
    /// Threshold reached and the window has not elapsed
    Locked { retry_after: Duration },
    /// Threshold reached but the window has elapsed; the record should be dropped
    Expired,
}

/// Lock an email after `max_attempts` failures for `window` after the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_attempts: u32,
    window: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(5, Duration::minutes(30))
    }
}

impl LockoutPolicy {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Locked while the time since the last failure is within the window, inclusive
    pub fn evaluate(&self, record: Option<&FailedLogin>, now: DateTime<Utc>) -> LockoutStatus {
        let Some(record) = record else {
            return LockoutStatus::Clear;
        };

        if record.count < self.max_attempts {
            return LockoutStatus::Clear;
        }

        let elapsed = now - record.last_failure_at;
        if elapsed <= self.window {
            LockoutStatus::Locked {
                retry_after: self.window - elapsed,
            }
        } else {
            LockoutStatus::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(count: u32, ago: Duration) -> FailedLogin {
        FailedLogin {
            count,
            last_failure_at: Utc::now() - ago,
        }
    }

    #[test]
    fn test_no_record_is_clear() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.evaluate(None, Utc::now()), LockoutStatus::Clear);
    }

    #[test]
    fn test_below_threshold_is_clear() {
        let policy = LockoutPolicy::default();
        let rec = record(4, Duration::seconds(1));

        assert_eq!(policy.evaluate(Some(&rec), Utc::now()), LockoutStatus::Clear);
    }

    #[test]
    fn test_threshold_within_window_is_locked() {
        let policy = LockoutPolicy::default();
        let rec = record(5, Duration::minutes(29));

        assert!(matches!(
            policy.evaluate(Some(&rec), Utc::now()),
            LockoutStatus::Locked { .. }
        ));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let policy = LockoutPolicy::default();
        let now = Utc::now();
        let rec = FailedLogin {
            count: 5,
            last_failure_at: now - Duration::minutes(30),
        };

        assert_eq!(
            policy.evaluate(Some(&rec), now),
            LockoutStatus::Locked {
                retry_after: Duration::zero()
            }
        );
    }

    #[test]
    fn test_past_window_is_expired() {
        let policy = LockoutPolicy::default();
        let rec = record(7, Duration::minutes(30) + Duration::seconds(1));

        assert_eq!(policy.evaluate(Some(&rec), Utc::now()), LockoutStatus::Expired);
    }

    #[test]
    fn test_increment_moves_timestamp() {
        let start = Utc::now() - Duration::minutes(10);
        let mut rec = FailedLogin::first(start);
        let later = Utc::now();

        rec.increment(later);
        assert_eq!(rec.count, 2);
        assert_eq!(rec.last_failure_at, later);
    }
}
