//! Process-local failed-login store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::login_attempt::{FailedLogin, LockoutPolicy, LoginAttemptRepository};
use crate::domain::DomainError;

/// Failed-login records keyed by email, lost on restart.
///
/// Records whose last failure is older than the retention are dropped
/// whenever a new failure is recorded.
#[derive(Debug, Clone)]
pub struct InMemoryLoginAttemptRepository {
    records: Arc<RwLock<HashMap<String, FailedLogin>>>,
    retention: Duration,
}

impl Default for InMemoryLoginAttemptRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLoginAttemptRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::default(),
            retention: LockoutPolicy::default().window(),
        }
    }

    /// Start with existing records
    pub fn with_records(records: impl IntoIterator<Item = (String, FailedLogin)>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records.into_iter().collect())),
            ..Self::new()
        }
    }

    /// Forget failures older than `retention`; normally the lockout window
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
    async fn get(&self, email: &str) -> Result<Option<FailedLogin>, DomainError> {
        Ok(self.records.read().await.get(email).copied())
    }

    async fn record_failure(&self, email: &str) -> Result<FailedLogin, DomainError> {
        let now = Utc::now();
        let mut records = self.records.write().await;

        let before = records.len();
        records.retain(|_, r| now - r.last_failure_at <= self.retention);
        if records.len() < before {
            debug!(dropped = before - records.len(), "Dropped stale failed-login records");
        }

        let record = records
            .entry(email.to_string())
            .and_modify(|r| r.increment(now))
            .or_insert_with(|| FailedLogin::first(now));

        Ok(*record)
    }

    async fn clear(&self, email: &str) -> Result<(), DomainError> {
        self.records.write().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_failure_starts_at_one() {
        let repo = InMemoryLoginAttemptRepository::new();

        let record = repo.record_failure("a@example.com").await.unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(repo.get("a@example.com").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_failures_accumulate_per_email() {
        let repo = InMemoryLoginAttemptRepository::new();

        repo.record_failure("a@example.com").await.unwrap();
        repo.record_failure("a@example.com").await.unwrap();
        repo.record_failure("b@example.com").await.unwrap();

        assert_eq!(repo.get("a@example.com").await.unwrap().unwrap().count, 2);
        assert_eq!(repo.get("b@example.com").await.unwrap().unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let repo = InMemoryLoginAttemptRepository::new();
        repo.record_failure("a@example.com").await.unwrap();

        repo.clear("a@example.com").await.unwrap();
        assert!(repo.get("a@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_failures_are_all_counted() {
        let repo = InMemoryLoginAttemptRepository::new();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.record_failure("a@example.com").await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.get("a@example.com").await.unwrap().unwrap().count, 20);
    }

    #[tokio::test]
    async fn test_stale_records_dropped_on_next_failure() {
        let now = Utc::now();
        let stale = FailedLogin {
            count: 3,
            last_failure_at: now - Duration::minutes(45),
        };
        let recent = FailedLogin {
            count: 2,
            last_failure_at: now - Duration::minutes(5),
        };
        let repo = InMemoryLoginAttemptRepository::with_records([
            ("old@example.com".to_string(), stale),
            ("recent@example.com".to_string(), recent),
            ("a@example.com".to_string(), stale),
        ])
        .with_retention(Duration::minutes(30));

        let record = repo.record_failure("a@example.com").await.unwrap();

        // an expired streak starts over
        assert_eq!(record.count, 1);
        assert!(repo.get("old@example.com").await.unwrap().is_none());
        assert_eq!(repo.get("recent@example.com").await.unwrap(), Some(recent));
    }
}
