//! Failed-login store trait

use async_trait::async_trait;

use super::policy::FailedLogin;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Keyed store of failed-login records, one per email
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    /// Current record for an email, if any
    async fn get(&self, email: &str) -> Result<Option<FailedLogin>, DomainError>;

    /// Count one more failure at the current time and return the new record.
    /// Initializes the count to 1 when no record exists.
    async fn record_failure(&self, email: &str) -> Result<FailedLogin, DomainError>;

    /// Remove the record for an email
    async fn clear(&self, email: &str) -> Result<(), DomainError>;
}
