//! eCash account repository trait

use async_trait::async_trait;

use super::entity::{ECashAccount, ECashId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Account store operations for eCash accounts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ECashRepository: Send + Sync {
    /// List every account, oldest first
    async fn list(&self) -> Result<Vec<ECashAccount>, DomainError>;

    /// Get an account by ID
    async fn get(&self, id: &ECashId) -> Result<Option<ECashAccount>, DomainError>;

    /// Insert a new account
    async fn create(&self, account: ECashAccount) -> Result<ECashAccount, DomainError>;

    /// Replace an existing account
    async fn update(&self, account: ECashAccount) -> Result<ECashAccount, DomainError>;

    /// Delete an account, returns true if a record was removed
    async fn delete(&self, id: &ECashId) -> Result<bool, DomainError>;
}
