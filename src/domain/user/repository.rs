//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Account store operations for users
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user, oldest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by exact email (for login and uniqueness checks)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user, returns true if a record was removed
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;
}
