//! Storage-backed user repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.storage.list().await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.storage.list().await?;
        Ok(users.into_iter().find(|u| u.email() == email))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.storage.update(user).await
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
