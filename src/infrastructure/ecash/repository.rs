//! Storage-backed eCash repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::ecash::{ECashAccount, ECashId, ECashRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageECashRepository {
    storage: Arc<dyn Storage<ECashAccount>>,
}

impl StorageECashRepository {
    pub fn new(storage: Arc<dyn Storage<ECashAccount>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ECashRepository for StorageECashRepository {
    async fn list(&self) -> Result<Vec<ECashAccount>, DomainError> {
        self.storage.list().await
    }

    async fn get(&self, id: &ECashId) -> Result<Option<ECashAccount>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, account: ECashAccount) -> Result<ECashAccount, DomainError> {
        self.storage.create(account).await
    }

    async fn update(&self, account: ECashAccount) -> Result<ECashAccount, DomainError> {
        self.storage.update(account).await
    }

    async fn delete(&self, id: &ECashId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }
}
