//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory document store
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }

    fn read_lock_error(e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Failed to acquire read lock: {}", e))
    }

    fn write_lock_error(e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::read_lock_error)?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::read_lock_error)?;

        let mut all: Vec<E> = entities.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.key().as_str().cmp(b.key().as_str()))
        });
        Ok(all)
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(Self::write_lock_error)?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Document with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(Self::write_lock_error)?;

        match entities.get_mut(&key) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(format!(
                "Document with key '{}' not found",
                key
            ))),
        }
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(Self::write_lock_error)?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(Self::read_lock_error)?;

        Ok(entities.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(Self::read_lock_error)?;

        Ok(entities.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ECashAccount, User};

    fn user(email: &str) -> User {
        User::new("Test", email, "hash")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<User> = InMemoryStorage::new();
        let u = user("a@example.com");

        storage.create(u.clone()).await.unwrap();

        let result = storage.get(u.id()).await.unwrap().unwrap();
        assert_eq!(result.email(), "a@example.com");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<User> = InMemoryStorage::new();
        let u = user("a@example.com");

        storage.create(u.clone()).await.unwrap();
        let result = storage.create(u).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<User> = InMemoryStorage::new();
        let mut u = user("a@example.com");
        storage.create(u.clone()).await.unwrap();

        u.set_profile("Renamed", "b@example.com");
        storage.update(u.clone()).await.unwrap();

        let result = storage.get(u.id()).await.unwrap().unwrap();
        assert_eq!(result.name(), "Renamed");
        assert_eq!(result.email(), "b@example.com");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<User> = InMemoryStorage::new();

        let result = storage.update(user("a@example.com")).await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
        assert_eq!(storage.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<ECashAccount> = InMemoryStorage::new();
        let account = ECashAccount::new("Budi", "0812", "1234", "silver");
        storage.create(account.clone()).await.unwrap();

        assert!(storage.delete(account.id()).await.unwrap());
        assert!(!storage.exists(account.id()).await.unwrap());
        assert!(!storage.delete(account.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_breaks_timestamp_ties_by_key() {
        let at = "2024-01-01T00:00:00Z";
        let user_with_id = |id: &str| -> User {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "name": "Test",
                "email": format!("{}@example.com", id),
                "password": "hash",
                "created_at": at,
                "updated_at": at,
            }))
            .unwrap()
        };

        let storage = InMemoryStorage::with_entities(vec![
            user_with_id("user-c"),
            user_with_id("user-a"),
            user_with_id("user-b"),
        ]);

        let ids: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .iter()
            .map(|u| u.id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["user-a", "user-b", "user-c"]);
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let first = user("first@example.com");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = user("second@example.com");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let third = user("third@example.com");

        let storage = InMemoryStorage::with_entities(vec![third, first, second]);

        let emails: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .iter()
            .map(|u| u.email().to_string())
            .collect();
        assert_eq!(
            emails,
            vec!["first@example.com", "second@example.com", "third@example.com"]
        );
    }

    #[tokio::test]
    async fn test_count() {
        let storage =
            InMemoryStorage::with_entities(vec![user("a@example.com"), user("b@example.com")]);

        assert_eq!(storage.count().await.unwrap(), 2);
    }
}
