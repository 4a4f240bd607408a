//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Identifier-keyed document store with no upserts and no transactions
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves every document, oldest first
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new document, returns `Conflict` if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces an existing document, returns `NotFound` if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes a document by its key, returns true if something was removed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if a document exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the number of stored documents
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Test storage that records how many writes it received and can be told
    /// to fail reads or writes independently
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<HashMap<String, E>>,
        fail_reads: bool,
        fail_writes: bool,
        writes: Mutex<usize>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(HashMap::new()),
                fail_reads: false,
                fail_writes: false,
                writes: Mutex::new(0),
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities
                .lock()
                .unwrap()
                .insert(entity.key().as_str().to_string(), entity);
            self
        }

        pub fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        pub fn failing_writes(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        /// Number of create/update/delete calls received, failed or not
        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn check_read(&self) -> Result<(), DomainError> {
            if self.fail_reads {
                return Err(DomainError::storage("Simulated read failure"));
            }
            Ok(())
        }

        fn check_write(&self) -> Result<(), DomainError> {
            *self.writes.lock().unwrap() += 1;

            if self.fail_writes {
                return Err(DomainError::storage("Simulated write failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_read()?;
            Ok(self.entities.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_read()?;
            let mut all: Vec<E> = self.entities.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| {
                a.created_at()
                    .cmp(&b.created_at())
                    .then_with(|| a.key().as_str().cmp(b.key().as_str()))
            });
            Ok(all)
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_write()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if entities.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Document '{}' already exists",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_write()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if !entities.contains_key(&key) {
                return Err(DomainError::not_found(format!(
                    "Document '{}' not found",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
            self.check_write()?;
            Ok(self.entities.lock().unwrap().remove(key.as_str()).is_some())
        }
    }
}
