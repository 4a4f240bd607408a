//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::{DomainError, ECashAccount, User};

use super::in_memory::InMemoryStorage;
use super::migrations::{run_storage_migrations, ECASH_TABLE, USERS_TABLE};
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Resolved backend settings
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The two account stores the service runs on
#[derive(Debug, Clone)]
pub struct AccountStores {
    pub users: Arc<dyn Storage<User>>,
    pub ecash: Arc<dyn Storage<ECashAccount>>,
}

/// Builds storage instances for the configured backend
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Create both account stores. Postgres runs pending migrations first.
    pub async fn create_account_stores(
        config: &StorageConfig,
    ) -> Result<AccountStores, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(AccountStores {
                    users: Self::create_in_memory::<User>(),
                    ecash: Self::create_in_memory::<ECashAccount>(),
                })
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL storage"
                );
                let pool = pg_config.connect().await?;
                run_storage_migrations(&pool).await?;

                Ok(AccountStores {
                    users: Self::create_postgres::<User>(&pool, USERS_TABLE),
                    ecash: Self::create_postgres::<ECashAccount>(&pool, ECASH_TABLE),
                })
            }
        }
    }

    pub fn create_in_memory<E>() -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        Arc::new(InMemoryStorage::<E>::new())
    }

    pub fn create_postgres<E>(pool: &PgPool, table_name: &str) -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        Arc::new(PostgresStorage::<E>::new(pool.clone(), table_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_parse() {
        assert_eq!(StorageType::parse("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("mongodb"), None);
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::InMemory.storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::Postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[tokio::test]
    async fn test_in_memory_account_stores_start_empty() {
        let stores = StorageFactory::create_account_stores(&StorageConfig::InMemory)
            .await
            .unwrap();

        assert_eq!(stores.users.count().await.unwrap(), 0);
        assert_eq!(stores.ecash.count().await.unwrap(), 0);
    }
}
