//! Migrate command - applies storage migrations to PostgreSQL

use anyhow::Context;
use tracing::info;

use crate::config::StorageBackend;
use crate::infrastructure::storage::{run_storage_migrations, PostgresConfig, PostgresMigrator};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.storage.backend != StorageBackend::Postgres {
        info!("Storage backend is not postgres, applying migrations to database_url anyway");
    }

    let url = config
        .storage
        .database_url
        .clone()
        .context("storage.database_url or DATABASE_URL must be set to run migrations")?;

    let pool = PostgresConfig::new(url)
        .with_max_connections(config.storage.max_connections)
        .connect()
        .await?;

    let applied = run_storage_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;
    info!(applied, version = ?version, "Migrations complete");

    Ok(())
}
