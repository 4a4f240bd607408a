//! eCash Account API
//!
//! REST backend for user accounts and eCash (e-wallet) accounts:
//! - Login with per-email brute-force lockout
//! - User CRUD with an in-memory search/sort/pagination pipeline
//! - eCash account CRUD
//! - In-memory or PostgreSQL document storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use chrono::Duration;
use rand::Rng;
use tracing::{info, warn};

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use domain::LockoutPolicy;
use infrastructure::{
    auth::{AuthenticationService, InMemoryLoginAttemptRepository, JwtConfig, JwtService},
    ecash::{ECashService, StorageECashRepository},
    storage::{AccountStores, PostgresConfig, StorageConfig, StorageFactory},
    user::{Argon2Hasher, CreateUserRequest, StorageUserRepository, UserService},
};

/// Create the application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = storage_config(config)?;
    info!(backend = ?storage_config.storage_type(), "Storage backend selected");

    let stores = StorageFactory::create_account_stores(&storage_config).await?;
    let state = build_app_state(stores, config);

    seed_initial_user(state.user_service.as_ref()).await?;

    Ok(state)
}

/// Wire services over already-built stores
pub fn build_app_state(stores: AccountStores, config: &AppConfig) -> AppState {
    let user_repository = Arc::new(StorageUserRepository::new(stores.users));
    let ecash_repository = Arc::new(StorageECashRepository::new(stores.ecash));
    let hasher = Argon2Hasher::with_params(
        config.auth.argon2_memory_kib,
        config.auth.argon2_iterations,
        config.auth.argon2_parallelism,
    )
    .unwrap_or_else(|e| {
        warn!(error = %e, "Argon2 settings rejected, using the defaults");
        Argon2Hasher::new()
    });
    let hasher = Arc::new(hasher);

    if config.auth.jwt_secret == config::AuthConfig::default().jwt_secret {
        warn!("Using the default JWT secret; set APP__AUTH__JWT_SECRET in production");
    }
    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    )));

    let window = Duration::try_minutes(config.auth.lockout_minutes).unwrap_or_else(|| {
        warn!(
            lockout_minutes = config.auth.lockout_minutes,
            "Lockout window out of range, using the default"
        );
        LockoutPolicy::default().window()
    });
    let policy = LockoutPolicy::new(config.auth.max_failed_attempts, window);

    let auth_service = AuthenticationService::new(
        user_repository.clone(),
        Arc::new(InMemoryLoginAttemptRepository::new().with_retention(window)),
        hasher.clone(),
        jwt_service.clone(),
        policy,
    );

    AppState {
        user_service: Arc::new(UserService::new(user_repository, hasher)),
        ecash_service: Arc::new(ECashService::new(ecash_repository)),
        auth_service: Arc::new(auth_service),
        jwt_service,
        listing: config.listing.clone(),
    }
}

fn storage_config(config: &AppConfig) -> anyhow::Result<StorageConfig> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(StorageConfig::InMemory),
        StorageBackend::Postgres => {
            let url = config.storage.database_url.clone().ok_or_else(|| {
                anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
            })?;

            Ok(StorageConfig::Postgres(
                PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
            ))
        }
    }
}

fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Create the first account from `ADMIN_EMAIL` when the store is empty
async fn seed_initial_user(user_service: &dyn UserServiceTrait) -> anyhow::Result<()> {
    let Ok(email) = std::env::var("ADMIN_EMAIL") else {
        return Ok(());
    };

    if user_service.count().await? > 0 {
        return Ok(());
    }

    let (password, generated) = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, false),
        _ => (generate_random_password(), true),
    };

    let user = user_service
        .create(CreateUserRequest {
            name: "Administrator".to_string(),
            email,
            password: password.clone(),
            password_confirm: password.clone(),
        })
        .await?;

    info!(id = %user.id(), email = %user.email(), "Initial user created");
    if generated {
        info!("Generated password for the initial user: {}", password);
        info!("Change it with PATCH /api/users/{}/change-password", user.id());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_fits_validation() {
        let password = generate_random_password();

        assert_eq!(password.len(), 16);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgres;
        config.storage.database_url = None;

        assert!(storage_config(&config).is_err());

        config.storage.database_url = Some("postgres://localhost/ecash".to_string());
        assert!(matches!(
            storage_config(&config).unwrap(),
            StorageConfig::Postgres(_)
        ));
    }

    #[tokio::test]
    async fn test_rejected_argon2_settings_fall_back_to_defaults() {
        let mut config = AppConfig::default();
        config.auth.argon2_memory_kib = 1;

        let state = build_app_state(
            AccountStores {
                users: StorageFactory::create_in_memory(),
                ecash: StorageFactory::create_in_memory(),
            },
            &config,
        );

        let user = state
            .user_service
            .create(CreateUserRequest {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret1".to_string(),
                password_confirm: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert!(user.password_hash().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_memory_state_starts_empty() {
        let state = create_app_state_with_config(&AppConfig::default())
            .await
            .unwrap();

        // ADMIN_EMAIL is not set under test, so nothing is seeded
        if std::env::var("ADMIN_EMAIL").is_err() {
            assert_eq!(state.user_service.count().await.unwrap(), 0);
        }
    }
}
