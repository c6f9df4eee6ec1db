//! Account service
//!
//! User account management with:
//! - Email uniqueness enforced by the user store
//! - Deterministic peppered password hashing
//! - Email verification status (`PENDING` until verified, reset on email change)
//! - In-memory or PostgreSQL persistence

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::storage::{connect_pool, run_user_migrations, StorageType};
use infrastructure::user::{
    InMemoryUserRepository, PostgresUserRepository, Sha256Hasher, UserService,
};
use tracing::info;

/// Create the application state with default configuration (in-memory store)
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state, wiring the configured store and hasher
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Sha256Hasher::new(config.password.secret.clone()));

    info!("Storage backend: {:?}", config.storage.storage_type);

    let user_service: Arc<dyn api::state::UserServiceTrait> = match config.storage.storage_type {
        StorageType::InMemory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, hasher))
        }
        StorageType::Postgres => {
            let pool = connect_pool(&config.storage.postgres).await?;
            let applied = run_user_migrations(&pool).await?;
            info!(applied, "User migrations checked");

            let repository = Arc::new(PostgresUserRepository::new(pool));
            Arc::new(UserService::new(repository, hasher))
        }
    };

    Ok(AppState::new(user_service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_uses_empty_store() {
        let state = create_app_state().await.unwrap();
        assert_eq!(state.user_service.count(None).await.unwrap(), 0);
    }
}
