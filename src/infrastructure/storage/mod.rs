//! Storage infrastructure - backend selection, pooling and migrations

pub mod migrations;
mod postgres;

use serde::Deserialize;

pub use migrations::{run_user_migrations, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    #[default]
    InMemory,
    /// PostgreSQL storage
    Postgres,
}
