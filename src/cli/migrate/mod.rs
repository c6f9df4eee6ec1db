//! Migrate command - applies the user table migrations

use anyhow::bail;
use tracing::info;

use crate::infrastructure::storage::{
    connect_pool, run_user_migrations, PostgresMigrator, StorageType,
};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.storage.storage_type != StorageType::Postgres {
        bail!("migrate requires storage.type = \"postgres\"");
    }

    let pool = connect_pool(&config.storage.postgres).await?;
    let applied = run_user_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;

    info!(applied, version = ?version, "Migrations complete");

    Ok(())
}
