//! Infrastructure layer - database connection, migrations and media storage.

pub mod media;
pub mod migrations;

pub use media::{MediaStore, StoredFile};
pub use migrations::Migrator;

use common::DatabaseConfig;
use dbx::Datasource;
use sea_orm::DbErr;
use sea_orm_migration::MigratorTrait;

/// Connect and apply pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<Datasource, DbErr> {
    let datasource = Datasource::connect(config.connect_options()).await?;
    Migrator::up(datasource.connection(), None).await?;
    tracing::info!("Medication database ready");
    Ok(datasource)
}

/// Connect without running migrations (for CLI commands).
pub async fn connect_without_migrations(config: &DatabaseConfig) -> Result<Datasource, DbErr> {
    Datasource::connect(config.connect_options()).await
}
