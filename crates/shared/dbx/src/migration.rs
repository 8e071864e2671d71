//! Migration commands shared by the service binaries.

use std::collections::HashSet;

use sea_orm::{DbErr, EntityTrait, QueryOrder};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::datasource::Datasource;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

/// Run `action` with migrator `M`.
pub async fn apply<M: MigratorTrait>(
    datasource: &Datasource,
    action: MigrateAction,
) -> Result<(), DbErr> {
    let db = datasource.connection();

    match action {
        MigrateAction::Up => {
            M::up(db, None).await?;
            tracing::info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            M::down(db, Some(1)).await?;
            tracing::info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in status::<M>(datasource).await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            M::fresh(db).await?;
            tracing::info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// List all migrations of `M` with their applied status.
pub async fn status<M: MigratorTrait>(datasource: &Datasource) -> Result<Vec<(String, bool)>, DbErr> {
    let db = datasource.connection();

    // The bookkeeping table only exists once something was applied
    M::install(db).await?;

    let applied: HashSet<String> = seaql_migrations::Entity::find()
        .order_by_asc(seaql_migrations::Column::Version)
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(M::migrations()
        .iter()
        .map(|m| {
            let name = m.name().to_string();
            let is_applied = applied.contains(&name);
            (name, is_applied)
        })
        .collect())
}
