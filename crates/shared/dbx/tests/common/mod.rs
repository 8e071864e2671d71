//! Shared fixtures: an in-memory SQLite datasource with an `item` table.

#![allow(dead_code)]

use dbx::{Datasource, DbxError, Failure, FailureKind};
use sea_orm::{ConnectOptions, ConnectionTrait, EntityTrait, Schema};

pub mod item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "item")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Error type used by the test services.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error(transparent)]
    Dbx(#[from] DbxError),

    #[error("{1}")]
    Raised(FailureKind, String),
}

impl TestError {
    pub fn raised(kind: FailureKind, message: impl Into<String>) -> Self {
        TestError::Raised(kind, message.into())
    }
}

impl Failure for TestError {
    fn kind(&self) -> FailureKind {
        match self {
            TestError::Dbx(err) => err.kind(),
            TestError::Raised(kind, _) => *kind,
        }
    }
}

/// Connect to a fresh in-memory database and create the `item` table.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn datasource() -> Datasource {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let datasource = Datasource::connect(options)
        .await
        .expect("in-memory database should open");

    let db = datasource.connection();
    let backend = db.get_database_backend();
    let create = Schema::new(backend).create_table_from_entity(item::Entity);
    db.execute(backend.build(&create))
        .await
        .expect("item table should be created");

    datasource
}

/// Names of all persisted items, read outside any unit of work.
pub async fn item_names(datasource: &Datasource) -> Vec<String> {
    let mut names: Vec<String> = item::Entity::find()
        .all(datasource.connection())
        .await
        .expect("items should be readable")
        .into_iter()
        .map(|item| item.name)
        .collect();
    names.sort();
    names
}
