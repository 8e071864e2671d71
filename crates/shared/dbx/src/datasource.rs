//! Database connection wrapper.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use uuid::Uuid;

use crate::context::SessionContext;
use crate::error::DbxError;
use crate::session::Session;

/// Connection pool from which unit-of-work sessions are started.
///
/// Clones share the pool and the id; sessions remember the id of the
/// datasource that began them.
#[derive(Clone, Debug)]
pub struct Datasource {
    id: Uuid,
    connection: DatabaseConnection,
}

impl Datasource {
    /// Open a connection pool.
    pub async fn connect<O>(options: O) -> Result<Self, DbErr>
    where
        O: Into<ConnectOptions>,
    {
        let connection = Database::connect(options).await?;
        tracing::info!(
            backend = ?connection.get_database_backend(),
            "Database connected"
        );
        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            id: Uuid::new_v4(),
            connection,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Begin a new session.
    pub async fn begin(&self) -> Result<Session, DbxError> {
        Session::begin(&self.connection, self.id).await
    }

    /// The session of the unit of work running in the current call chain.
    ///
    /// A session begun on another datasource counts as absent.
    pub fn session(&self) -> Result<Session, DbxError> {
        SessionContext::current()
            .filter(|session| session.datasource_id() == self.id)
            .ok_or(DbxError::NoActiveSession)
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await
    }
}
