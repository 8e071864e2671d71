//! Session - the transaction of one unit of work.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::DbxError;

/// Exclusive access to the session's open transaction.
///
/// Holding it blocks every other user of the same session, so keep it for a
/// single statement or a short sequence of statements.
pub type SessionConnection<'a> = MappedMutexGuard<'a, DatabaseTransaction>;

/// Shared handle on an open transaction.
///
/// Clones refer to the same transaction. The transaction is taken out of the
/// handle when it is committed or rolled back; using the handle afterwards
/// yields `SessionClosed`. Dropping the last handle of an unfinished session
/// rolls the transaction back.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    datasource_id: Uuid,
    tx: Arc<Mutex<Option<DatabaseTransaction>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("datasource_id", &self.datasource_id)
            .finish()
    }
}

impl Session {
    /// Begin a transaction on `db` and wrap it.
    pub async fn begin(db: &DatabaseConnection, datasource_id: Uuid) -> Result<Self, DbxError> {
        let tx = db.begin().await?;
        let session = Self::from_transaction(tx, datasource_id);
        tracing::debug!(session = %session.id, "Transaction started");
        Ok(session)
    }

    pub fn from_transaction(tx: DatabaseTransaction, datasource_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            datasource_id,
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the datasource the transaction was begun on.
    pub fn datasource_id(&self) -> Uuid {
        self.datasource_id
    }

    /// Lock the transaction for query execution.
    pub async fn connection(&self) -> Result<SessionConnection<'_>, DbxError> {
        let guard = self.tx.lock().await;
        MutexGuard::try_map(guard, |slot| slot.as_mut()).map_err(|_| DbxError::SessionClosed(self.id))
    }

    /// Whether the transaction was already committed or rolled back.
    pub async fn is_finished(&self) -> bool {
        self.tx.lock().await.is_none()
    }

    /// Commit the transaction.
    pub async fn commit(&self) -> Result<(), DbxError> {
        let tx = self.take().await?;
        tx.commit().await?;
        tracing::debug!(session = %self.id, "Transaction committed");
        Ok(())
    }

    /// Roll the transaction back.
    pub async fn rollback(&self) -> Result<(), DbxError> {
        let tx = self.take().await?;
        tx.rollback().await?;
        tracing::debug!(session = %self.id, "Transaction rolled back");
        Ok(())
    }

    async fn take(&self) -> Result<DatabaseTransaction, DbxError> {
        self.tx
            .lock()
            .await
            .take()
            .ok_or(DbxError::SessionClosed(self.id))
    }
}
