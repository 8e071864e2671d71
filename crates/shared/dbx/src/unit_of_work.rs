//! Unit of Work boundary.
//!
//! `UnitOfWork::run` executes a body inside one database transaction:
//! - the outermost call of a call chain begins the transaction and owns it
//! - nested calls on the same datasource join the owner's session and never
//!   finalize it; a nested call on another datasource owns a separate
//!   transaction for the duration of its body
//! - success commits, a failure rolls back or commits according to the policy
//!
//! Services normally do not call `run` directly; the `#[transactional]` and
//! `#[transactional_service]` attributes generate the call from the
//! service's [`HasUnitOfWork`] implementation.

use std::future::Future;

use tracing::Instrument;

use crate::context::SessionContext;
use crate::datasource::Datasource;
use crate::error::{DbxError, Failure};
use crate::policy::RollbackPolicy;

/// Transaction boundary bound to a datasource.
#[derive(Clone, Debug)]
pub struct UnitOfWork {
    datasource: Datasource,
}

/// Gives the transactional attributes access to a service's unit of work.
pub trait HasUnitOfWork {
    fn unit_of_work(&self) -> &UnitOfWork;
}

impl UnitOfWork {
    /// Create a new unit of work over `datasource`.
    pub fn new(datasource: Datasource) -> Self {
        Self { datasource }
    }

    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }

    /// Run `body` inside a transaction.
    ///
    /// The body's error is always returned unchanged. A failure to commit a
    /// successful body is reported as `E::from(DbxError)`; failures to
    /// finalize after a failed body are logged only.
    pub async fn run<T, E, F>(&self, policy: RollbackPolicy, body: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<DbxError> + Failure,
    {
        if let Some(active) = SessionContext::current() {
            if active.datasource_id() == self.datasource.id() {
                tracing::trace!(session = %active.id(), "Joining the active unit of work");
                return body.await;
            }
            tracing::debug!(
                outer = %active.id(),
                "Active session belongs to another datasource, starting a separate transaction"
            );
        }

        let session = self.datasource.begin().await.map_err(E::from)?;
        let span = tracing::debug_span!("unit_of_work", session = %session.id());

        async move {
            let outcome = SessionContext::scope(session.clone(), body).await;

            match outcome {
                Ok(value) => {
                    session.commit().await.map_err(E::from)?;
                    Ok(value)
                }
                Err(err) => {
                    let kind = err.kind();
                    if policy.rolls_back(kind) {
                        tracing::debug!(%kind, "Rolling back after failure");
                        if let Err(rollback_err) = session.rollback().await {
                            tracing::error!("Transaction rollback failed: {}", rollback_err);
                        }
                    } else {
                        tracing::debug!(%kind, "Failure not selected for rollback, committing");
                        if let Err(commit_err) = session.commit().await {
                            tracing::error!("Transaction commit failed: {}", commit_err);
                        }
                    }
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
