//! Call-chain scoped session slot.
//!
//! The slot is task-local: a session installed with [`SessionContext::scope`]
//! is visible to everything the scoped future awaits, and to nothing else.
//! Concurrent requests running on the same runtime never see each other's
//! session, and the slot is empty again as soon as the scoped future
//! completes, fails, panics or is dropped.

use std::future::Future;

use crate::error::DbxError;
use crate::session::Session;

tokio::task_local! {
    static CURRENT_SESSION: Session;
}

/// Accessor for the session of the current unit of work.
pub struct SessionContext;

impl SessionContext {
    /// The session active in this call chain, if any.
    pub fn current() -> Option<Session> {
        CURRENT_SESSION.try_with(Session::clone).ok()
    }

    /// The active session, or `NoActiveSession` outside a unit of work.
    pub fn require() -> Result<Session, DbxError> {
        Self::current().ok_or(DbxError::NoActiveSession)
    }

    pub fn is_active() -> bool {
        CURRENT_SESSION.try_with(|_| ()).is_ok()
    }

    /// Run `fut` with `session` installed as the current session.
    pub async fn scope<F>(session: Session, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_SESSION.scope(session, fut).await
    }
}
