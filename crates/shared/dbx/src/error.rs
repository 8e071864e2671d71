//! Failure taxonomy and persistence errors.
//!
//! Every error type that flows out of a unit of work implements [`Failure`],
//! which lets a [`RollbackPolicy`](crate::RollbackPolicy) decide whether the
//! transaction is rolled back or committed.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a failure, used by rollback selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Bad input shape or value
    Validation,
    /// Caller is not authenticated or lacks permission
    Authorization,
    /// Referenced entity is absent
    NotFound,
    /// Entity already exists
    Conflict,
    /// Underlying persistence error
    Storage,
    /// Business rule violated (insufficient stock, unknown employee, ...)
    DomainRule,
    /// A collaborating service could not be reached
    Unavailable,
    /// Anything else
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Validation => "validation",
            FailureKind::Authorization => "authorization",
            FailureKind::NotFound => "not_found",
            FailureKind::Conflict => "conflict",
            FailureKind::Storage => "storage",
            FailureKind::DomainRule => "domain_rule",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Implemented by error types returned from transactional bodies.
pub trait Failure {
    fn kind(&self) -> FailureKind;
}

/// Errors raised by the persistence layer itself.
#[derive(Error, Debug)]
pub enum DbxError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A repository was used outside of a unit of work
    #[error("No active session in the current call chain")]
    NoActiveSession,

    /// The session's transaction was already committed or rolled back
    #[error("Session {0} is already finished")]
    SessionClosed(uuid::Uuid),
}

impl Failure for DbxError {
    fn kind(&self) -> FailureKind {
        match self {
            DbxError::Database(_) => FailureKind::Storage,
            DbxError::NoActiveSession | DbxError::SessionClosed(_) => FailureKind::Internal,
        }
    }
}

/// Result type alias
pub type DbxResult<T> = Result<T, DbxError>;
