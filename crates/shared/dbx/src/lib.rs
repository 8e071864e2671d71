//! Transactional persistence toolkit shared by every service.
//!
//! This crate provides:
//! - `Datasource` / `Session`: a sea-orm connection and the transaction of one unit of work
//! - `SessionContext`: the call-chain scoped slot holding the active session
//! - `UnitOfWork`: commit-on-success, rollback-on-selected-failure boundary
//! - `#[transactional]` / `#[transactional_service]`: attributes applying the boundary
//! - `CrudRepository`: generic repository executing on the active session
//! - `migration`: helpers for the `migrate` CLI commands

pub mod context;
pub mod datasource;
pub mod error;
pub mod migration;
pub mod policy;
pub mod repository;
pub mod session;
pub mod unit_of_work;

pub use context::SessionContext;
pub use datasource::Datasource;
pub use error::{DbxError, DbxResult, Failure, FailureKind};
pub use policy::RollbackPolicy;
pub use repository::CrudRepository;
pub use session::{Session, SessionConnection};
pub use unit_of_work::{HasUnitOfWork, UnitOfWork};

pub use dbx_macros::{non_transactional, transactional, transactional_service};

#[doc(hidden)]
pub mod __private {
    pub use crate::policy::RollbackPolicy;
}
