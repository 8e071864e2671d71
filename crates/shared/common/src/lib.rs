//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for HTTP and the unit of work
//! - Configuration structures
//! - The validated JSON extractor and `validator` rules
//! - Health check routes

pub mod config;
pub mod error;
pub mod extract;
#[cfg(feature = "database")]
pub mod health;
pub mod validation;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use extract::ValidatedJson;
#[cfg(feature = "database")]
pub use health::health_routes;
