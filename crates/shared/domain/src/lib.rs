//! Domain layer - Core business types and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across the pharmacy services.

pub mod constants;
pub mod error;
pub mod password;
pub mod role;
pub mod sales;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use role::{NotificationPreference, Role};
