//! HTTP handlers.

pub mod user_handler;

pub use user_handler::{admin_user_routes, public_user_routes};
