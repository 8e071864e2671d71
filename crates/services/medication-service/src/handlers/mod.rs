//! HTTP handlers.

pub mod manufacturer_handler;
pub mod medication_handler;

pub use manufacturer_handler::{manager_manufacturer_routes, public_manufacturer_routes};
pub use medication_handler::{manager_medication_routes, public_medication_routes};
