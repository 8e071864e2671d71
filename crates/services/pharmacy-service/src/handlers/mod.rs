//! HTTP handlers.

pub mod internal_handler;
pub mod inventory_handler;
pub mod pharmacy_handler;
pub mod sale_handler;

pub use internal_handler::internal_routes;
pub use inventory_handler::{employee_inventory_routes, manager_inventory_routes};
pub use pharmacy_handler::{manager_pharmacy_routes, public_pharmacy_routes};
pub use sale_handler::{employee_sale_routes, manager_sale_routes};
