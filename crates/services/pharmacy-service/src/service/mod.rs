//! Service layer - Business logic.

mod inventory_service;
mod pharmacy_service;
mod sale_service;

pub use inventory_service::{InventoryManager, InventoryService};
pub use pharmacy_service::{PharmacyManager, PharmacyService};
pub use sale_service::{SaleManager, SaleService};
