//! Repository layer for data access.

pub mod entities;
mod inventory_repository;
mod pharmacy_repository;
mod sale_repository;

pub use inventory_repository::{InventoryRepository, InventoryStore};
pub use pharmacy_repository::{PharmacyRepository, PharmacyStore};
pub use sale_repository::{SaleRepository, SaleStore};

#[cfg(any(test, feature = "test-utils"))]
pub use inventory_repository::MockInventoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use pharmacy_repository::MockPharmacyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use sale_repository::MockSaleRepository;
