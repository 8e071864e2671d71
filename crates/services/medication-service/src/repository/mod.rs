//! Repository layer for data access.

pub mod entities;
mod manufacturer_repository;
mod medication_repository;

pub use manufacturer_repository::{ManufacturerRepository, ManufacturerStore};
pub use medication_repository::{MedicationRepository, MedicationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use manufacturer_repository::MockManufacturerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use medication_repository::MockMedicationRepository;
