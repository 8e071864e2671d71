//! Service layer - Business logic.

mod manufacturer_service;
mod medication_service;

pub use manufacturer_service::{ManufacturerManager, ManufacturerService};
pub use medication_service::{MedicationManager, MedicationService};
