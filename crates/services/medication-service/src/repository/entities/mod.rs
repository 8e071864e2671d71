//! SeaORM entities.

pub mod manufacturer;
pub mod medication;
pub mod medication_image;
