//! SeaORM entities.

pub mod inventory;
pub mod pharmacy;
pub mod pharmacy_employee;
pub mod sale;
pub mod sale_item;
