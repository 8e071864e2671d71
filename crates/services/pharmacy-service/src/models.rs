//! Pharmacy, inventory and sales types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pharmacy and its manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pharmacy {
    pub id: i32,
    #[schema(example = "Farmacia Centrala")]
    pub name: String,
    #[schema(example = "Str. Lipscani 12, Bucuresti")]
    pub address: String,
    pub is_active: bool,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewPharmacy {
    pub name: String,
    pub address: String,
    pub manager_id: Option<i32>,
}

/// Stock of one medication at one pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Inventory {
    pub id: i32,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
    pub medication_id: i32,
    pub pharmacy_id: i32,
}

/// Stock registered by a manager; replaces any existing row.
#[derive(Debug, Clone)]
pub struct InventoryRegistration {
    pub medication_id: i32,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
}

/// Partial stock update made by an employee.
#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub medication_id: i32,
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
}

impl InventoryChanges {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.expiration_date.is_none()
    }
}

/// One line of a sale as requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSaleItem {
    pub medication_id: i32,
    pub quantity: i32,
    /// Minor units
    pub unit_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaleItem {
    pub id: i32,
    pub medication_id: i32,
    pub quantity: i32,
    #[schema(example = 1250)]
    pub unit_price: i64,
}

/// A placed sale with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: i32,
    /// Sum of unit price times quantity, minor units
    #[schema(example = 3750)]
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub employee_id: i32,
    pub pharmacy_id: i32,
    pub items: Vec<SaleItem>,
}

/// Sold quantity of one medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoldQuantity {
    pub medication_id: i32,
    pub quantity: i64,
}

/// Sold quantity of one medication with its catalogue data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MostSoldMedication {
    pub medication_id: i32,
    pub name: String,
    pub quantity: i64,
    pub manufacturer: Option<ManufacturerSummary>,
}

/// Sales of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaleTrend {
    pub sale_date: NaiveDate,
    pub total_sales_amount: i64,
    pub number_of_sales: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationImageSummary {
    pub image_url: String,
    pub alt_text: String,
}

/// Medication as returned by the medication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationSummary {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub manufacturer: Option<ManufacturerSummary>,
    #[serde(default)]
    pub images: Vec<MedicationImageSummary>,
}

/// Attach a user to a pharmacy, as sent by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserAssignment {
    pub user_id: i32,
    pub pharmacy_id: i32,
    pub role: domain::Role,
}
