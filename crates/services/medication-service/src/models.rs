//! Medication catalogue types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Manufacturer of medications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Manufacturer {
    pub id: i32,
    #[schema(example = "Antibiotice Iasi")]
    pub name: String,
    #[schema(example = "office@antibiotice.ro")]
    pub contact_info: String,
}

/// Image attached to a medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationImage {
    pub id: i32,
    #[schema(example = "media/3f2b8c1e-6a0d-4b8e-9d4c-1f2e3a4b5c6d.png")]
    pub image_url: String,
    pub alt_text: String,
}

/// Medication with its manufacturer and images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Medication {
    pub id: i32,
    #[schema(example = "Paracetamol 500mg")]
    pub name: String,
    pub description: String,
    /// Purchase price in minor units (bani)
    #[schema(example = 1250)]
    pub purchase_price: i64,
    pub created_at: DateTime<Utc>,
    pub manufacturer: Option<Manufacturer>,
    pub images: Vec<MedicationImage>,
}

#[derive(Debug, Clone)]
pub struct NewMedication {
    pub name: String,
    pub description: String,
    pub purchase_price: i64,
    pub manufacturer_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewManufacturer {
    pub name: String,
    pub contact_info: String,
}

/// Uploaded image before it is stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub alt_text: String,
    pub content: Vec<u8>,
}
