//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::internal_handler::PharmacyIds;
use crate::handlers::inventory_handler::{RegisterInventoryRequest, UpdateInventoryRequest};
use crate::handlers::pharmacy_handler::CreatePharmacyRequest;
use crate::handlers::sale_handler::{PlaceSaleRequest, SaleItemRequest};
use crate::models::{
    Inventory, ManufacturerSummary, MedicationImageSummary, MedicationSummary, MostSoldMedication,
    Pharmacy, Sale, SaleItem, SaleTrend, UserAssignment,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::pharmacy_handler::get_pharmacies_with_medication,
        crate::handlers::pharmacy_handler::get_medications_in_stock,
        crate::handlers::pharmacy_handler::create_pharmacy,
        crate::handlers::inventory_handler::register_inventory,
        crate::handlers::inventory_handler::update_inventory,
        crate::handlers::inventory_handler::get_pharmacy_medications,
        crate::handlers::sale_handler::place_sale,
        crate::handlers::sale_handler::get_most_sold,
        crate::handlers::sale_handler::get_sale_trends,
        crate::handlers::internal_handler::get_pharmacy_ids,
        crate::handlers::internal_handler::sync_employee,
    ),
    components(
        schemas(
            Pharmacy,
            Inventory,
            Sale,
            SaleItem,
            SaleTrend,
            MostSoldMedication,
            MedicationSummary,
            ManufacturerSummary,
            MedicationImageSummary,
            UserAssignment,
            PharmacyIds,
            CreatePharmacyRequest,
            RegisterInventoryRequest,
            UpdateInventoryRequest,
            PlaceSaleRequest,
            SaleItemRequest,
            domain::Role,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Pharmacies", description = "Pharmacies and stocked medications"),
        (name = "Inventory", description = "Pharmacy stock"),
        (name = "Sales", description = "Sales and sales reports"),
        (name = "Internal", description = "Service-to-service API"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
