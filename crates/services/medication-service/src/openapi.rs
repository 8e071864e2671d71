//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::manufacturer_handler::CreateManufacturerRequest;
use crate::handlers::medication_handler::{CreateMedicationRequest, ImageUploadForm};
use crate::models::{Manufacturer, Medication, MedicationImage};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::medication_handler::get_medications,
        crate::handlers::medication_handler::get_medication,
        crate::handlers::medication_handler::create_medication,
        crate::handlers::medication_handler::upload_image,
        crate::handlers::manufacturer_handler::get_manufacturers,
        crate::handlers::manufacturer_handler::create_manufacturer,
    ),
    components(
        schemas(
            Medication,
            MedicationImage,
            Manufacturer,
            CreateMedicationRequest,
            CreateManufacturerRequest,
            ImageUploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Medications", description = "Medication catalogue"),
        (name = "Manufacturers", description = "Medication manufacturers"),
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
