//! Inventory handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use chrono::NaiveDate;
use jwt_guard::CurrentUser;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, ValidatedJson};

use crate::models::{Inventory, InventoryChanges, InventoryRegistration, MedicationSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterInventoryRequest {
    pub medication_id: i32,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    #[schema(example = 40)]
    pub quantity: i32,
    #[schema(value_type = String, format = Date, example = "2030-01-31")]
    pub expiration_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInventoryRequest {
    pub medication_id: i32,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[schema(value_type = Option<String>, format = Date)]
    pub expiration_date: Option<NaiveDate>,
}

/// Manager routes; the caller guards them.
pub fn manager_inventory_routes() -> Router<AppState> {
    Router::new().route("/:id/inventory", post(register_inventory))
}

/// Employee routes; the caller guards them.
pub fn employee_inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/inventory", patch(update_inventory))
        .route("/:id/medications", get(get_pharmacy_medications))
}

/// Register stock at a managed pharmacy
#[utoipa::path(
    post,
    path = "/api/pharmacies/{pharmacy_id}/inventory",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("pharmacy_id" = i32, Path, description = "Pharmacy ID")),
    request_body = RegisterInventoryRequest,
    responses(
        (status = 201, description = "Inventory registered", body = Inventory),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not a manager"),
        (status = 403, description = "Pharmacy managed by someone else"),
        (status = 404, description = "Pharmacy not found")
    )
)]
pub async fn register_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pharmacy_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<RegisterInventoryRequest>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let inventory = state
        .inventory_service
        .save_inventory(
            pharmacy_id,
            user.id,
            InventoryRegistration {
                medication_id: payload.medication_id,
                quantity: payload.quantity,
                expiration_date: payload.expiration_date,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(inventory)))
}

/// Update stock at the caller's pharmacy
#[utoipa::path(
    patch,
    path = "/api/pharmacies/{pharmacy_id}/inventory",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("pharmacy_id" = i32, Path, description = "Pharmacy ID")),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Inventory updated", body = Inventory),
        (status = 400, description = "Nothing to update or invalid values"),
        (status = 401, description = "Not an employee"),
        (status = 403, description = "Caller does not work at this pharmacy"),
        (status = 404, description = "No inventory for this medication")
    )
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pharmacy_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateInventoryRequest>,
) -> AppResult<Json<Inventory>> {
    let inventory = state
        .inventory_service
        .update_inventory(
            pharmacy_id,
            user.id,
            InventoryChanges {
                medication_id: payload.medication_id,
                quantity: payload.quantity,
                expiration_date: payload.expiration_date,
            },
        )
        .await?;

    Ok(Json(inventory))
}

/// Medications held by the caller's pharmacy
#[utoipa::path(
    get,
    path = "/api/pharmacies/{pharmacy_id}/medications",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("pharmacy_id" = i32, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Medications", body = Vec<MedicationSummary>),
        (status = 401, description = "Not an employee"),
        (status = 403, description = "Caller does not work at this pharmacy")
    )
)]
pub async fn get_pharmacy_medications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pharmacy_id): Path<i32>,
) -> AppResult<Json<Vec<MedicationSummary>>> {
    let medications = state
        .inventory_service
        .get_pharmacy_medications(pharmacy_id, user.id)
        .await?;
    Ok(Json(medications))
}
