//! Pharmacy handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use jwt_guard::CurrentUser;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, ValidatedJson};

use crate::models::{MedicationSummary, NewPharmacy, Pharmacy};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePharmacyRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Farmacia Centrala")]
    pub name: String,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    #[schema(example = "Str. Lipscani 12, Bucuresti")]
    pub address: String,
}

pub fn public_pharmacy_routes() -> Router<AppState> {
    Router::new()
        .route("/medications", get(get_medications_in_stock))
        .route("/:id", get(get_pharmacies_with_medication))
}

/// Manager routes; the caller guards them.
pub fn manager_pharmacy_routes() -> Router<AppState> {
    Router::new().route("/", post(create_pharmacy))
}

/// Pharmacies with unexpired stock of a medication
#[utoipa::path(
    get,
    path = "/api/pharmacies/{medication_id}",
    tag = "Pharmacies",
    params(("medication_id" = i32, Path, description = "Medication ID")),
    responses((status = 200, description = "Pharmacies", body = Vec<Pharmacy>))
)]
pub async fn get_pharmacies_with_medication(
    State(state): State<AppState>,
    Path(medication_id): Path<i32>,
) -> AppResult<Json<Vec<Pharmacy>>> {
    let pharmacies = state
        .pharmacy_service
        .get_pharmacies_with_medication(medication_id)
        .await?;
    Ok(Json(pharmacies))
}

/// Medications in stock at any pharmacy
#[utoipa::path(
    get,
    path = "/api/pharmacies/medications",
    tag = "Pharmacies",
    responses(
        (status = 200, description = "Medications", body = Vec<MedicationSummary>),
        (status = 503, description = "Medication service unavailable")
    )
)]
pub async fn get_medications_in_stock(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MedicationSummary>>> {
    Ok(Json(state.inventory_service.get_medications_in_stock().await?))
}

/// Create a pharmacy managed by the caller
#[utoipa::path(
    post,
    path = "/api/pharmacies",
    tag = "Pharmacies",
    security(("bearer_auth" = [])),
    request_body = CreatePharmacyRequest,
    responses(
        (status = 201, description = "Pharmacy created", body = Pharmacy),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not a manager")
    )
)]
pub async fn create_pharmacy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePharmacyRequest>,
) -> AppResult<(StatusCode, Json<Pharmacy>)> {
    let pharmacy = state
        .pharmacy_service
        .save_pharmacy(NewPharmacy {
            name: payload.name,
            address: payload.address,
            manager_id: Some(user.id),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(pharmacy)))
}
