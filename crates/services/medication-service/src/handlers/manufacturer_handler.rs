//! Manufacturer handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, ValidatedJson};

use crate::models::{Manufacturer, NewManufacturer};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturerRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Antibiotice Iasi")]
    pub name: String,
    #[validate(length(min = 1, message = "Contact info cannot be empty"))]
    #[schema(example = "office@antibiotice.ro")]
    pub contact_info: String,
}

pub fn public_manufacturer_routes() -> Router<AppState> {
    Router::new().route("/manufacturers", get(get_manufacturers))
}

pub fn manager_manufacturer_routes() -> Router<AppState> {
    Router::new().route("/manufacturers", post(create_manufacturer))
}

/// List manufacturers
#[utoipa::path(
    get,
    path = "/api/medications/manufacturers",
    tag = "Manufacturers",
    responses((status = 200, description = "Manufacturers", body = Vec<Manufacturer>))
)]
pub async fn get_manufacturers(State(state): State<AppState>) -> AppResult<Json<Vec<Manufacturer>>> {
    Ok(Json(state.manufacturer_service.get_manufacturers().await?))
}

/// Create a manufacturer
#[utoipa::path(
    post,
    path = "/api/medications/manufacturers",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not a manager")
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateManufacturerRequest>,
) -> AppResult<(StatusCode, Json<Manufacturer>)> {
    let manufacturer = state
        .manufacturer_service
        .save_manufacturer(NewManufacturer {
            name: payload.name,
            contact_info: payload.contact_info,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(manufacturer)))
}
