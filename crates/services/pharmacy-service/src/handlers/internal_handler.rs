//! Internal API used by the user service.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use common::AppResult;
use domain::Role;

use crate::models::UserAssignment;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PharmacyLookup {
    pub user_id: i32,
    /// MANAGER or EMPLOYEE
    pub role: String,
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InternalKey {
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PharmacyIds {
    pub ids: Vec<i32>,
}

/// Key-protected routes; no bearer token involved.
pub fn internal_routes() -> Router<AppState> {
    Router::new()
        .route("/internal/", get(get_pharmacy_ids))
        .route("/internal/employees/sync", put(sync_employee))
}

/// Pharmacies a user manages or works at
#[utoipa::path(
    get,
    path = "/api/pharmacies/internal/",
    tag = "Internal",
    params(PharmacyLookup),
    responses(
        (status = 200, description = "Pharmacy ids", body = PharmacyIds),
        (status = 400, description = "Role without pharmacies"),
        (status = 401, description = "Unknown API key")
    )
)]
pub async fn get_pharmacy_ids(
    State(state): State<AppState>,
    Query(lookup): Query<PharmacyLookup>,
) -> AppResult<Json<PharmacyIds>> {
    state.internal_keys.check(lookup.key.as_deref())?;
    let role = Role::from_str(&lookup.role)?;

    let ids = state
        .pharmacy_service
        .get_pharmacy_ids(lookup.user_id, role)
        .await?;
    Ok(Json(PharmacyIds { ids }))
}

/// Attach a user to a pharmacy as employee or manager
#[utoipa::path(
    put,
    path = "/api/pharmacies/internal/employees/sync",
    tag = "Internal",
    params(InternalKey),
    request_body = UserAssignment,
    responses(
        (status = 202, description = "User assigned"),
        (status = 400, description = "Role cannot be assigned"),
        (status = 401, description = "Unknown API key"),
        (status = 404, description = "Pharmacy not found")
    )
)]
pub async fn sync_employee(
    State(state): State<AppState>,
    Query(key): Query<InternalKey>,
    Json(assignment): Json<UserAssignment>,
) -> AppResult<StatusCode> {
    state.internal_keys.check(key.key.as_deref())?;
    state.pharmacy_service.save_user_assignment(assignment).await?;
    Ok(StatusCode::ACCEPTED)
}
