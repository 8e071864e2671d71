//! Sale handlers and reports.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use jwt_guard::CurrentUser;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{DEFAULT_MOST_SOLD, DEFAULT_TREND_DAYS};

use crate::models::{MostSoldMedication, NewSaleItem, Sale, SaleTrend};
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SaleItemRequest {
    pub medication_id: i32,
    #[schema(example = 2)]
    pub quantity: i32,
    /// Minor units
    #[schema(example = 1250)]
    pub unit_price: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlaceSaleRequest {
    #[validate(length(min = 1, message = "A sale needs at least one item"))]
    pub sale_items: Vec<SaleItemRequest>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MostSoldQuery {
    /// Number of medications, default 3
    pub most_sold: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendQuery {
    /// Days back from now (at most 3650), default 7
    pub days: Option<i64>,
}

/// Employee routes; the caller guards them.
pub fn employee_sale_routes() -> Router<AppState> {
    Router::new().route("/:id/sales", post(place_sale))
}

/// Manager routes; the caller guards them.
pub fn manager_sale_routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(get_most_sold))
        .route("/sales/trends", get(get_sale_trends))
}

/// Place a sale at the caller's pharmacy
#[utoipa::path(
    post,
    path = "/api/pharmacies/{pharmacy_id}/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(("pharmacy_id" = i32, Path, description = "Pharmacy ID")),
    request_body = PlaceSaleRequest,
    responses(
        (status = 201, description = "Sale placed", body = Sale),
        (status = 400, description = "Invalid items or insufficient inventory"),
        (status = 401, description = "Not an employee"),
        (status = 403, description = "Caller does not work at this pharmacy")
    )
)]
pub async fn place_sale(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(pharmacy_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PlaceSaleRequest>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let items = payload
        .sale_items
        .into_iter()
        .map(|item| NewSaleItem {
            medication_id: item.medication_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        })
        .collect();

    let sale = state.sale_service.save_sale(pharmacy_id, user.id, items).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Best-selling medications across the caller's pharmacies
#[utoipa::path(
    get,
    path = "/api/pharmacies/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(MostSoldQuery),
    responses(
        (status = 200, description = "Medications by sold quantity", body = Vec<MostSoldMedication>),
        (status = 401, description = "Not a manager")
    )
)]
pub async fn get_most_sold(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MostSoldQuery>,
) -> AppResult<Json<Vec<MostSoldMedication>>> {
    let limit = query.most_sold.unwrap_or(DEFAULT_MOST_SOLD);
    Ok(Json(state.sale_service.get_most_sold(user.id, limit).await?))
}

/// Daily sales of the caller's pharmacies
#[utoipa::path(
    get,
    path = "/api/pharmacies/sales/trends",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(TrendQuery),
    responses(
        (status = 200, description = "Totals per day", body = Vec<SaleTrend>),
        (status = 401, description = "Not a manager")
    )
)]
pub async fn get_sale_trends(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<SaleTrend>>> {
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    Ok(Json(state.sale_service.get_sale_trends(user.id, days).await?))
}
