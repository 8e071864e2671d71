//! Route configuration.

use axum::{middleware, Router};
use jwt_guard::{authorize, JwtGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;
use domain::Role;

use crate::handlers::{
    employee_inventory_routes, employee_sale_routes, internal_routes, manager_inventory_routes,
    manager_pharmacy_routes, manager_sale_routes, public_pharmacy_routes,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let manager_only = JwtGuard::role(state.jwt.clone(), Role::Manager);
    let employee_only = JwtGuard::role(state.jwt.clone(), Role::Employee);

    let managed = manager_pharmacy_routes()
        .merge(manager_inventory_routes())
        .merge(manager_sale_routes())
        .route_layer(middleware::from_fn_with_state(manager_only, authorize));

    let staffed = employee_inventory_routes()
        .merge(employee_sale_routes())
        .route_layer(middleware::from_fn_with_state(employee_only, authorize));

    let pharmacies = public_pharmacy_routes()
        .merge(internal_routes())
        .merge(managed)
        .merge(staffed);

    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes(state.datasource.clone()))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/pharmacies", pharmacies)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
