//! Route configuration.

use axum::{middleware, Router};
use jwt_guard::{authorize, JwtGuard};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;
use domain::Role;

use crate::handlers::{
    manager_manufacturer_routes, manager_medication_routes, public_manufacturer_routes,
    public_medication_routes,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let manager_only = JwtGuard::role(state.jwt.clone(), Role::Manager);

    let managed = manager_medication_routes()
        .merge(manager_manufacturer_routes())
        .route_layer(middleware::from_fn_with_state(manager_only, authorize));

    let medications = public_medication_routes()
        .merge(public_manufacturer_routes())
        .merge(managed);

    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes(state.datasource.clone()))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/medications", medications)
        .nest_service("/media", ServeDir::new(state.media.root()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
