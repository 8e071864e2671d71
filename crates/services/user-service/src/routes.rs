//! Route configuration.

use axum::{middleware, Router};
use jwt_guard::{authorize, token_routes, JwtGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;
use domain::Role;

use crate::handlers::{admin_user_routes, public_user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let admin_only = JwtGuard::role(state.jwt.clone(), Role::Admin);

    let users = public_user_routes().merge(
        admin_user_routes().route_layer(middleware::from_fn_with_state(admin_only, authorize)),
    );

    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes(state.datasource.clone()))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/auth", token_routes(state.issuer.clone()))
        .nest("/api/users", users)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
