//! Token endpoints.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::post,
    Router,
};
use common::AppResult;

use crate::guard::{authorize, CurrentUser, JwtGuard};
use crate::issuer::{TokenIn, TokenIssuer, TokenOut, VerifyOut};

/// `POST /token` and `POST /token/verify`, ready to nest under any router.
pub fn token_routes<S>(issuer: TokenIssuer) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = JwtGuard::authenticated(issuer.jwt().clone());

    let verify: Router<TokenIssuer> = Router::new()
        .route("/token/verify", post(verify_token))
        .route_layer(middleware::from_fn_with_state(guard, authorize));

    Router::new()
        .route("/token", post(obtain_token))
        .merge(verify)
        .with_state(issuer)
}

/// Obtain an access token
#[utoipa::path(
    post,
    path = "/api/auth/token",
    tag = "Authentication",
    request_body = TokenIn,
    responses(
        (status = 200, description = "Token issued", body = TokenOut),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn obtain_token(
    State(issuer): State<TokenIssuer>,
    Json(payload): Json<TokenIn>,
) -> AppResult<Json<TokenOut>> {
    Ok(Json(issuer.obtain_token(payload).await?))
}

/// Verify the bearer token and return its expiry
#[utoipa::path(
    post,
    path = "/api/auth/token/verify",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyOut),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn verify_token(Extension(current_user): Extension<CurrentUser>) -> Json<VerifyOut> {
    Json(VerifyOut {
        expires_at: current_user.expires_at,
    })
}
