//! Router tests for the token endpoints and the bearer guard.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use chrono::Duration;
use domain::{Password, Role};
use jwt_guard::{
    authorize, token_routes, CurrentUser, Jwt, JwtGuard, MockPrincipalStore, Principal,
    TokenIssuer, TokenOut,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &[u8] = b"integration-secret-key-32-bytes!!";

fn jwt() -> Arc<Jwt> {
    Arc::new(Jwt::new(SECRET, Duration::hours(1)))
}

fn app(jwt: Arc<Jwt>) -> Router {
    let hash = Password::new("manager-pass").unwrap().into_string();
    let mut store = MockPrincipalStore::new();
    store.expect_find_by_principal().returning(move |principal| {
        if principal == "manager@pharmacy.ro" {
            Ok(Some(Principal {
                id: 11,
                role: Role::Manager,
                password_hash: hash.clone(),
            }))
        } else {
            Ok(None)
        }
    });

    let issuer = TokenIssuer::new(Arc::new(store), jwt.clone());

    let admin_only = Router::new()
        .route(
            "/admin",
            get(|Extension(user): Extension<CurrentUser>| async move { user.id.to_string() }),
        )
        .route_layer(middleware::from_fn_with_state(
            JwtGuard::role(jwt, Role::Admin),
            authorize,
        ));

    Router::new()
        .nest("/api/auth", token_routes(issuer))
        .merge(admin_only)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn token_request(principal: &str, password: &str) -> Request<Body> {
    Request::post("/api/auth/token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "principal": principal, "password": password }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_obtain_and_verify_token() {
    let jwt = jwt();
    let app = app(jwt.clone());

    let response = app
        .clone()
        .oneshot(token_request("manager@pharmacy.ro", "manager-pass"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let out: TokenOut = serde_json::from_value(body_json(response).await).unwrap();

    let response = app
        .oneshot(
            Request::post("/api/auth/token/verify")
                .header(header::AUTHORIZATION, format!("Bearer {}", out.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["expires_at"], json!(out.expires_at));
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let app = app(jwt());

    let response = app
        .clone()
        .oneshot(token_request("manager@pharmacy.ro", "nope-nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"]["code"],
        json!("INVALID_CREDENTIALS")
    );

    let response = app
        .oneshot(token_request("ghost@pharmacy.ro", "manager-pass"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_rejects_missing_or_malformed_header() {
    let app = app(jwt());

    for header_value in [None, Some("Token abc"), Some("Bearer "), Some("Bearer garbage")] {
        let mut request = Request::post("/api/auth/token/verify");
        if let Some(value) = header_value {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", header_value);
    }
}

#[tokio::test]
async fn test_role_guard() {
    let jwt = jwt();
    let app = app(jwt.clone());

    let (manager_token, _) = jwt.issue(11, Role::Manager).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::get("/admin")
                .header(header::AUTHORIZATION, format!("Bearer {}", manager_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (admin_token, _) = jwt.issue(1, Role::Admin).unwrap();
    let response = app
        .oneshot(
            Request::get("/admin")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"1");
}
