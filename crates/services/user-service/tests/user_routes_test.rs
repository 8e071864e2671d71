//! HTTP routes of the user service.

mod support;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::Role;
use serde_json::{json, Value};
use support::Fixture;
use tower::ServiceExt;
use user_service_lib::client::StubPharmacyClient;
use user_service_lib::routes::create_router;
use user_service_lib::service::UserService;

async fn setup() -> (Fixture, Router, String) {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;
    let admin = fx
        .manager
        .save_admin("root@pharmacy.ro", "RootPass123", "+40700000000")
        .await
        .unwrap();
    let (token, _) = fx.jwt.issue(admin.id, Role::Admin).unwrap();
    let app = create_router(fx.state());
    (fx, app, token)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_and_token() {
    let (_fx, app, _) = setup().await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/token",
            None,
            Some(json!({"principal": "root@pharmacy.ro", "password": "RootPass123"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["token"].is_string());
}

#[tokio::test]
async fn test_user_routes_require_admin() {
    let (fx, app, _) = setup().await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/users", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (employee_token, _) = fx.jwt.issue(42, Role::Employee).unwrap();
    let response = app
        .oneshot(request(Method::GET, "/api/users", Some(&employee_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invite_and_complete_registration() {
    let (fx, app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/users/invite",
            Some(&token),
            Some(json!({"email": "ana@pharmacy.ro", "name": "Ana", "role": "employee", "pharmacy_id": 3})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Invitation sent to ana@pharmacy.ro"})
    );

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/users/invite/complete",
            None,
            Some(json!({
                "invite_token": fx.last_invite_token(),
                "password": "SecurePass123",
                "phone_number": "+40712345678"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["role"], "EMPLOYEE");
    assert_eq!(created["notification_preference"], "EMAIL");
    assert!(created.get("password").is_none());

    let response = app
        .oneshot(request(Method::GET, "/api/users?role=EMPLOYEE", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "ana@pharmacy.ro");
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected() {
    let (_fx, app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/users/invite",
            Some(&token),
            Some(json!({"email": "ana@pharmacy.ro", "name": "Ana", "role": "pharmacist"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/users?role=boss", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/users/invite/complete",
            None,
            Some(json!({"invite_token": "x", "password": "short", "phone_number": "0712"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_user() {
    let (fx, app, token) = setup().await;
    let admin_id = fx.manager.list_users(None).await.unwrap()[0].id;

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/api/users/{}", admin_id),
            Some(&token),
            Some(json!({"phone_number": "+40711111111"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["phone_number"], "+40711111111");

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            "/api/users/999",
            Some(&token),
            Some(json!({"role": "MANAGER"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, &format!("/api/users/{}", admin_id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(fx.email.sent().last().unwrap().0, "root@pharmacy.ro");

    let response = app
        .oneshot(request(Method::DELETE, &format!("/api/users/{}", admin_id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_pharmacies() {
    let (fx, app, token) = setup().await;
    let employee = fx
        .manager
        .save_admin("second@pharmacy.ro", "SecondPass1", "+40722222222")
        .await
        .unwrap();
    fx.manager
        .update_user(
            employee.id,
            user_service_lib::models::UserChanges {
                role: Some(Role::Employee),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let response = app
        .oneshot(request(
            Method::GET,
            &format!("/api/users/{}/pharmacies", employee.id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([1, 2, 3]));
}
