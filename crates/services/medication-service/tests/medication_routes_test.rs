//! HTTP routes of the medication service.

mod support;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::Role;
use serde_json::{json, Value};
use support::{files_in, Fixture};
use tower::ServiceExt;

use medication_service_lib::routes::create_router;

const BOUNDARY: &str = "X-MEDICATION-BOUNDARY";

async fn setup() -> (Fixture, Router, String) {
    let fx = Fixture::new().await;
    let (token, _) = fx.jwt.issue(7, Role::Manager).unwrap();
    let app = create_router(fx.state());
    (fx, app, token)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
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

fn upload_request(uri: &str, token: &str, filename: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"alt_text\"\r\n\r\nBox front\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: image/png\r\n\r\nPNGDATA\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = filename
    );

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_medication(app: &Router, token: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/medications",
            Some(token),
            Some(json!({"name": "Nurofen", "description": "Ibuprofen 200mg", "purchase_price": 1890})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_reads_are_public_and_writes_need_a_manager() {
    let (fx, app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/api/medications", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    let body = json!({"name": "Nurofen", "description": "", "purchase_price": 10});
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/medications", None, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (employee, _) = fx.jwt.issue(8, Role::Employee).unwrap();
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/medications", Some(&employee), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let created = create_medication(&app, &token).await;
    assert_eq!(created["purchase_price"], 1890);
    assert_eq!(created["images"], json!([]));
}

#[tokio::test]
async fn test_filter_by_ids() {
    let (_fx, app, token) = setup().await;
    let first = create_medication(&app, &token).await;
    create_medication(&app, &token).await;

    let uri = format!("/api/medications?ids={}", first["id"]);
    let response = app
        .clone()
        .oneshot(json_request(Method::GET, &uri, None, None))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], first["id"]);

    let response = app
        .oneshot(json_request(Method::GET, "/api/medications?ids=1,abc", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manufacturers_and_missing_medication() {
    let (_fx, app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/medications/manufacturers",
            Some(&token),
            Some(json!({"name": "Zentiva", "contact_info": "+40213040000"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/api/medications/manufacturers", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await[0]["name"], "Zentiva");

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/api/medications/77", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/medications",
            Some(&token),
            Some(json!({"name": "X", "description": "", "purchase_price": 1, "manufacturer_id": 99})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_upload() {
    let (fx, app, token) = setup().await;
    let medication = create_medication(&app, &token).await;
    let uri = format!("/api/medications/{}/images", medication["id"]);

    let response = app
        .clone()
        .oneshot(upload_request(&uri, &token, "front.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    assert_eq!(image["alt_text"], "Box front");

    let stored = files_in(&fx.media_dir);
    assert_eq!(stored.len(), 1);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, &format!("/{}", image["image_url"].as_str().unwrap()), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(upload_request(&uri, &token, "front.gif"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(files_in(&fx.media_dir).len(), 1);
}
