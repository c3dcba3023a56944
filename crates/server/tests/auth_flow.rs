use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes;
use server::state::ServerState;
use service::mock::MockStore;
use service::profile_picture::FixedPicture;

const PICTURE: &str = "https://randomuser.me/api/portraits/men/7.jpg";

fn build_app() -> Router {
    let state = ServerState::in_memory(Arc::new(MockStore::default()), Arc::new(FixedPicture(PICTURE.into())));
    routes::build_router(state, tower_http::cors::CorsLayer::very_permissive())
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", t);
    }
    let req = match body {
        Some(b) => req
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

async fn register(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/user/create",
        None,
        Some(json!({"username": username, "name": "Test User", "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/v1/classroom/join").is_some());
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = build_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/user/create",
        None,
        Some(json!({"username": "ada", "name": "Ada Lovelace", "password": "engine"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user created");
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["profile_picture"], PICTURE);
    assert!(body.get("password").is_none());
    let token = body["token"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&token).is_ok());

    let (status, body) = send(&app, "POST", "/api/v1/user/login", None, Some(json!({"username": "ada", "password": "engine"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], token.as_str());
    assert_eq!(body["name"], "Ada Lovelace");
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let app = build_app();
    register(&app, "dup", "pw").await;

    let (status, body) = send(&app, "POST", "/api/v1/user/create", None, Some(json!({"username": "dup", "name": "Other", "password": "pw"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "POST", "/api/v1/user/create", None, Some(json!({"username": "", "name": "X", "password": "pw"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_errors_are_distinguished() {
    let app = build_app();
    register(&app, "bob", "mmm").await;

    let (status, body) = send(&app, "POST", "/api/v1/user/login", None, Some(json!({"username": "nobody", "password": "mmm"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid username");

    // 比原密码"更大"的字符串不能登录
    let (status, body) = send(&app, "POST", "/api/v1/user/login", None, Some(json!({"username": "bob", "password": "zzz"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid password");
}

#[tokio::test]
async fn protected_routes_require_a_known_token() {
    let app = build_app();
    let token = register(&app, "carol", "pw").await;

    for bad in [None, Some(""), Some("garbage"), Some("00000000-0000-0000-0000-000000000000")] {
        let (status, body) = send(&app, "GET", "/api/v1/classrooms", bad, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "un-authorized");
    }

    let bearer = format!("Bearer {token}");
    let (status, body) = send(&app, "GET", "/api/v1/classrooms", Some(&bearer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["own"], json!([]));
}

#[tokio::test]
async fn get_user_by_id() {
    let app = build_app();
    let token = register(&app, "dave", "pw").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/user/{token}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["uuid"], token.as_str());
    assert_eq!(body["data"]["username"], "dave");
    assert!(body["data"].get("password").is_none());

    // POST is accepted on the same path
    let (status, _) = send(&app, "POST", &format!("/api/v1/user/{token}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let missing = Uuid::new_v4();
    let (status, body) = send(&app, "GET", &format!("/api/v1/user/{missing}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user not found");
}

async fn send_raw(app: &Router, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let app = build_app();

    // 截断的 JSON
    let (status, body) = send_raw(&app, "/api/v1/user/create", r#"{"username":"a""#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "request failed");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let (status, body) = send_raw(&app, "/api/v1/user/create", r#"{"username":"a"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "request failed");
    assert!(body["error"].as_str().unwrap().contains("missing field"));

    let (status, body) = send_raw(&app, "/api/v1/user/login", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "request failed");
}
