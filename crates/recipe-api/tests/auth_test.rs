mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_has_exact_body() {
    let app = app();
    let response = get(&app, "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok", "message": "Recipe Book API is running" }));
}

#[tokio::test]
async fn register_login_and_me() {
    let app = app();
    let response = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "name": "Julia Child", "email": " Julia@Example.com ", "password": PASSWORD }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let user = &response.data()["user"];
    assert_eq!(user["email"], "julia@example.com");
    assert_eq!(user["role"], "user");
    assert!(user.get("password_hash").is_none());

    let login = post(&app, "/login", None, json!({ "email": "JULIA@example.com", "password": PASSWORD })).await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.data()["token"].as_str().unwrap().to_string();

    let me = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["name"], "Julia Child");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    register(&app, "Julia", "julia@example.com").await;

    let again = post(
        &app,
        "/register",
        None,
        json!({ "name": "Other Julia", "email": "JULIA@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), "CONFLICT");
}

#[tokio::test]
async fn register_validates_payload() {
    let app = app();

    let short_password = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "name": "Julia", "email": "julia@example.com", "password": "short" }),
    )
    .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.error_code(), "VALIDATION_ERROR");

    let bad_email = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "name": "Julia", "email": "not-an-email", "password": PASSWORD }),
    )
    .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_accepts_urlencoded_form() {
    let app = app();
    let request = Request::post("/register")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Form+User&email=form%40example.com&password=correct-horse-battery"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = app();
    register(&app, "Julia", "julia@example.com").await;

    let wrong = post(&app, "/api/auth/login", None, json!({ "email": "julia@example.com", "password": "nope-nope" })).await;
    let unknown = post(&app, "/api/auth/login", None, json!({ "email": "ghost@example.com", "password": PASSWORD })).await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"]["message"], unknown.body["error"]["message"]);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = app();

    let missing = get(&app, "/users/profile", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = get(&app, "/users/profile", Some("definitely.not.jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn configured_admin_email_registers_as_admin() {
    let app = app();
    let response = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "name": "Root", "email": ADMIN_EMAIL, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.data()["user"]["role"], "admin");
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let app = app();

    let response = get(&app, "/api/nothing-here", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"]["code"], "NOT_FOUND");
    assert_eq!(response.body["error"]["message"], "Not Found - /api/nothing-here");

    let post_unknown = post(&app, "/nowhere", None, json!({})).await;
    assert_eq!(post_unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_files_are_served_before_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Recipe Book</h1>").unwrap();

    let mut config = test_config();
    config.app.static_dir = dir.path().to_string_lossy().into_owned();
    let app = app_with(config);

    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Recipe Book</h1>");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = test_config();
    config.app.body_limit_bytes = 64;
    let app = app_with(config);

    let response = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "a@example.com", "password": "x".repeat(200) }),
    )
    .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code(), "PAYLOAD_TOO_LARGE");
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = app();
    let request = Request::options("/api/recipes")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn trailing_slash_matches_the_same_route() {
    let app = app();
    let (token, _) = register(&app, "Cook", "cook@example.com").await;

    let listed = get(&app, "/api/recipes/?limit=5", Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data()["limit"], 5);

    let health = get(&app, "/api/health/", None).await;
    assert_eq!(health.status, StatusCode::OK);

    let missing = get(&app, "/api/nothing-here/", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"]["message"], "Not Found - /api/nothing-here/");
}
