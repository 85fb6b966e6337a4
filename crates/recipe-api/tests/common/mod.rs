#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use recipe_api::{build_router, AppState};
use recipe_infrastructure::memory_repositories;
use recipe_shared::config::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "correct-horse-battery";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.app.static_dir = "tests/no-static-files".to_string();
    config.auth.admin_emails = vec![ADMIN_EMAIL.to_string()];
    config
}

pub fn app_with(config: AppConfig) -> Router {
    build_router(AppState::new(config, memory_repositories()))
}

pub fn app() -> Router {
    app_with(test_config())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse { status, body }
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> TestResponse {
    send(app, Method::DELETE, uri, token, None).await
}

/// Registers an account and returns `(token, user_id)`.
pub async fn register(app: &Router, name: &str, email: &str) -> (String, String) {
    let response = post(
        app,
        "/api/auth/register",
        None,
        serde_json::json!({ "name": name, "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.body);
    let token = response.data()["token"].as_str().unwrap().to_string();
    let id = response.data()["user"]["id"].as_str().unwrap().to_string();
    (token, id)
}

pub async fn create_recipe(app: &Router, token: &str, body: Value) -> String {
    let response = post(app, "/api/recipes", Some(token), body).await;
    assert_eq!(response.status, StatusCode::CREATED, "create recipe failed: {}", response.body);
    response.data()["id"].as_str().unwrap().to_string()
}
