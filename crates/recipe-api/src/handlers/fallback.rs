//! Terminal handlers: unmatched routes and caught panics

use std::any::Any;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ApiResponse;

/// Reports the path as the client sent it, trailing slash included.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    let message = format!("Not Found - {}", uri.path());
    (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::error("NOT_FOUND", &message))).into_response()
}

/// Turns a handler panic into the JSON `500` envelope.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL_ERROR", "Internal server error")),
    )
        .into_response()
}
