use axum::Json;
use recipe_shared::constants::HEALTH_MESSAGE;

use crate::dto::HealthResponse;

/// Health check handler - GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE,
    })
}
