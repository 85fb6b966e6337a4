//! API Response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, crate::error::ApiError>;
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), crate::error::ApiError>;

pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

/// `200` with `data: null`
pub fn deleted() -> ApiResult<()> {
    ok(())
}
