//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipe_core::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => {
                tracing::warn!("{}: {}", self.code(), msg);
                msg.clone()
            }
            other => other.to_string(),
        };

        let body = Json(ApiResponse::<()>::error(self.code(), &message));
        (self.status(), body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let message = error.to_string();
        match error {
            DomainError::UserNotFound
            | DomainError::RecipeNotFound
            | DomainError::CollectionNotFound
            | DomainError::MealPlanEntryNotFound
            | DomainError::FavoriteNotFound
            | DomainError::RecipeNotInCollection => ApiError::NotFound(message),

            DomainError::InvalidCredentials | DomainError::InvalidToken(_) => ApiError::Unauthorized(message),

            DomainError::EmailAlreadyExists(_) | DomainError::CollectionNameAlreadyExists(_) => {
                ApiError::Conflict(message)
            }

            DomainError::Forbidden(_) => ApiError::Forbidden(message),

            DomainError::PasswordTooShort
            | DomainError::PasswordTooLong
            | DomainError::ValidationError(_)
            | DomainError::InvalidDateRange(_)
            | DomainError::SelfModification(_) => ApiError::Validation(message),

            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ApiError::Internal(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
