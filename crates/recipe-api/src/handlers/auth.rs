// ============================================================================
// Recipe API - Auth Handlers
// File: crates/recipe-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, current user)

use axum::extract::State;
use recipe_core::services::{AuthResult, LoginInput, RegisterInput};

use crate::dto::{AuthResponse, UserDto};
use crate::extract::{CurrentUser, Payload};
use crate::response::{created, ok, ApiResult, Created};
use crate::state::AppState;

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user.into(),
            token: result.token,
        }
    }
}

/// Register handler - POST /register
pub async fn register(State(state): State<AppState>, Payload(input): Payload<RegisterInput>) -> Created<AuthResponse> {
    let result = state.services.auth.register(input).await?;
    created(result.into())
}

/// Login handler - POST /login
pub async fn login(State(state): State<AppState>, Payload(input): Payload<LoginInput>) -> ApiResult<AuthResponse> {
    let result = state.services.auth.login(input).await?;
    ok(result.into())
}

/// Current user handler - GET /me
pub async fn me(CurrentUser(user): CurrentUser) -> ApiResult<UserDto> {
    ok(user.into())
}
