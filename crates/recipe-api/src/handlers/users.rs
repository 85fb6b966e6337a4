//! Profile handlers for the signed-in user

use axum::extract::State;
use recipe_core::services::{PasswordChange, ProfileUpdate};

use crate::dto::UserDto;
use crate::extract::{CurrentUser, Payload};
use crate::response::{deleted, ok, ApiResult};
use crate::state::AppState;

/// GET /users/profile
pub async fn get_profile(CurrentUser(user): CurrentUser) -> ApiResult<UserDto> {
    ok(user.into())
}

/// PUT /users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Payload(update): Payload<ProfileUpdate>,
) -> ApiResult<UserDto> {
    let updated = state.services.users.update_profile(&user, update).await?;
    ok(updated.into())
}

/// PUT /users/profile/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Payload(change): Payload<PasswordChange>,
) -> ApiResult<()> {
    state.services.users.change_password(&user, change).await?;
    ok(())
}

/// DELETE /users/profile
pub async fn delete_profile(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<()> {
    state.services.users.delete_account(&user).await?;
    deleted()
}
