use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use recipe_core::domain::Recipe;

use crate::extract::{parse_id, CurrentUser};
use crate::response::{deleted, ok, ApiResponse, ApiResult, Created};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<Vec<Recipe>> {
    ok(state.services.favorites.list(&user).await?)
}

/// `201` when newly favorited, `200` when it already was.
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(recipe_id): Path<String>,
) -> Created<Recipe> {
    let recipe_id = parse_id(&recipe_id)?;
    let (recipe, added) = state.services.favorites.add(&user, &recipe_id).await?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::success(recipe))))
}

pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(recipe_id): Path<String>,
) -> ApiResult<()> {
    let recipe_id = parse_id(&recipe_id)?;
    state.services.favorites.remove(&user, &recipe_id).await?;
    deleted()
}
