//! Private recipe handlers, mounted at `/api/recipes` and `/resource`

use axum::extract::{Path, State};
use recipe_core::domain::{Recipe, RecipeDraft, RecipePatch};
use recipe_shared::Page;

use crate::dto::RecipeQuery;
use crate::extract::{parse_id, ApiQuery, CurrentUser, Payload};
use crate::response::{created, deleted, ok, ApiResult, Created};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<RecipeQuery>,
) -> ApiResult<Page<Recipe>> {
    let (filter, pagination) = query.into_parts();
    ok(state.services.recipes.list_own(&user, filter, &pagination).await?)
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Payload(draft): Payload<RecipeDraft>,
) -> Created<Recipe> {
    created(state.services.recipes.create(&user, draft).await?)
}

pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Recipe> {
    let id = parse_id(&id)?;
    ok(state.services.recipes.get(&user, &id).await?)
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Payload(patch): Payload<RecipePatch>,
) -> ApiResult<Recipe> {
    let id = parse_id(&id)?;
    ok(state.services.recipes.update(&user, &id, patch).await?)
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.services.recipes.delete(&user, &id).await?;
    deleted()
}
