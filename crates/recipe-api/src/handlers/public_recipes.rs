//! Unauthenticated feed of public recipes

use axum::extract::{Path, State};
use recipe_core::domain::RecipeWithAuthor;
use recipe_shared::Page;

use crate::dto::RecipeQuery;
use crate::extract::{parse_id, ApiQuery};
use crate::response::{ok, ApiResult};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecipeQuery>,
) -> ApiResult<Page<RecipeWithAuthor>> {
    let (filter, pagination) = query.into_parts();
    ok(state.services.recipes.list_public(filter, &pagination).await?)
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<RecipeWithAuthor> {
    let id = parse_id(&id)?;
    ok(state.services.recipes.get_public(&id).await?)
}
