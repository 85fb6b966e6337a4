// ============================================================================
// Recipe API - Admin Handlers
// File: crates/recipe-api/src/handlers/admin.rs
// ============================================================================
//! Admin-only handlers; every route requires the `admin` role

use axum::extract::{Path, State};
use recipe_core::domain::Recipe;
use recipe_core::services::{AdminStats, RoleChange};
use recipe_shared::Page;

use crate::dto::{PageQuery, RecipeQuery, UserDto};
use crate::extract::{parse_id, AdminUser, ApiQuery, Payload};
use crate::response::{deleted, ok, ApiResult};
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Page<UserDto>> {
    let page = state.services.admin.list_users(&query.pagination()).await?;
    ok(page.map(UserDto::from))
}

/// PUT /admin/users/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Payload(change): Payload<RoleChange>,
) -> ApiResult<UserDto> {
    let id = parse_id(&id)?;
    let user = state.services.admin.set_role(&admin, &id, change.role).await?;
    ok(user.into())
}

/// DELETE /admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.services.admin.delete_user(&admin, &id).await?;
    deleted()
}

/// GET /admin/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<RecipeQuery>,
) -> ApiResult<Page<Recipe>> {
    let (filter, pagination) = query.into_parts();
    ok(state.services.admin.list_recipes(filter, &pagination).await?)
}

/// DELETE /admin/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.services.admin.delete_recipe(&admin, &id).await?;
    deleted()
}

/// GET /admin/stats
pub async fn stats(State(state): State<AppState>, AdminUser(_admin): AdminUser) -> ApiResult<AdminStats> {
    ok(state.services.admin.stats().await?)
}
