//! Meal plan handlers

use axum::extract::{Path, State};
use chrono::Utc;
use recipe_core::domain::{DateRange, MealPlanDraft, MealPlanItem, MealPlanPatch, ShoppingList};

use crate::dto::DateRangeQuery;
use crate::error::ApiError;
use crate::extract::{parse_id, ApiQuery, CurrentUser, Payload};
use crate::response::{created, deleted, ok, ApiResult, Created};
use crate::state::AppState;

/// Missing bounds default around the current UTC date.
fn resolve_range(query: DateRangeQuery) -> Result<DateRange, ApiError> {
    Ok(DateRange::resolve(query.from, query.to, Utc::now().date_naive())?)
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> ApiResult<Vec<MealPlanItem>> {
    let range = resolve_range(query)?;
    ok(state.services.meal_plans.list(&user, &range).await?)
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Payload(draft): Payload<MealPlanDraft>,
) -> Created<MealPlanItem> {
    created(state.services.meal_plans.create(&user, draft).await?)
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Payload(patch): Payload<MealPlanPatch>,
) -> ApiResult<MealPlanItem> {
    let id = parse_id(&id)?;
    ok(state.services.meal_plans.update(&user, &id, patch).await?)
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.services.meal_plans.delete(&user, &id).await?;
    deleted()
}

pub async fn shopping_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> ApiResult<ShoppingList> {
    let range = resolve_range(query)?;
    ok(state.services.meal_plans.shopping_list(&user, &range).await?)
}
