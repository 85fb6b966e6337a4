//! Collection handlers; another user's collection reports as missing

use axum::extract::{Path, State};
use recipe_core::domain::{Collection, CollectionDetail, CollectionDraft, CollectionPatch};

use crate::extract::{parse_id, CurrentUser, Payload};
use crate::response::{created, deleted, ok, ApiResult, Created};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<Vec<Collection>> {
    ok(state.services.collections.list(&user).await?)
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Payload(draft): Payload<CollectionDraft>,
) -> Created<Collection> {
    created(state.services.collections.create(&user, draft).await?)
}

pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<CollectionDetail> {
    let id = parse_id(&id)?;
    ok(state.services.collections.get(&user, &id).await?)
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Payload(patch): Payload<CollectionPatch>,
) -> ApiResult<Collection> {
    let id = parse_id(&id)?;
    ok(state.services.collections.update(&user, &id, patch).await?)
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.services.collections.delete(&user, &id).await?;
    deleted()
}

pub async fn add_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, recipe_id)): Path<(String, String)>,
) -> ApiResult<CollectionDetail> {
    let (id, recipe_id) = (parse_id(&id)?, parse_id(&recipe_id)?);
    ok(state.services.collections.add_recipe(&user, &id, &recipe_id).await?)
}

pub async fn remove_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, recipe_id)): Path<(String, String)>,
) -> ApiResult<CollectionDetail> {
    let (id, recipe_id) = (parse_id(&id)?, parse_id(&recipe_id)?);
    ok(state.services.collections.remove_recipe(&user, &id, &recipe_id).await?)
}
