// ============================================================================
// Recipe Core - Collection Service
// File: crates/recipe-core/src/services/collection_service.rs
// ============================================================================
//! Named recipe collections owned by a single user

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::recipe_service::find_visible_recipe;
use crate::domain::{Collection, CollectionDetail, CollectionDraft, CollectionPatch, Recipe, User};
use crate::error::DomainError;
use crate::repositories::{CollectionRepository, RecipeRepository};

pub struct CollectionService {
    collection_repo: Arc<dyn CollectionRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
}

impl CollectionService {
    pub fn new(collection_repo: Arc<dyn CollectionRepository>, recipe_repo: Arc<dyn RecipeRepository>) -> Self {
        Self {
            collection_repo,
            recipe_repo,
        }
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Collection>, DomainError> {
        self.collection_repo.list_by_owner(&user.id).await
    }

    pub async fn create(&self, user: &User, draft: CollectionDraft) -> Result<Collection, DomainError> {
        let collection = Collection::new(user.id, draft)?;
        self.ensure_unique_name(user, &collection.name, None).await?;

        let created = self.collection_repo.create(&collection).await?;
        info!(collection_id = %created.id, owner_id = %user.id, "Collection created");
        Ok(created)
    }

    pub async fn get(&self, user: &User, id: &Uuid) -> Result<CollectionDetail, DomainError> {
        self.detail(user, id).await
    }

    pub async fn update(&self, user: &User, id: &Uuid, patch: CollectionPatch) -> Result<Collection, DomainError> {
        let mut collection = self.find_owned(user, id).await?;
        collection.apply(patch)?;
        self.ensure_unique_name(user, &collection.name, Some(collection.id)).await?;

        let updated = self.collection_repo.update(&collection).await?;
        info!(collection_id = %id, "Collection updated");
        Ok(updated)
    }

    pub async fn delete(&self, user: &User, id: &Uuid) -> Result<(), DomainError> {
        let collection = self.find_owned(user, id).await?;
        self.collection_repo.delete(&collection.id).await?;
        info!(collection_id = %id, "Collection deleted");
        Ok(())
    }

    /// Adding a recipe that is already present is a no-op.
    pub async fn add_recipe(&self, user: &User, id: &Uuid, recipe_id: &Uuid) -> Result<CollectionDetail, DomainError> {
        let collection = self.find_owned(user, id).await?;
        find_visible_recipe(self.recipe_repo.as_ref(), user, recipe_id).await?;

        if self.collection_repo.add_recipe(&collection.id, recipe_id).await? {
            info!(collection_id = %id, recipe_id = %recipe_id, "Recipe added to collection");
        }
        self.detail(user, id).await
    }

    pub async fn remove_recipe(&self, user: &User, id: &Uuid, recipe_id: &Uuid) -> Result<CollectionDetail, DomainError> {
        let collection = self.find_owned(user, id).await?;
        if !self.collection_repo.remove_recipe(&collection.id, recipe_id).await? {
            return Err(DomainError::RecipeNotInCollection);
        }
        info!(collection_id = %id, recipe_id = %recipe_id, "Recipe removed from collection");
        self.detail(user, id).await
    }

    /// Re-reads the stored document so concurrent changes show up.
    async fn detail(&self, user: &User, id: &Uuid) -> Result<CollectionDetail, DomainError> {
        let collection = self.find_owned(user, id).await?;
        let recipes = self.resolve_recipes(user, &collection.recipe_ids).await?;
        Ok(CollectionDetail { collection, recipes })
    }

    async fn find_owned(&self, user: &User, id: &Uuid) -> Result<Collection, DomainError> {
        self.collection_repo
            .find_by_id(id)
            .await?
            .filter(|c| c.owner_id == user.id)
            .ok_or(DomainError::CollectionNotFound)
    }

    async fn ensure_unique_name(&self, user: &User, name: &str, current: Option<Uuid>) -> Result<(), DomainError> {
        match self.collection_repo.find_by_owner_and_name(&user.id, name).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(DomainError::CollectionNameAlreadyExists(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Collection order, restricted to recipes the owner can still see.
    async fn resolve_recipes(&self, user: &User, ids: &[Uuid]) -> Result<Vec<Recipe>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut by_id: HashMap<Uuid, Recipe> = self
            .recipe_repo
            .find_many(ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .filter(|r| r.is_visible_to(user))
            .collect())
    }
}
