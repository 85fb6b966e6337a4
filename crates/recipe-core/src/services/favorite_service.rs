//! Per-user favorite recipes

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::recipe_service::find_visible_recipe;
use crate::domain::{Recipe, User};
use crate::error::DomainError;
use crate::repositories::{FavoriteRepository, RecipeRepository};

pub struct FavoriteService {
    favorite_repo: Arc<dyn FavoriteRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
}

impl FavoriteService {
    pub fn new(favorite_repo: Arc<dyn FavoriteRepository>, recipe_repo: Arc<dyn RecipeRepository>) -> Self {
        Self {
            favorite_repo,
            recipe_repo,
        }
    }

    /// Most recently favorited first, skipping recipes the user can no longer see.
    pub async fn list(&self, user: &User) -> Result<Vec<Recipe>, DomainError> {
        let ids = self.favorite_repo.recipe_ids(&user.id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut by_id: HashMap<Uuid, Recipe> = self
            .recipe_repo
            .find_many(&ids)
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

    /// Returns the recipe and whether it was newly added.
    pub async fn add(&self, user: &User, recipe_id: &Uuid) -> Result<(Recipe, bool), DomainError> {
        let recipe = find_visible_recipe(self.recipe_repo.as_ref(), user, recipe_id).await?;
        let created = self.favorite_repo.add(&user.id, recipe_id).await?;
        if created {
            info!(user_id = %user.id, recipe_id = %recipe_id, "Favorite added");
        }
        Ok((recipe, created))
    }

    pub async fn remove(&self, user: &User, recipe_id: &Uuid) -> Result<(), DomainError> {
        if !self.favorite_repo.remove(&user.id, recipe_id).await? {
            return Err(DomainError::FavoriteNotFound);
        }
        info!(user_id = %user.id, recipe_id = %recipe_id, "Favorite removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecipeDraft, UserRole};
    use crate::repositories::favorite_repository::MockFavoriteRepository;
    use crate::repositories::recipe_repository::MockRecipeRepository;

    fn user() -> User {
        User::new("Cook".into(), format!("{}@example.com", Uuid::new_v4()), "h".into(), UserRole::User).unwrap()
    }

    fn recipe(owner: Uuid, title: &str, is_public: bool) -> Recipe {
        Recipe::new(
            owner,
            RecipeDraft {
                title: title.into(),
                description: None,
                ingredients: vec![],
                steps: vec![],
                category: None,
                tags: vec![],
                prep_minutes: None,
                cook_minutes: None,
                servings: None,
                image_url: None,
                is_public,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_keeps_favorite_order_and_drops_hidden() {
        let me = user();
        let other = Uuid::new_v4();
        let newest = recipe(other, "Newest", true);
        let hidden = recipe(other, "Hidden", false);
        let oldest = recipe(me.id, "Oldest", false);
        let ids = vec![newest.id, hidden.id, oldest.id];

        let mut favorites = MockFavoriteRepository::new();
        let returned = ids.clone();
        favorites
            .expect_recipe_ids()
            .returning(move |_| Ok(returned.clone()));
        let mut recipes = MockRecipeRepository::new();
        let stored = vec![oldest.clone(), hidden.clone(), newest.clone()];
        recipes
            .expect_find_many()
            .returning(move |_| Ok(stored.clone()));

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes));
        let titles: Vec<String> = service
            .list(&me)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Newest", "Oldest"]);
    }

    #[tokio::test]
    async fn test_add_requires_visible_recipe() {
        let me = user();
        let hidden = recipe(Uuid::new_v4(), "Secret", false);
        let id = hidden.id;

        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(hidden.clone())));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().never();

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes));
        assert!(matches!(service.add(&me, &id).await, Err(DomainError::RecipeNotFound)));
    }

    #[tokio::test]
    async fn test_remove_missing_favorite() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_remove().returning(|_, _| Ok(false));
        let service = FavoriteService::new(Arc::new(favorites), Arc::new(MockRecipeRepository::new()));

        let err = service.remove(&user(), &Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::FavoriteNotFound));
    }
}
