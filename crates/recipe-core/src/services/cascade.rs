//! Reference cleanup shared by every delete that removes recipes or users.
//!
//! Steps run references-first so a failure halfway leaves dangling ids
//! rather than orphaned documents pointing at nothing visible.

use tracing::info;
use uuid::Uuid;

use crate::error::DomainError;
use crate::repositories::Repositories;

#[derive(Clone)]
pub struct Cascade {
    repos: Repositories,
}

impl Cascade {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn delete_recipe(&self, recipe_id: &Uuid) -> Result<(), DomainError> {
        let ids = [*recipe_id];
        self.detach_recipes(&ids).await?;
        self.repos.recipes.delete(recipe_id).await?;
        info!(recipe_id = %recipe_id, "Recipe deleted");
        Ok(())
    }

    pub async fn delete_user(&self, user_id: &Uuid) -> Result<(), DomainError> {
        let recipe_ids = self.repos.recipes.ids_by_owner(user_id).await?;
        self.detach_recipes(&recipe_ids).await?;

        self.repos.favorites.delete_by_user(user_id).await?;
        self.repos.collections.delete_by_owner(user_id).await?;
        self.repos.meal_plans.delete_by_owner(user_id).await?;
        let recipes = self.repos.recipes.delete_by_owner(user_id).await?;
        self.repos.users.delete(user_id).await?;

        info!(user_id = %user_id, recipes, "User and owned documents deleted");
        Ok(())
    }

    async fn detach_recipes(&self, recipe_ids: &[Uuid]) -> Result<(), DomainError> {
        if recipe_ids.is_empty() {
            return Ok(());
        }
        self.repos.favorites.delete_by_recipes(recipe_ids).await?;
        self.repos.collections.remove_recipes(recipe_ids).await?;
        self.repos.meal_plans.delete_by_recipes(recipe_ids).await?;
        Ok(())
    }
}
