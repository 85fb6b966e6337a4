//! Meal planning and the derived shopping list

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::recipe_service::find_visible_recipe;
use crate::domain::{
    build_shopping_list, DateRange, MealPlanDraft, MealPlanEntry, MealPlanItem, MealPlanPatch, Recipe, RecipeSummary,
    ShoppingList, User,
};
use crate::error::DomainError;
use crate::repositories::{MealPlanRepository, RecipeRepository};

pub struct MealPlanService {
    meal_plan_repo: Arc<dyn MealPlanRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
}

impl MealPlanService {
    pub fn new(meal_plan_repo: Arc<dyn MealPlanRepository>, recipe_repo: Arc<dyn RecipeRepository>) -> Self {
        Self {
            meal_plan_repo,
            recipe_repo,
        }
    }

    pub async fn list(&self, user: &User, range: &DateRange) -> Result<Vec<MealPlanItem>, DomainError> {
        let entries = self.entries_in(user, range).await?;
        let recipes = self.visible_recipes(user, &entries).await?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let recipe = recipes.get(&entry.recipe_id).map(RecipeSummary::from);
                MealPlanItem { entry, recipe }
            })
            .collect())
    }

    pub async fn create(&self, user: &User, draft: MealPlanDraft) -> Result<MealPlanItem, DomainError> {
        let recipe = find_visible_recipe(self.recipe_repo.as_ref(), user, &draft.recipe_id).await?;
        let entry = MealPlanEntry::new(user.id, draft)?;

        let created = self.meal_plan_repo.create(&entry).await?;
        info!(entry_id = %created.id, owner_id = %user.id, date = %created.date, "Meal planned");
        Ok(MealPlanItem {
            entry: created,
            recipe: Some(RecipeSummary::from(&recipe)),
        })
    }

    pub async fn update(&self, user: &User, id: &Uuid, patch: MealPlanPatch) -> Result<MealPlanItem, DomainError> {
        let mut entry = self.find_owned(user, id).await?;
        entry.apply(patch)?;
        let recipe = find_visible_recipe(self.recipe_repo.as_ref(), user, &entry.recipe_id).await?;

        let updated = self.meal_plan_repo.update(&entry).await?;
        info!(entry_id = %id, "Meal plan entry updated");
        Ok(MealPlanItem {
            entry: updated,
            recipe: Some(RecipeSummary::from(&recipe)),
        })
    }

    pub async fn delete(&self, user: &User, id: &Uuid) -> Result<(), DomainError> {
        let entry = self.find_owned(user, id).await?;
        self.meal_plan_repo.delete(&entry.id).await?;
        info!(entry_id = %id, "Meal plan entry deleted");
        Ok(())
    }

    pub async fn shopping_list(&self, user: &User, range: &DateRange) -> Result<ShoppingList, DomainError> {
        let entries = self.entries_in(user, range).await?;
        let recipes = self.visible_recipes(user, &entries).await?;

        let planned: Vec<(&MealPlanEntry, &Recipe)> = entries
            .iter()
            .filter_map(|entry| recipes.get(&entry.recipe_id).map(|recipe| (entry, recipe)))
            .collect();

        Ok(ShoppingList {
            range: *range,
            items: build_shopping_list(&planned),
        })
    }

    async fn entries_in(&self, user: &User, range: &DateRange) -> Result<Vec<MealPlanEntry>, DomainError> {
        let mut entries = self.meal_plan_repo.list_by_owner(&user.id, range).await?;
        entries.sort_by(|a, b| (a.date, a.meal_type, a.created_at).cmp(&(b.date, b.meal_type, b.created_at)));
        Ok(entries)
    }

    async fn visible_recipes(
        &self,
        user: &User,
        entries: &[MealPlanEntry],
    ) -> Result<HashMap<Uuid, Recipe>, DomainError> {
        let mut ids: Vec<Uuid> = entries.iter().map(|e| e.recipe_id).collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .recipe_repo
            .find_many(&ids)
            .await?
            .into_iter()
            .filter(|r| r.is_visible_to(user))
            .map(|r| (r.id, r))
            .collect())
    }

    async fn find_owned(&self, user: &User, id: &Uuid) -> Result<MealPlanEntry, DomainError> {
        self.meal_plan_repo
            .find_by_id(id)
            .await?
            .filter(|e| e.owner_id == user.id)
            .ok_or(DomainError::MealPlanEntryNotFound)
    }
}
