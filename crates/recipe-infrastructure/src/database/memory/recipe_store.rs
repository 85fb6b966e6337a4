use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use recipe_core::domain::{Recipe, RecipeFilter};
use recipe_core::error::DomainError;
use recipe_core::repositories::RecipeRepository;
use recipe_shared::{Page, Pagination};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryRecipeRepository {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Recipe>, DomainError> {
        Ok(self.recipes.read().get(id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, DomainError> {
        let recipes = self.recipes.read();
        Ok(ids.iter().filter_map(|id| recipes.get(id).cloned()).collect())
    }

    async fn search(&self, filter: &RecipeFilter, pagination: &Pagination) -> Result<Page<Recipe>, DomainError> {
        let mut matching: Vec<Recipe> = self
            .recipes
            .read()
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(pagination.slice(matching))
    }

    async fn ids_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .recipes
            .read()
            .values()
            .filter(|r| r.owner_id == *owner_id)
            .map(|r| r.id)
            .collect())
    }

    async fn count(&self, public_only: bool) -> Result<u64, DomainError> {
        Ok(self
            .recipes
            .read()
            .values()
            .filter(|r| !public_only || r.is_public)
            .count() as u64)
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        self.recipes.write().insert(recipe.id, recipe.clone());
        Ok(recipe.clone())
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        match self.recipes.write().get_mut(&recipe.id) {
            Some(stored) => {
                *stored = recipe.clone();
                Ok(recipe.clone())
            }
            None => Err(DomainError::RecipeNotFound),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.recipes.write().remove(id);
        Ok(())
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        let mut recipes = self.recipes.write();
        let before = recipes.len();
        recipes.retain(|_, r| r.owner_id != *owner_id);
        Ok((before - recipes.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::domain::RecipeDraft;

    fn recipe(owner: Uuid, title: &str, tags: &[&str], is_public: bool) -> Recipe {
        Recipe::new(
            owner,
            RecipeDraft {
                title: title.into(),
                description: Some("family favourite".into()),
                ingredients: vec![],
                steps: vec![],
                category: Some("Dinner".into()),
                tags: tags.iter().map(|t| t.to_string()).collect(),
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
    async fn test_search_filters_and_paginates() {
        let repo = MemoryRecipeRepository::default();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        repo.create(&recipe(me, "Green Curry", &["thai"], false)).await.unwrap();
        repo.create(&recipe(me, "Red Curry", &["thai", "spicy"], true)).await.unwrap();
        repo.create(&recipe(other, "Curry Laksa", &["malaysian"], true)).await.unwrap();

        let mine = repo
            .search(&RecipeFilter::default().owned_by(me), &Pagination::default())
            .await
            .unwrap();
        assert_eq!(mine.total, 2);

        let public_thai = RecipeFilter::new(Some("CURRY".into()), None, Some("Thai".into())).public_only();
        let found = repo.search(&public_thai, &Pagination::default()).await.unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].title, "Red Curry");

        let page = repo
            .search(&RecipeFilter::default(), &Pagination::new(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);

        assert_eq!(repo.count(true).await.unwrap(), 2);
        assert_eq!(repo.delete_by_owner(&me).await.unwrap(), 2);
        assert_eq!(repo.count(false).await.unwrap(), 1);
    }
}
