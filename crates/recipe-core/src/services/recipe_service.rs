// ============================================================================
// Recipe Core - Recipe Service
// File: crates/recipe-core/src/services/recipe_service.rs
// ============================================================================
//! Recipe CRUD and the public feed

use std::collections::HashMap;
use std::sync::Arc;

use recipe_shared::{Page, Pagination};
use tracing::{info, warn};
use uuid::Uuid;

use super::cascade::Cascade;
use crate::domain::{AuthorSummary, Recipe, RecipeDraft, RecipeFilter, RecipePatch, RecipeWithAuthor, User};
use crate::error::DomainError;
use crate::repositories::{RecipeRepository, UserRepository};

pub struct RecipeService {
    recipe_repo: Arc<dyn RecipeRepository>,
    user_repo: Arc<dyn UserRepository>,
    cascade: Cascade,
}

impl RecipeService {
    pub fn new(
        recipe_repo: Arc<dyn RecipeRepository>,
        user_repo: Arc<dyn UserRepository>,
        cascade: Cascade,
    ) -> Self {
        Self {
            recipe_repo,
            user_repo,
            cascade,
        }
    }

    pub async fn list_own(
        &self,
        user: &User,
        filter: RecipeFilter,
        pagination: &Pagination,
    ) -> Result<Page<Recipe>, DomainError> {
        self.recipe_repo.search(&filter.owned_by(user.id), pagination).await
    }

    pub async fn create(&self, user: &User, draft: RecipeDraft) -> Result<Recipe, DomainError> {
        let recipe = Recipe::new(user.id, draft)?;
        let created = self.recipe_repo.create(&recipe).await?;
        info!(recipe_id = %created.id, owner_id = %user.id, "Recipe created");
        Ok(created)
    }

    pub async fn get(&self, user: &User, id: &Uuid) -> Result<Recipe, DomainError> {
        self.find_visible(user, id).await
    }

    pub async fn update(&self, user: &User, id: &Uuid, patch: RecipePatch) -> Result<Recipe, DomainError> {
        let mut recipe = self.find_editable(user, id).await?;
        recipe.apply(patch)?;
        let updated = self.recipe_repo.update(&recipe).await?;
        info!(recipe_id = %id, "Recipe updated");
        Ok(updated)
    }

    pub async fn delete(&self, user: &User, id: &Uuid) -> Result<(), DomainError> {
        let recipe = self.find_editable(user, id).await?;
        self.cascade.delete_recipe(&recipe.id).await
    }

    pub async fn list_public(
        &self,
        filter: RecipeFilter,
        pagination: &Pagination,
    ) -> Result<Page<RecipeWithAuthor>, DomainError> {
        let page = self.recipe_repo.search(&filter.public_only(), pagination).await?;

        let mut owner_ids: Vec<Uuid> = page.items.iter().map(|r| r.owner_id).collect();
        owner_ids.sort();
        owner_ids.dedup();
        let authors: HashMap<Uuid, AuthorSummary> = self
            .user_repo
            .find_many(&owner_ids)
            .await?
            .iter()
            .map(|u| (u.id, AuthorSummary::from(u)))
            .collect();

        Ok(page.map(|recipe| {
            let author = authors.get(&recipe.owner_id).cloned();
            RecipeWithAuthor { recipe, author }
        }))
    }

    pub async fn get_public(&self, id: &Uuid) -> Result<RecipeWithAuthor, DomainError> {
        let recipe = self
            .recipe_repo
            .find_by_id(id)
            .await?
            .filter(|r| r.is_public)
            .ok_or(DomainError::RecipeNotFound)?;
        let author = self
            .user_repo
            .find_by_id(&recipe.owner_id)
            .await?
            .map(|u| AuthorSummary::from(&u));
        Ok(RecipeWithAuthor { recipe, author })
    }

    async fn find_visible(&self, user: &User, id: &Uuid) -> Result<Recipe, DomainError> {
        find_visible_recipe(self.recipe_repo.as_ref(), user, id).await
    }

    async fn find_editable(&self, user: &User, id: &Uuid) -> Result<Recipe, DomainError> {
        let recipe = self.find_visible(user, id).await?;
        if !recipe.can_be_edited_by(user) {
            warn!(recipe_id = %id, user_id = %user.id, "Recipe modification refused");
            return Err(DomainError::Forbidden("only the owner can modify this recipe".into()));
        }
        Ok(recipe)
    }
}

/// Hidden recipes report as missing so their existence is not leaked.
pub(crate) async fn find_visible_recipe(
    repo: &dyn RecipeRepository,
    user: &User,
    id: &Uuid,
) -> Result<Recipe, DomainError> {
    repo.find_by_id(id)
        .await?
        .filter(|r| r.is_visible_to(user))
        .ok_or(DomainError::RecipeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::repositories::collection_repository::MockCollectionRepository;
    use crate::repositories::favorite_repository::MockFavoriteRepository;
    use crate::repositories::meal_plan_repository::MockMealPlanRepository;
    use crate::repositories::recipe_repository::MockRecipeRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::repositories::Repositories;

    fn user(role: UserRole) -> User {
        User::new("Cook".into(), format!("{}@example.com", Uuid::new_v4()), "h".into(), role).unwrap()
    }

    fn recipe(owner: &User, is_public: bool) -> Recipe {
        Recipe::new(
            owner.id,
            RecipeDraft {
                title: "Shakshuka".into(),
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

    struct Mocks {
        recipes: MockRecipeRepository,
        users: MockUserRepository,
        favorites: MockFavoriteRepository,
        collections: MockCollectionRepository,
        meal_plans: MockMealPlanRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                recipes: MockRecipeRepository::new(),
                users: MockUserRepository::new(),
                favorites: MockFavoriteRepository::new(),
                collections: MockCollectionRepository::new(),
                meal_plans: MockMealPlanRepository::new(),
            }
        }

        fn service(self) -> RecipeService {
            let recipes: Arc<dyn RecipeRepository> = Arc::new(self.recipes);
            let users: Arc<dyn UserRepository> = Arc::new(self.users);
            let repos = Repositories {
                users: users.clone(),
                recipes: recipes.clone(),
                favorites: Arc::new(self.favorites),
                collections: Arc::new(self.collections),
                meal_plans: Arc::new(self.meal_plans),
            };
            RecipeService::new(recipes, users, Cascade::new(repos))
        }
    }

    #[tokio::test]
    async fn test_private_recipe_hidden_from_other_users() {
        let owner = user(UserRole::User);
        let stranger = user(UserRole::User);
        let admin = user(UserRole::Admin);
        let private = recipe(&owner, false);

        let mut mocks = Mocks::new();
        let stored = private.clone();
        mocks
            .recipes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let service = mocks.service();

        assert!(service.get(&owner, &private.id).await.is_ok());
        assert!(service.get(&admin, &private.id).await.is_ok());
        assert!(matches!(
            service.get(&stranger, &private.id).await,
            Err(DomainError::RecipeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_public_recipe_is_read_only_for_others() {
        let owner = user(UserRole::User);
        let stranger = user(UserRole::User);
        let shared = recipe(&owner, true);

        let mut mocks = Mocks::new();
        let stored = shared.clone();
        mocks
            .recipes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mocks.recipes.expect_update().never();
        let service = mocks.service();

        assert!(service.get(&stranger, &shared.id).await.is_ok());
        let err = service
            .update(&stranger, &shared.id, RecipePatch { title: Some("Mine now".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_references() {
        let owner = user(UserRole::User);
        let doomed = recipe(&owner, false);
        let id = doomed.id;

        let mut mocks = Mocks::new();
        mocks
            .recipes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doomed.clone())));
        mocks
            .favorites
            .expect_delete_by_recipes()
            .withf(move |ids| ids == [id])
            .times(1)
            .returning(|_| Ok(2));
        mocks
            .collections
            .expect_remove_recipes()
            .times(1)
            .returning(|_| Ok(1));
        mocks
            .meal_plans
            .expect_delete_by_recipes()
            .times(1)
            .returning(|_| Ok(0));
        mocks
            .recipes
            .expect_delete()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));

        mocks.service().delete(&owner, &id).await.unwrap();
    }

    #[tokio::test]
    async fn test_public_get_attaches_author_and_hides_private() {
        let owner = user(UserRole::User);
        let shared = recipe(&owner, true);
        let private = recipe(&owner, false);
        let (shared_id, private_id) = (shared.id, private.id);

        let mut mocks = Mocks::new();
        mocks.recipes.expect_find_by_id().returning(move |id| {
            if *id == shared.id {
                Ok(Some(shared.clone()))
            } else {
                Ok(Some(private.clone()))
            }
        });
        let author = owner.clone();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(author.clone())));
        let service = mocks.service();

        let found = service.get_public(&shared_id).await.unwrap();
        assert_eq!(found.author.unwrap().name, "Cook");
        assert!(matches!(
            service.get_public(&private_id).await,
            Err(DomainError::RecipeNotFound)
        ));
    }
}
