//! Repository traits (ports)

use std::sync::Arc;

pub mod user_repository;
pub mod recipe_repository;
pub mod favorite_repository;
pub mod collection_repository;
pub mod meal_plan_repository;

pub use user_repository::UserRepository;
pub use recipe_repository::RecipeRepository;
pub use favorite_repository::FavoriteRepository;
pub use collection_repository::CollectionRepository;
pub use meal_plan_repository::MealPlanRepository;

/// One adapter per document kind, chosen at startup.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub collections: Arc<dyn CollectionRepository>,
    pub meal_plans: Arc<dyn MealPlanRepository>,
}
