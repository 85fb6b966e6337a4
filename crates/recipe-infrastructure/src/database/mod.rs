//! Database module (PostgreSQL and in-memory adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use recipe_core::repositories::Repositories;
use sqlx::PgPool;

pub use connection::{create_pool, run_migrations};
pub use memory::{
    MemoryCollectionRepository, MemoryFavoriteRepository, MemoryMealPlanRepository, MemoryRecipeRepository,
    MemoryUserRepository,
};
pub use postgres::{
    PgCollectionRepository, PgFavoriteRepository, PgMealPlanRepository, PgRecipeRepository, PgUserRepository,
};

pub fn pg_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        recipes: Arc::new(PgRecipeRepository::new(pool.clone())),
        favorites: Arc::new(PgFavoriteRepository::new(pool.clone())),
        collections: Arc::new(PgCollectionRepository::new(pool.clone())),
        meal_plans: Arc::new(PgMealPlanRepository::new(pool)),
    }
}

/// Fresh, empty process-local store.
pub fn memory_repositories() -> Repositories {
    Repositories {
        users: Arc::new(MemoryUserRepository::default()),
        recipes: Arc::new(MemoryRecipeRepository::default()),
        favorites: Arc::new(MemoryFavoriteRepository::default()),
        collections: Arc::new(MemoryCollectionRepository::default()),
        meal_plans: Arc::new(MemoryMealPlanRepository::default()),
    }
}
