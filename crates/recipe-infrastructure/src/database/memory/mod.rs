//! Process-local repositories backed by `parking_lot::RwLock` maps.
//!
//! Locks are never held across an `.await`; every operation is a single
//! synchronous critical section.

mod collection_store;
mod favorite_store;
mod meal_plan_store;
mod recipe_store;
mod user_store;

pub use collection_store::MemoryCollectionRepository;
pub use favorite_store::MemoryFavoriteRepository;
pub use meal_plan_store::MemoryMealPlanRepository;
pub use recipe_store::MemoryRecipeRepository;
pub use user_store::MemoryUserRepository;
