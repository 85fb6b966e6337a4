//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod recipe_repo_impl;
pub mod favorite_repo_impl;
pub mod collection_repo_impl;
pub mod meal_plan_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use recipe_repo_impl::PgRecipeRepository;
pub use favorite_repo_impl::PgFavoriteRepository;
pub use collection_repo_impl::PgCollectionRepository;
pub use meal_plan_repo_impl::PgMealPlanRepository;

use recipe_core::error::DomainError;
use tracing::error;

/// Logs the failure and maps it onto the domain error.
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
