//! Recipe repository trait (port)

use async_trait::async_trait;
use recipe_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::{Recipe, RecipeFilter};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Recipe>, DomainError>;
    /// Missing ids are skipped; order is unspecified.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, DomainError>;
    /// Newest first
    async fn search(&self, filter: &RecipeFilter, pagination: &Pagination) -> Result<Page<Recipe>, DomainError>;
    async fn ids_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Uuid>, DomainError>;
    async fn count(&self, public_only: bool) -> Result<u64, DomainError>;
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError>;
    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError>;
}
