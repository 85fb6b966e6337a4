//! Meal plan repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{DateRange, MealPlanEntry};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MealPlanEntry>, DomainError>;
    /// Sorted by date, then meal type
    async fn list_by_owner(&self, owner_id: &Uuid, range: &DateRange) -> Result<Vec<MealPlanEntry>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn create(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError>;
    async fn update(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError>;
    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError>;
}
