//! Favorite repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Returns false when the pair already existed.
    async fn add(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError>;
    /// Returns false when the pair did not exist.
    async fn remove(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError>;
    /// Most recently favorited first
    async fn recipe_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, DomainError>;
    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError>;
    async fn delete_by_user(&self, user_id: &Uuid) -> Result<u64, DomainError>;
}
