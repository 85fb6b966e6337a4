//! Collection repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Collection;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Collection>, DomainError>;
    /// Case-insensitive name lookup within one owner's collections
    async fn find_by_owner_and_name(&self, owner_id: &Uuid, name: &str) -> Result<Option<Collection>, DomainError>;
    /// Sorted by name
    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Collection>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn create(&self, collection: &Collection) -> Result<Collection, DomainError>;
    /// Writes name and description; the stored `recipe_ids` are kept and
    /// only change through `add_recipe` / `remove_recipe`.
    async fn update(&self, collection: &Collection) -> Result<Collection, DomainError>;
    /// Appends in a single store operation. Returns false when the recipe was
    /// already present or the collection is gone.
    async fn add_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError>;
    /// Returns false when the recipe was not in the collection.
    async fn remove_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    /// Drops the ids from every collection that references them.
    async fn remove_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError>;
    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError>;
}
