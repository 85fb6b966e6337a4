//! User repository trait (port)

use async_trait::async_trait;
use recipe_shared::{Page, Pagination};
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    /// Case-insensitive
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;
    /// Newest first
    async fn list(&self, pagination: &Pagination) -> Result<Page<User>, DomainError>;
    async fn count(&self, role: Option<UserRole>) -> Result<u64, DomainError>;
    async fn create(&self, user: &User) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
