use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use recipe_core::domain::{User, UserRole};
use recipe_core::error::DomainError;
use recipe_core::repositories::UserRepository;
use recipe_shared::{Page, Pagination};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn list(&self, pagination: &Pagination) -> Result<Page<User>, DomainError> {
        let mut all: Vec<User> = self.users.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(pagination.slice(all))
    }

    async fn count(&self, role: Option<UserRole>) -> Result<u64, DomainError> {
        let users = self.users.read();
        Ok(users.values().filter(|u| role.map_or(true, |r| u.role == r)).count() as u64)
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user.clone())
            }
            None => Err(DomainError::UserNotFound),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.users.write().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, role: UserRole) -> User {
        User::new("Tester".into(), email.into(), "hash".into(), role).unwrap()
    }

    #[tokio::test]
    async fn test_email_is_unique_and_case_insensitive() {
        let repo = MemoryUserRepository::default();
        repo.create(&user("cook@example.com", UserRole::User)).await.unwrap();

        let dup = repo.create(&user("cook@example.com", UserRole::User)).await;
        assert!(matches!(dup, Err(DomainError::EmailAlreadyExists(_))));

        assert!(repo.find_by_email("COOK@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_cannot_steal_email() {
        let repo = MemoryUserRepository::default();
        repo.create(&user("a@example.com", UserRole::User)).await.unwrap();
        let mut b = repo.create(&user("b@example.com", UserRole::Admin)).await.unwrap();

        b.email = "a@example.com".into();
        assert!(repo.update(&b).await.is_err());
        assert_eq!(repo.count(None).await.unwrap(), 2);
        assert_eq!(repo.count(Some(UserRole::Admin)).await.unwrap(), 1);
    }
}
