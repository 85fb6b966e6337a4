use async_trait::async_trait;
use parking_lot::RwLock;
use recipe_core::domain::Favorite;
use recipe_core::error::DomainError;
use recipe_core::repositories::FavoriteRepository;
use uuid::Uuid;

/// Insertion-ordered, so the newest favorite is always last.
#[derive(Default)]
pub struct MemoryFavoriteRepository {
    favorites: RwLock<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteRepository for MemoryFavoriteRepository {
    async fn add(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let mut favorites = self.favorites.write();
        if favorites
            .iter()
            .any(|f| f.user_id == *user_id && f.recipe_id == *recipe_id)
        {
            return Ok(false);
        }
        favorites.push(Favorite::new(*user_id, *recipe_id));
        Ok(true)
    }

    async fn remove(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let mut favorites = self.favorites.write();
        let before = favorites.len();
        favorites.retain(|f| !(f.user_id == *user_id && f.recipe_id == *recipe_id));
        Ok(favorites.len() != before)
    }

    async fn recipe_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .favorites
            .read()
            .iter()
            .rev()
            .filter(|f| f.user_id == *user_id)
            .map(|f| f.recipe_id)
            .collect())
    }

    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        let mut favorites = self.favorites.write();
        let before = favorites.len();
        favorites.retain(|f| !recipe_ids.contains(&f.recipe_id));
        Ok((before - favorites.len()) as u64)
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let mut favorites = self.favorites.write();
        let before = favorites.len();
        favorites.retain(|f| f.user_id != *user_id);
        Ok((before - favorites.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_is_idempotent_and_newest_first() {
        let repo = MemoryFavoriteRepository::default();
        let user = Uuid::new_v4();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(repo.add(&user, &first).await.unwrap());
        assert!(repo.add(&user, &second).await.unwrap());
        assert!(!repo.add(&user, &first).await.unwrap());
        assert_eq!(repo.recipe_ids(&user).await.unwrap(), vec![second, first]);

        assert_eq!(repo.delete_by_recipes(&[first]).await.unwrap(), 1);
        assert!(!repo.remove(&user, &first).await.unwrap());
        assert!(repo.remove(&user, &second).await.unwrap());
    }
}
