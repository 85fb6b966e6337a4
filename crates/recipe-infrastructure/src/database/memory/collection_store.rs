use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use recipe_core::domain::Collection;
use recipe_core::error::DomainError;
use recipe_core::repositories::CollectionRepository;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCollectionRepository {
    collections: RwLock<HashMap<Uuid, Collection>>,
}

fn name_taken(collections: &HashMap<Uuid, Collection>, candidate: &Collection) -> bool {
    collections.values().any(|c| {
        c.id != candidate.id && c.owner_id == candidate.owner_id && c.name.to_lowercase() == candidate.name.to_lowercase()
    })
}

#[async_trait]
impl CollectionRepository for MemoryCollectionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Collection>, DomainError> {
        Ok(self.collections.read().get(id).cloned())
    }

    async fn find_by_owner_and_name(&self, owner_id: &Uuid, name: &str) -> Result<Option<Collection>, DomainError> {
        let name = name.to_lowercase();
        Ok(self
            .collections
            .read()
            .values()
            .find(|c| c.owner_id == *owner_id && c.name.to_lowercase() == name)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Collection>, DomainError> {
        let mut owned: Vec<Collection> = self
            .collections
            .read()
            .values()
            .filter(|c| c.owner_id == *owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.collections.read().len() as u64)
    }

    async fn create(&self, collection: &Collection) -> Result<Collection, DomainError> {
        let mut collections = self.collections.write();
        if name_taken(&collections, collection) {
            return Err(DomainError::CollectionNameAlreadyExists(collection.name.clone()));
        }
        collections.insert(collection.id, collection.clone());
        Ok(collection.clone())
    }

    async fn update(&self, collection: &Collection) -> Result<Collection, DomainError> {
        let mut collections = self.collections.write();
        if name_taken(&collections, collection) {
            return Err(DomainError::CollectionNameAlreadyExists(collection.name.clone()));
        }
        match collections.get_mut(&collection.id) {
            Some(stored) => {
                let recipe_ids = std::mem::take(&mut stored.recipe_ids);
                *stored = collection.clone();
                stored.recipe_ids = recipe_ids;
                Ok(stored.clone())
            }
            None => Err(DomainError::CollectionNotFound),
        }
    }

    async fn add_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        Ok(self
            .collections
            .write()
            .get_mut(id)
            .map(|c| c.add_recipe(*recipe_id))
            .unwrap_or(false))
    }

    async fn remove_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        Ok(self
            .collections
            .write()
            .get_mut(id)
            .map(|c| c.remove_recipe(*recipe_id))
            .unwrap_or(false))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.collections.write().remove(id);
        Ok(())
    }

    async fn remove_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        let mut touched = 0;
        for collection in self.collections.write().values_mut() {
            let before = collection.recipe_ids.len();
            collection.recipe_ids.retain(|id| !recipe_ids.contains(id));
            if collection.recipe_ids.len() != before {
                collection.updated_at = Utc::now();
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        let mut collections = self.collections.write();
        let before = collections.len();
        collections.retain(|_, c| c.owner_id != *owner_id);
        Ok((before - collections.len()) as u64)
    }
}
