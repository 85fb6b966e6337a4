use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use recipe_core::domain::{DateRange, MealPlanEntry};
use recipe_core::error::DomainError;
use recipe_core::repositories::MealPlanRepository;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryMealPlanRepository {
    entries: RwLock<HashMap<Uuid, MealPlanEntry>>,
}

impl MemoryMealPlanRepository {
    fn delete_where(&self, pred: impl Fn(&MealPlanEntry) -> bool) -> u64 {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !pred(e));
        (before - entries.len()) as u64
    }
}

#[async_trait]
impl MealPlanRepository for MemoryMealPlanRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MealPlanEntry>, DomainError> {
        Ok(self.entries.read().get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &Uuid, range: &DateRange) -> Result<Vec<MealPlanEntry>, DomainError> {
        let mut entries: Vec<MealPlanEntry> = self
            .entries
            .read()
            .values()
            .filter(|e| e.owner_id == *owner_id && range.contains(e.date))
            .cloned()
            .collect();
        entries.sort_by(|a, b| (a.date, a.meal_type, a.created_at).cmp(&(b.date, b.meal_type, b.created_at)));
        Ok(entries)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.entries.read().len() as u64)
    }

    async fn create(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError> {
        self.entries.write().insert(entry.id, entry.clone());
        Ok(entry.clone())
    }

    async fn update(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError> {
        match self.entries.write().get_mut(&entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(entry.clone())
            }
            None => Err(DomainError::MealPlanEntryNotFound),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.entries.write().remove(id);
        Ok(())
    }

    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        Ok(self.delete_where(|e| recipe_ids.contains(&e.recipe_id)))
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        Ok(self.delete_where(|e| e.owner_id == *owner_id))
    }
}
