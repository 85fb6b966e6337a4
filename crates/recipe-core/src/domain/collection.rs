//! Recipe collection entity

use chrono::{DateTime, Utc};
use recipe_shared::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::recipe::Recipe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Collection {
    pub id: Uuid,
    pub owner_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    /// Insertion order, no duplicates
    pub recipe_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollectionDraft {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CollectionPatch {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Collection {
    pub fn new(owner_id: Uuid, draft: CollectionDraft) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let collection = Self {
            id: Uuid::new_v4(),
            owner_id,
            name: draft.name.trim().to_string(),
            description: non_empty(draft.description),
            recipe_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        collection.validate()?;
        Ok(collection)
    }

    pub fn apply(&mut self, patch: CollectionPatch) -> Result<(), validator::ValidationErrors> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if patch.description.is_some() {
            next.description = non_empty(patch.description);
        }
        next.validate()?;
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }

    /// Returns false when the recipe was already present.
    pub fn add_recipe(&mut self, recipe_id: Uuid) -> bool {
        if self.recipe_ids.contains(&recipe_id) {
            return false;
        }
        self.recipe_ids.push(recipe_id);
        self.updated_at = Utc::now();
        true
    }

    /// Returns false when the recipe was not present.
    pub fn remove_recipe(&mut self, recipe_id: Uuid) -> bool {
        let before = self.recipe_ids.len();
        self.recipe_ids.retain(|id| *id != recipe_id);
        let removed = self.recipe_ids.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Collection with its recipes resolved
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: Collection,
    pub recipes: Vec<Recipe>,
}
