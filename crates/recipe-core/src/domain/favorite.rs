//! Favorite marker: a user starred a recipe

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Uuid, recipe_id: Uuid) -> Self {
        Self {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        }
    }
}
