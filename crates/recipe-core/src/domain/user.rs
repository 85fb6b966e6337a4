// ============================================================================
// Recipe Core - User Entity
// File: crates/recipe-core/src/domain/user.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    pub role: UserRole,

    #[validate(length(max = 1000, message = "Bio too long"))]
    pub bio: Option<String>,

    #[validate(url(message = "Invalid avatar URL"))]
    #[validate(length(max = 2048, message = "URL too long"))]
    pub avatar_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: recipe_shared::utils::normalize_email(&email),
            password_hash,
            role,
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public byline attached to shared recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}
