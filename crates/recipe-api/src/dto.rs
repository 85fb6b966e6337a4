//! Request and response shapes that differ from the domain types

use chrono::{DateTime, NaiveDate, Utc};
use recipe_core::domain::{RecipeFilter, User, UserRole};
use recipe_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as returned to clients; the password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl RecipeQuery {
    pub fn into_parts(self) -> (RecipeFilter, Pagination) {
        let pagination = Pagination::new(self.page, self.limit);
        (RecipeFilter::new(self.q, self.category, self.tag), pagination)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
