//! Administrative user and recipe management

use std::sync::Arc;

use recipe_shared::{Page, Pagination};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::cascade::Cascade;
use crate::domain::{Recipe, RecipeFilter, User, UserRole};
use crate::error::DomainError;
use crate::repositories::Repositories;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoleChange {
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub users: u64,
    pub admins: u64,
    pub recipes: u64,
    pub public_recipes: u64,
    pub collections: u64,
    pub meal_plan_entries: u64,
}

pub struct AdminService {
    repos: Repositories,
    cascade: Cascade,
}

impl AdminService {
    pub fn new(repos: Repositories, cascade: Cascade) -> Self {
        Self { repos, cascade }
    }

    pub async fn list_users(&self, pagination: &Pagination) -> Result<Page<User>, DomainError> {
        self.repos.users.list(pagination).await
    }

    pub async fn set_role(&self, admin: &User, user_id: &Uuid, role: UserRole) -> Result<User, DomainError> {
        if admin.id == *user_id && role != UserRole::Admin {
            warn!(admin_id = %admin.id, "Refused self-demotion");
            return Err(DomainError::SelfModification("cannot remove your own admin role".into()));
        }
        let mut user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        if user.role == role {
            return Ok(user);
        }

        user.role = role;
        user.touch();
        let updated = self.repos.users.update(&user).await?;
        info!(admin_id = %admin.id, user_id = %user_id, role = role.as_str(), "User role changed");
        Ok(updated)
    }

    pub async fn delete_user(&self, admin: &User, user_id: &Uuid) -> Result<(), DomainError> {
        if admin.id == *user_id {
            return Err(DomainError::SelfModification("cannot delete your own account here".into()));
        }
        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        self.cascade.delete_user(user_id).await?;
        info!(admin_id = %admin.id, user_id = %user_id, "User deleted by admin");
        Ok(())
    }

    pub async fn list_recipes(&self, filter: RecipeFilter, pagination: &Pagination) -> Result<Page<Recipe>, DomainError> {
        self.repos.recipes.search(&filter, pagination).await
    }

    pub async fn delete_recipe(&self, admin: &User, recipe_id: &Uuid) -> Result<(), DomainError> {
        self.repos
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(DomainError::RecipeNotFound)?;
        self.cascade.delete_recipe(recipe_id).await?;
        info!(admin_id = %admin.id, recipe_id = %recipe_id, "Recipe deleted by admin");
        Ok(())
    }

    pub async fn stats(&self) -> Result<AdminStats, DomainError> {
        Ok(AdminStats {
            users: self.repos.users.count(None).await?,
            admins: self.repos.users.count(Some(UserRole::Admin)).await?,
            recipes: self.repos.recipes.count(false).await?,
            public_recipes: self.repos.recipes.count(true).await?,
            collections: self.repos.collections.count().await?,
            meal_plan_entries: self.repos.meal_plans.count().await?,
        })
    }
}
