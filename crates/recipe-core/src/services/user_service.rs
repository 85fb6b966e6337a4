//! Profile management for the signed-in user

use std::sync::Arc;

use recipe_security::PasswordService;
use recipe_shared::utils::{non_empty, normalize_email};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use super::cascade::Cascade;
use super::passwords;
use crate::domain::User;
use crate::error::DomainError;
use crate::repositories::UserRepository;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    pub new_password: String,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    cascade: Cascade,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, cascade: Cascade) -> Self {
        Self { user_repo, cascade }
    }

    pub async fn update_profile(&self, user: &User, update: ProfileUpdate) -> Result<User, DomainError> {
        let mut next = user.clone();

        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            let email = normalize_email(&email);
            if email != user.email {
                if let Some(other) = self.user_repo.find_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(DomainError::EmailAlreadyExists(email));
                    }
                }
            }
            next.email = email;
        }
        if update.bio.is_some() {
            next.bio = non_empty(update.bio);
        }
        if update.avatar_url.is_some() {
            next.avatar_url = non_empty(update.avatar_url);
        }

        next.validate()?;
        next.touch();
        let updated = self.user_repo.update(&next).await?;
        info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    pub async fn change_password(&self, user: &User, change: PasswordChange) -> Result<(), DomainError> {
        let valid = passwords::verify(change.current_password, user.password_hash.clone()).await?;
        if !valid {
            warn!(user_id = %user.id, "Password change rejected: wrong current password");
            return Err(DomainError::InvalidCredentials);
        }
        PasswordService::check_policy(&change.new_password)?;

        let mut next = user.clone();
        next.password_hash = passwords::hash(change.new_password).await?;
        next.touch();
        self.user_repo.update(&next).await?;
        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    pub async fn delete_account(&self, user: &User) -> Result<(), DomainError> {
        self.cascade.delete_user(&user.id).await
    }
}
