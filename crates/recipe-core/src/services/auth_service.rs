// ============================================================================
// Recipe Core - Authentication Service
// File: crates/recipe-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with register, login, and token verification

use std::collections::HashSet;
use std::sync::Arc;

use recipe_security::{JwtError, JwtService, PasswordService};
use recipe_shared::utils::{mask_email, normalize_email};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use super::passwords;
use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Register request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Result of a successful register or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub token: String,
}

/// Authentication service for handling user login/register flows
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtService,
    admin_emails: HashSet<String>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: JwtService, admin_emails: &[String]) -> Self {
        Self {
            user_repo,
            jwt,
            admin_emails: admin_emails.iter().map(|e| normalize_email(e)).collect(),
        }
    }

    /// Register a new user
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResult, DomainError> {
        let email = normalize_email(&input.email);
        info!("Registration attempt for email: {}", mask_email(&email));

        // 1. Check password policy before doing any work
        PasswordService::check_policy(&input.password)?;

        // 2. Check if email already exists
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&email));
            return Err(DomainError::EmailAlreadyExists(email));
        }

        // 3. Hash password
        let password_hash = passwords::hash(input.password).await?;

        // 4. Create user entity
        let role = if self.admin_emails.contains(&email) {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let user = User::new(input.name, email, password_hash, role)?;

        // 5. Save
        let created = self.user_repo.create(&user).await?;
        let token = self.issue_token(&created)?;

        info!(user_id = %created.id, role = created.role.as_str(), "Registration successful");
        Ok(AuthResult { user: created, token })
    }

    /// Login with email and password
    pub async fn login(&self, input: LoginInput) -> Result<AuthResult, DomainError> {
        let email = normalize_email(&input.email);
        info!("Login attempt for email: {}", mask_email(&email));

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            passwords::verify_against_placeholder(input.password).await?;
            warn!("Login failed: email not found: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        };

        let password_valid = passwords::verify(input.password, user.password_hash.clone()).await?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "Login successful");
        Ok(AuthResult { user, token })
    }

    /// Resolves a bearer token to the stored user it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            warn!("Rejected token: {}", e);
            match e {
                JwtError::TokenExpired => DomainError::InvalidToken("token expired".into()),
                _ => DomainError::InvalidToken("token failed".into()),
            }
        })?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::InvalidToken("token failed".into()))?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken("user no longer exists".into()))
    }

    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_access_token(&user.id, user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}
