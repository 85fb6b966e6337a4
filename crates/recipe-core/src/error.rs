//! Domain errors

use recipe_security::PasswordError;
use recipe_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found")]
    UserNotFound,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Collection not found")]
    CollectionNotFound,

    #[error("Meal plan entry not found")]
    MealPlanEntryNotFound,

    #[error("Recipe is not in favorites")]
    FavoriteNotFound,

    #[error("Recipe is not in this collection")]
    RecipeNotInCollection,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authorized: {0}")]
    InvalidToken(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Collection name already exists: {0}")]
    CollectionNameAlreadyExists(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Password must be at most {} characters", MAX_PASSWORD_LENGTH)]
    PasswordTooLong,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Operation not allowed on own account: {0}")]
    SelfModification(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<PasswordError> for DomainError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::TooShort => DomainError::PasswordTooShort,
            PasswordError::TooLong => DomainError::PasswordTooLong,
            PasswordError::HashError(msg) => DomainError::PasswordHashError(msg),
        }
    }
}
