//! Argon2 work moved off the async workers

use std::sync::OnceLock;

use recipe_security::PasswordService;
use tokio::task;

use crate::error::DomainError;

fn join_error(e: task::JoinError) -> DomainError {
    DomainError::InternalError(format!("password task failed: {e}"))
}

pub(crate) async fn hash(password: String) -> Result<String, DomainError> {
    task::spawn_blocking(move || PasswordService::hash(&password))
        .await
        .map_err(join_error)?
        .map_err(DomainError::from)
}

/// A malformed stored hash counts as a mismatch.
pub(crate) async fn verify(password: String, hash: String) -> Result<bool, DomainError> {
    task::spawn_blocking(move || PasswordService::verify(&password, &hash).unwrap_or(false))
        .await
        .map_err(join_error)
}

/// Burns the same Argon2 work as a real check so a login for an unknown
/// email takes as long as one with a wrong password.
pub(crate) async fn verify_against_placeholder(password: String) -> Result<(), DomainError> {
    static PLACEHOLDER: OnceLock<Option<String>> = OnceLock::new();

    task::spawn_blocking(move || {
        let placeholder = PLACEHOLDER.get_or_init(|| PasswordService::hash("placeholder-password").ok());
        if let Some(hash) = placeholder {
            let _ = PasswordService::verify(&password, hash);
        }
    })
    .await
    .map_err(join_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_on_blocking_pool() {
        let hash = hash("plenty-long-secret".into()).await.unwrap();
        assert!(verify("plenty-long-secret".into(), hash.clone()).await.unwrap());
        assert!(!verify("other-secret".into(), hash).await.unwrap());
        assert!(!verify("anything".into(), "not-a-phc-string".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_placeholder_check_never_fails() {
        assert!(verify_against_placeholder("placeholder-password".into()).await.is_ok());
        assert!(verify_against_placeholder("x".into()).await.is_ok());
    }
}
