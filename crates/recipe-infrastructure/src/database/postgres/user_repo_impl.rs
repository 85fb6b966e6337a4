// ============================================================================
// Recipe Infrastructure - PostgreSQL User Repository
// File: crates/recipe-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use recipe_core::domain::{User, UserRole};
use recipe_core::error::DomainError;
use recipe_core::repositories::UserRepository;
use recipe_shared::{Page, Pagination};

use super::{db_error, is_unique_violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let doc: Option<Json<User>> = sqlx::query_scalar("SELECT doc FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding user by id"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let doc: Option<Json<User>> = sqlx::query_scalar("SELECT doc FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding user by email"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let docs: Vec<Json<User>> = sqlx::query_scalar("SELECT doc FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("loading users"))?;

        Ok(docs.into_iter().map(|d| d.0).collect())
    }

    async fn list(&self, pagination: &Pagination) -> Result<Page<User>, DomainError> {
        let docs: Vec<Json<User>> = sqlx::query_scalar(
            r#"
            SELECT doc FROM users
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(pagination.limit))
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing users"))?;

        let total = self.count(None).await?;
        Ok(Page::new(docs.into_iter().map(|d| d.0).collect(), pagination, total))
    }

    async fn count(&self, role: Option<UserRole>) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR role = $1)")
            .bind(role.map(|r| r.as_str()))
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting users"))?;

        Ok(count as u64)
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, role, created_at, doc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(Json(user))
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                error!("Database error creating user: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        info!("User created successfully: {}", user.id);
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, role = $3, doc = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(Json(user))
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                error!("Database error updating user: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting user"))?;

        Ok(())
    }
}
