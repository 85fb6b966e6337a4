// ============================================================================
// Recipe Infrastructure - PostgreSQL Favorite Repository
// File: crates/recipe-infrastructure/src/database/postgres/favorite_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use recipe_core::error::DomainError;
use recipe_core::repositories::FavoriteRepository;

use super::db_error;

pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn add(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, recipe_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, recipe_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("adding favorite"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, user_id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("removing favorite"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recipe_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT recipe_id FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing favorites"))
    }

    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE recipe_id = ANY($1)")
            .bind(recipe_ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting favorites by recipe"))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting favorites by user"))?;

        Ok(result.rows_affected())
    }
}
