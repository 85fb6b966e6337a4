// ============================================================================
// Recipe Infrastructure - PostgreSQL Collection Repository
// File: crates/recipe-infrastructure/src/database/postgres/collection_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use recipe_core::domain::Collection;
use recipe_core::error::DomainError;
use recipe_core::repositories::CollectionRepository;

use super::{db_error, is_unique_violation};

pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn write_error(collection: &Collection) -> impl Fn(sqlx::Error) -> DomainError + '_ {
        move |e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::CollectionNameAlreadyExists(collection.name.clone())
            } else {
                error!("Database error writing collection: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        }
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Collection>, DomainError> {
        let doc: Option<Json<Collection>> = sqlx::query_scalar("SELECT doc FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding collection by id"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn find_by_owner_and_name(&self, owner_id: &Uuid, name: &str) -> Result<Option<Collection>, DomainError> {
        let doc: Option<Json<Collection>> = sqlx::query_scalar(
            "SELECT doc FROM collections WHERE owner_id = $1 AND LOWER(name) = LOWER($2)",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding collection by name"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Collection>, DomainError> {
        let docs: Vec<Json<Collection>> = sqlx::query_scalar(
            "SELECT doc FROM collections WHERE owner_id = $1 ORDER BY LOWER(name), id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing collections"))?;

        Ok(docs.into_iter().map(|d| d.0).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting collections"))?;

        Ok(count as u64)
    }

    async fn create(&self, collection: &Collection) -> Result<Collection, DomainError> {
        sqlx::query("INSERT INTO collections (id, owner_id, name, doc) VALUES ($1, $2, $3, $4)")
            .bind(collection.id)
            .bind(collection.owner_id)
            .bind(&collection.name)
            .bind(Json(collection))
            .execute(&self.pool)
            .await
            .map_err(Self::write_error(collection))?;

        Ok(collection.clone())
    }

    async fn update(&self, collection: &Collection) -> Result<Collection, DomainError> {
        let doc: Option<Json<Collection>> = sqlx::query_scalar(
            "UPDATE collections SET name = $2, doc = jsonb_set($3, '{recipe_ids}', doc->'recipe_ids') \
             WHERE id = $1 RETURNING doc",
        )
        .bind(collection.id)
        .bind(&collection.name)
        .bind(Json(collection))
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::write_error(collection))?;

        doc.map(|d| d.0).ok_or(DomainError::CollectionNotFound)
    }

    async fn add_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE collections \
             SET doc = jsonb_set(jsonb_set(doc, '{recipe_ids}', (doc->'recipe_ids') || to_jsonb($2::text)), '{updated_at}', $3) \
             WHERE id = $1 AND NOT (doc->'recipe_ids' ? $2)",
        )
        .bind(id)
        .bind(recipe_id.to_string())
        .bind(Json(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(db_error("adding recipe to collection"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_recipe(&self, id: &Uuid, recipe_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE collections \
             SET doc = jsonb_set(jsonb_set(doc, '{recipe_ids}', (doc->'recipe_ids') - $2::text), '{updated_at}', $3) \
             WHERE id = $1 AND doc->'recipe_ids' ? $2",
        )
        .bind(id)
        .bind(recipe_id.to_string())
        .bind(Json(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(db_error("removing recipe from collection"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting collection"))?;

        Ok(())
    }

    async fn remove_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        let ids: Vec<String> = recipe_ids.iter().map(Uuid::to_string).collect();
        let result = sqlx::query(
            "UPDATE collections \
             SET doc = jsonb_set(jsonb_set(doc, '{recipe_ids}', (doc->'recipe_ids') - $1::text[]), '{updated_at}', $2) \
             WHERE doc->'recipe_ids' ?| $1::text[]",
        )
        .bind(&ids)
        .bind(Json(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(db_error("detaching recipes from collections"))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM collections WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting collections by owner"))?;

        Ok(result.rows_affected())
    }
}
