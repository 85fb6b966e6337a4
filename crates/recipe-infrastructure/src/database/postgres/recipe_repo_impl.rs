// ============================================================================
// Recipe Infrastructure - PostgreSQL Recipe Repository
// File: crates/recipe-infrastructure/src/database/postgres/recipe_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use recipe_core::domain::{Recipe, RecipeFilter};
use recipe_core::error::DomainError;
use recipe_core::repositories::RecipeRepository;
use recipe_shared::{Page, Pagination};

use super::db_error;

/// Shared by the page query and its count. Text is matched as a literal
/// substring, the filter values arrive already lower-cased.
const SEARCH_WHERE: &str = r#"
    WHERE ($1::uuid IS NULL OR owner_id = $1)
      AND (NOT $2 OR is_public)
      AND ($3::text IS NULL
           OR STRPOS(LOWER(doc->>'title'), $3) > 0
           OR STRPOS(LOWER(COALESCE(doc->>'description', '')), $3) > 0)
      AND ($4::text IS NULL OR LOWER(doc->>'category') = $4)
      AND ($5::text IS NULL OR doc->'tags' ? $5)
"#;

pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Recipe>, DomainError> {
        let doc: Option<Json<Recipe>> = sqlx::query_scalar("SELECT doc FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding recipe by id"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Recipe>, DomainError> {
        let docs: Vec<Json<Recipe>> = sqlx::query_scalar("SELECT doc FROM recipes WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("loading recipes"))?;

        Ok(docs.into_iter().map(|d| d.0).collect())
    }

    async fn search(&self, filter: &RecipeFilter, pagination: &Pagination) -> Result<Page<Recipe>, DomainError> {
        let page_sql = format!("SELECT doc FROM recipes {SEARCH_WHERE} ORDER BY created_at DESC, id LIMIT $6 OFFSET $7");
        let docs: Vec<Json<Recipe>> = sqlx::query_scalar(&page_sql)
            .bind(filter.owner_id)
            .bind(filter.public_only)
            .bind(filter.text.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.tag.as_deref())
            .bind(i64::from(pagination.limit))
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("searching recipes"))?;

        let count_sql = format!("SELECT COUNT(*) FROM recipes {SEARCH_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.owner_id)
            .bind(filter.public_only)
            .bind(filter.text.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.tag.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting recipe search"))?;

        Ok(Page::new(docs.into_iter().map(|d| d.0).collect(), pagination, total as u64))
    }

    async fn ids_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar("SELECT id FROM recipes WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing recipe ids by owner"))
    }

    async fn count(&self, public_only: bool) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE (NOT $1 OR is_public)")
            .bind(public_only)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting recipes"))?;

        Ok(count as u64)
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, owner_id, is_public, created_at, doc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(recipe.id)
        .bind(recipe.owner_id)
        .bind(recipe.is_public)
        .bind(recipe.created_at)
        .bind(Json(recipe))
        .execute(&self.pool)
        .await
        .map_err(db_error("creating recipe"))?;

        Ok(recipe.clone())
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let result = sqlx::query("UPDATE recipes SET is_public = $2, doc = $3 WHERE id = $1")
            .bind(recipe.id)
            .bind(recipe.is_public)
            .bind(Json(recipe))
            .execute(&self.pool)
            .await
            .map_err(db_error("updating recipe"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecipeNotFound);
        }
        Ok(recipe.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting recipe"))?;

        Ok(())
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM recipes WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting recipes by owner"))?;

        Ok(result.rows_affected())
    }
}
