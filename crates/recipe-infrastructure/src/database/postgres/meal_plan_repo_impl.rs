// ============================================================================
// Recipe Infrastructure - PostgreSQL Meal Plan Repository
// File: crates/recipe-infrastructure/src/database/postgres/meal_plan_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use recipe_core::domain::{DateRange, MealPlanEntry};
use recipe_core::error::DomainError;
use recipe_core::repositories::MealPlanRepository;

use super::db_error;

pub struct PgMealPlanRepository {
    pool: PgPool,
}

impl PgMealPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealPlanRepository for PgMealPlanRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MealPlanEntry>, DomainError> {
        let doc: Option<Json<MealPlanEntry>> = sqlx::query_scalar("SELECT doc FROM meal_plan_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding meal plan entry by id"))?;

        Ok(doc.map(|d| d.0))
    }

    async fn list_by_owner(&self, owner_id: &Uuid, range: &DateRange) -> Result<Vec<MealPlanEntry>, DomainError> {
        let docs: Vec<Json<MealPlanEntry>> = sqlx::query_scalar(
            r#"
            SELECT doc FROM meal_plan_entries
            WHERE owner_id = $1 AND plan_date BETWEEN $2 AND $3
            ORDER BY plan_date, created_at
            "#,
        )
        .bind(owner_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing meal plan"))?;

        let mut entries: Vec<MealPlanEntry> = docs.into_iter().map(|d| d.0).collect();
        entries.sort_by(|a, b| (a.date, a.meal_type, a.created_at).cmp(&(b.date, b.meal_type, b.created_at)));
        Ok(entries)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meal_plan_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting meal plan entries"))?;

        Ok(count as u64)
    }

    async fn create(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO meal_plan_entries (id, owner_id, recipe_id, plan_date, created_at, doc)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(entry.owner_id)
        .bind(entry.recipe_id)
        .bind(entry.date)
        .bind(entry.created_at)
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .map_err(db_error("creating meal plan entry"))?;

        Ok(entry.clone())
    }

    async fn update(&self, entry: &MealPlanEntry) -> Result<MealPlanEntry, DomainError> {
        let result = sqlx::query(
            "UPDATE meal_plan_entries SET recipe_id = $2, plan_date = $3, doc = $4 WHERE id = $1",
        )
        .bind(entry.id)
        .bind(entry.recipe_id)
        .bind(entry.date)
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .map_err(db_error("updating meal plan entry"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MealPlanEntryNotFound);
        }
        Ok(entry.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM meal_plan_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting meal plan entry"))?;

        Ok(())
    }

    async fn delete_by_recipes(&self, recipe_ids: &[Uuid]) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM meal_plan_entries WHERE recipe_id = ANY($1)")
            .bind(recipe_ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting meal plan entries by recipe"))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_owner(&self, owner_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM meal_plan_entries WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting meal plan entries by owner"))?;

        Ok(result.rows_affected())
    }
}
