// ============================================================================
// Recipe Core - Meal Plan Entity
// File: crates/recipe-core/src/domain/meal_plan.rs
// Description: Planned meals and the date window they are queried by
// ============================================================================

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use recipe_shared::constants::MAX_MEAL_PLAN_RANGE_DAYS;
use recipe_shared::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::recipe::RecipeSummary;
use crate::error::DomainError;

/// Meal slot; declaration order is the order within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealPlanEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: Uuid,

    #[validate(range(min = 1, max = 1000, message = "Servings must be between 1 and 1000"))]
    pub servings: Option<u32>,

    #[validate(length(max = 1000, message = "Notes too long"))]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealPlanDraft {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: Uuid,
    #[serde(default)]
    #[validate(range(min = 1, max = 1000, message = "Servings must be between 1 and 1000"))]
    pub servings: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MealPlanPatch {
    pub date: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
    pub recipe_id: Option<Uuid>,
    #[validate(range(min = 1, max = 1000, message = "Servings must be between 1 and 1000"))]
    pub servings: Option<u32>,
    pub notes: Option<String>,
}

impl MealPlanEntry {
    pub fn new(owner_id: Uuid, draft: MealPlanDraft) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let entry = Self {
            id: Uuid::new_v4(),
            owner_id,
            date: draft.date,
            meal_type: draft.meal_type,
            recipe_id: draft.recipe_id,
            servings: draft.servings,
            notes: non_empty(draft.notes),
            created_at: now,
            updated_at: now,
        };

        entry.validate()?;
        Ok(entry)
    }

    pub fn apply(&mut self, patch: MealPlanPatch) -> Result<(), validator::ValidationErrors> {
        let mut next = self.clone();
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(meal_type) = patch.meal_type {
            next.meal_type = meal_type;
        }
        if let Some(recipe_id) = patch.recipe_id {
            next.recipe_id = recipe_id;
        }
        if patch.servings.is_some() {
            next.servings = patch.servings;
        }
        if patch.notes.is_some() {
            next.notes = non_empty(patch.notes);
        }
        next.validate()?;
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }
}

/// Entry with the planned recipe embedded when the owner can still see it.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanItem {
    #[serde(flatten)]
    pub entry: MealPlanEntry,
    pub recipe: Option<RecipeSummary>,
}

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Fills in missing bounds: nothing given means the ISO week of `today`,
    /// a single bound means the seven days starting or ending there.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let week = |d: NaiveDate| d.checked_add_days(Days::new(6));
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, week(from).unwrap_or(from)),
            (None, Some(to)) => (to.checked_sub_days(Days::new(6)).unwrap_or(to), to),
            (None, None) => {
                let monday = today
                    .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
                    .unwrap_or(today);
                (monday, week(monday).unwrap_or(monday))
            }
        };

        if from > to {
            return Err(DomainError::InvalidDateRange(format!(
                "'from' ({from}) is after 'to' ({to})"
            )));
        }
        let span = (to - from).num_days() + 1;
        if span > MAX_MEAL_PLAN_RANGE_DAYS {
            return Err(DomainError::InvalidDateRange(format!(
                "range spans {span} days, at most {MAX_MEAL_PLAN_RANGE_DAYS} allowed"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}
