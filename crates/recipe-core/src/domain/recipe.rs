// ============================================================================
// Recipe Core - Recipe Entity
// File: crates/recipe-core/src/domain/recipe.rs
// Description: Recipe document, its inputs and search filter
// ============================================================================

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use recipe_shared::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::user::{AuthorSummary, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    #[validate(length(min = 1, max = 200, message = "Ingredient name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    #[serde(default)]
    pub quantity: Option<f64>,

    #[validate(length(max = 50, message = "Unit too long"))]
    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            unit: non_empty(self.unit),
        }
    }
}

/// Recipe document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Recipe {
    pub id: Uuid,
    pub owner_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description too long"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Too many ingredients"))]
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,

    #[validate(length(max = 100, message = "Too many steps"))]
    #[validate(custom(function = "validate_steps"))]
    pub steps: Vec<String>,

    #[validate(length(max = 50, message = "Category too long"))]
    pub category: Option<String>,

    #[validate(length(max = 20, message = "Too many tags"))]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    #[validate(range(max = 10080, message = "Preparation time too long"))]
    pub prep_minutes: Option<u32>,

    #[validate(range(max = 10080, message = "Cooking time too long"))]
    pub cook_minutes: Option<u32>,

    #[validate(range(min = 1, max = 1000, message = "Servings must be between 1 and 1000"))]
    pub servings: Option<u32>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub is_public: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_steps(steps: &[String]) -> Result<(), ValidationError> {
    if steps.iter().any(|s| s.chars().count() > 2000) {
        return Err(ValidationError::new("step_length")
            .with_message(Cow::from("Each step must be at most 2000 characters")));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.chars().count() > 50) {
        return Err(ValidationError::new("tag_length")
            .with_message(Cow::from("Each tag must be at most 50 characters")));
    }
    Ok(())
}

/// Trimmed, lower-cased, deduplicated, empty tags dropped.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn normalize_steps(steps: Vec<String>) -> Vec<String> {
    steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Payload for creating a recipe
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeDraft {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prep_minutes: Option<u32>,
    #[serde(default)]
    pub cook_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial update; absent fields are left untouched, empty strings clear
/// optional text fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipePatch {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<String>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub prep_minutes: Option<u32>,
    pub cook_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub image_url: Option<String>,
    pub is_public: Option<bool>,
}

impl Recipe {
    pub fn new(owner_id: Uuid, draft: RecipeDraft) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let recipe = Self {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title.trim().to_string(),
            description: non_empty(draft.description),
            ingredients: draft.ingredients.into_iter().map(Ingredient::normalized).collect(),
            steps: normalize_steps(draft.steps),
            category: non_empty(draft.category),
            tags: normalize_tags(draft.tags),
            prep_minutes: draft.prep_minutes,
            cook_minutes: draft.cook_minutes,
            servings: draft.servings,
            image_url: non_empty(draft.image_url),
            is_public: draft.is_public,
            created_at: now,
            updated_at: now,
        };

        recipe.validate()?;
        Ok(recipe)
    }

    /// Applies the patch and revalidates the whole document.
    pub fn apply(&mut self, patch: RecipePatch) -> Result<(), validator::ValidationErrors> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if patch.description.is_some() {
            next.description = non_empty(patch.description);
        }
        if let Some(ingredients) = patch.ingredients {
            next.ingredients = ingredients.into_iter().map(Ingredient::normalized).collect();
        }
        if let Some(steps) = patch.steps {
            next.steps = normalize_steps(steps);
        }
        if patch.category.is_some() {
            next.category = non_empty(patch.category);
        }
        if let Some(tags) = patch.tags {
            next.tags = normalize_tags(tags);
        }
        if patch.prep_minutes.is_some() {
            next.prep_minutes = patch.prep_minutes;
        }
        if patch.cook_minutes.is_some() {
            next.cook_minutes = patch.cook_minutes;
        }
        if patch.servings.is_some() {
            next.servings = patch.servings;
        }
        if patch.image_url.is_some() {
            next.image_url = non_empty(patch.image_url);
        }
        if let Some(is_public) = patch.is_public {
            next.is_public = is_public;
        }

        next.validate()?;
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }

    pub fn is_visible_to(&self, user: &User) -> bool {
        self.is_public || self.owner_id == user.id || user.is_admin()
    }

    pub fn can_be_edited_by(&self, user: &User) -> bool {
        self.owner_id == user.id || user.is_admin()
    }
}

/// Recipe plus its author's byline, as served by the public feed.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithAuthor {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub author: Option<AuthorSummary>,
}

/// Compact reference embedded in meal-plan entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image_url: recipe.image_url.clone(),
        }
    }
}

/// Search criteria shared by the private list, the public feed and the
/// admin listing. Results are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub owner_id: Option<Uuid>,
    pub public_only: bool,
    /// Case-insensitive substring of title or description
    pub text: Option<String>,
    /// Case-insensitive exact match
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl RecipeFilter {
    pub fn new(text: Option<String>, category: Option<String>, tag: Option<String>) -> Self {
        Self {
            owner_id: None,
            public_only: false,
            text: non_empty(text).map(|t| t.to_lowercase()),
            category: non_empty(category).map(|c| c.to_lowercase()),
            tag: non_empty(tag).map(|t| t.to_lowercase()),
        }
    }

    pub fn owned_by(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn public_only(mut self) -> Self {
        self.public_only = true;
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(owner_id) = self.owner_id {
            if recipe.owner_id != owner_id {
                return false;
            }
        }
        if self.public_only && !recipe.is_public {
            return false;
        }
        if let Some(text) = &self.text {
            let in_title = recipe.title.to_lowercase().contains(text);
            let in_description = recipe
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(text))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(category) = &self.category {
            let same = recipe
                .category
                .as_ref()
                .map(|c| c.to_lowercase() == *category)
                .unwrap_or(false);
            if !same {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !recipe.tags.contains(tag) {
                return false;
            }
        }
        true
    }
}
