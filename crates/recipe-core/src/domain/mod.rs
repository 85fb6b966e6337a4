//! # Recipe Core - Domain Module
//! 
//! Domain entities for the Recipe Book application.

pub mod user;
pub mod recipe;
pub mod favorite;
pub mod collection;
pub mod meal_plan;
pub mod shopping_list;

// Re-export all entities and enums
pub use user::{AuthorSummary, User, UserRole};
pub use recipe::{Ingredient, Recipe, RecipeDraft, RecipeFilter, RecipePatch, RecipeSummary, RecipeWithAuthor};
pub use favorite::Favorite;
pub use collection::{Collection, CollectionDetail, CollectionDraft, CollectionPatch};
pub use meal_plan::{DateRange, MealPlanDraft, MealPlanEntry, MealPlanItem, MealPlanPatch, MealType};
pub use shopping_list::{build_shopping_list, ShoppingList, ShoppingListItem};
