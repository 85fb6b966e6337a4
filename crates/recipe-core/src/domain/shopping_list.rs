//! Shopping list aggregation over planned meals

use std::collections::BTreeMap;

use serde::Serialize;

use super::meal_plan::{DateRange, MealPlanEntry};
use super::recipe::Recipe;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub unit: Option<String>,
    /// `None` when no planned recipe gave a quantity for this line
    pub quantity: Option<f64>,
    /// Distinct recipe titles, in first-seen order
    pub recipes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingList {
    #[serde(flatten)]
    pub range: DateRange,
    pub items: Vec<ShoppingListItem>,
}

fn scale_factor(entry: &MealPlanEntry, recipe: &Recipe) -> f64 {
    match (entry.servings, recipe.servings) {
        (Some(planned), Some(base)) if base > 0 => f64::from(planned) / f64::from(base),
        _ => 1.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Groups ingredients by lower-cased name and unit, scaling each recipe's
/// quantities to the servings planned for that meal.
pub fn build_shopping_list(planned: &[(&MealPlanEntry, &Recipe)]) -> Vec<ShoppingListItem> {
    let mut lines: BTreeMap<(String, String), ShoppingListItem> = BTreeMap::new();

    for (entry, recipe) in planned {
        let factor = scale_factor(entry, recipe);
        for ingredient in &recipe.ingredients {
            let name = ingredient.name.trim();
            if name.is_empty() {
                continue;
            }
            let unit = ingredient
                .unit
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty());
            let key = (
                name.to_lowercase(),
                unit.map(str::to_lowercase).unwrap_or_default(),
            );

            let line = lines.entry(key).or_insert_with(|| ShoppingListItem {
                name: name.to_string(),
                unit: unit.map(str::to_string),
                quantity: None,
                recipes: Vec::new(),
            });

            if let Some(quantity) = ingredient.quantity {
                line.quantity = Some(line.quantity.unwrap_or(0.0) + quantity * factor);
            }
            if !line.recipes.contains(&recipe.title) {
                line.recipes.push(recipe.title.clone());
            }
        }
    }

    lines
        .into_values()
        .map(|mut line| {
            line.quantity = line.quantity.map(round2);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_plan::{MealPlanDraft, MealType};
    use crate::domain::recipe::{Ingredient, RecipeDraft};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn ingredient(name: &str, quantity: Option<f64>, unit: Option<&str>) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            quantity,
            unit: unit.map(str::to_string),
        }
    }

    fn recipe(title: &str, servings: Option<u32>, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe::new(
            Uuid::new_v4(),
            RecipeDraft {
                title: title.to_string(),
                description: None,
                ingredients,
                steps: vec![],
                category: None,
                tags: vec![],
                prep_minutes: None,
                cook_minutes: None,
                servings,
                image_url: None,
                is_public: false,
            },
        )
        .unwrap()
    }

    fn entry(recipe: &Recipe, servings: Option<u32>) -> MealPlanEntry {
        MealPlanEntry::new(
            recipe.owner_id,
            MealPlanDraft {
                date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
                meal_type: MealType::Dinner,
                recipe_id: recipe.id,
                servings,
                notes: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_merges_same_ingredient_and_unit() {
        let pasta = recipe(
            "Pasta",
            Some(2),
            vec![ingredient("Spaghetti", Some(200.0), Some("g")), ingredient("Salt", None, None)],
        );
        let salad = recipe(
            "Salad",
            None,
            vec![ingredient("spaghetti ", Some(50.0), Some("G")), ingredient("Salt", None, None)],
        );
        let e1 = entry(&pasta, Some(4));
        let e2 = entry(&salad, Some(3));

        let list = build_shopping_list(&[(&e1, &pasta), (&e2, &salad)]);

        assert_eq!(list.len(), 2);
        let salt = &list[0];
        assert_eq!(salt.name, "Salt");
        assert_eq!(salt.quantity, None);
        assert_eq!(salt.recipes, vec!["Pasta", "Salad"]);

        // 200g scaled x2 for pasta, salad has no base servings so x1
        let spaghetti = &list[1];
        assert_eq!(spaghetti.quantity, Some(450.0));
        assert_eq!(spaghetti.unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_different_units_stay_separate() {
        let soup = recipe(
            "Soup",
            Some(3),
            vec![ingredient("Milk", Some(1.0), Some("cup")), ingredient("Milk", Some(100.0), Some("ml"))],
        );
        let e = entry(&soup, Some(1));
        let list = build_shopping_list(&[(&e, &soup)]);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].unit.as_deref(), Some("cup"));
        assert_eq!(list[0].quantity, Some(0.33));
        assert_eq!(list[1].quantity, Some(33.33));
    }

    #[test]
    fn test_same_recipe_twice_sums_but_lists_title_once() {
        let toast = recipe("Toast", Some(1), vec![ingredient("Bread", Some(2.0), Some("slice"))]);
        let e1 = entry(&toast, None);
        let e2 = entry(&toast, Some(2));
        let list = build_shopping_list(&[(&e1, &toast), (&e2, &toast)]);

        assert_eq!(list[0].quantity, Some(6.0));
        assert_eq!(list[0].recipes, vec!["Toast"]);
    }

    #[test]
    fn test_empty_plan() {
        assert!(build_shopping_list(&[]).is_empty());
    }
}
