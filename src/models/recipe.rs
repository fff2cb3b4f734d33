//! Recipe model.
//!
//! A recipe is one cooking event's worth of ingredients. One cooking
//! yields `servings` person-meals and can cover `duration_days`
//! consecutive meal slots as leftovers.

use serde::{Deserialize, Serialize};

use super::Quantity;
use crate::conversion::normalize_name;

/// Lowest frequency weight.
pub const MIN_FREQUENCY_WEIGHT: u8 = 1;
/// Highest frequency weight.
pub const MAX_FREQUENCY_WEIGHT: u8 = 10;

/// A recipe known to the household.
///
/// Legacy field names (`serves`, `days`, `priority`) are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Display name. Identity is the normalized form (see [`Recipe::key`]).
    pub name: String,
    /// Person-meals yielded by one cooking event.
    #[serde(alias = "serves", default = "default_servings")]
    pub servings: u32,
    /// Consecutive meal slots one cooking event covers.
    #[serde(alias = "days", default = "default_duration_days")]
    pub duration_days: u32,
    /// Selection preference (higher = chosen first).
    #[serde(alias = "priority", default = "default_frequency_weight")]
    pub frequency_weight: u8,
    /// Ingredients for one cooking event.
    pub ingredients: Vec<Quantity>,
}

fn default_servings() -> u32 {
    4
}

fn default_duration_days() -> u32 {
    2
}

fn default_frequency_weight() -> u8 {
    5
}

impl Recipe {
    /// Creates a recipe with default servings (4), duration (2) and weight (5).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            servings: default_servings(),
            duration_days: default_duration_days(),
            frequency_weight: default_frequency_weight(),
            ingredients: Vec::new(),
        }
    }

    /// Sets the servings per cooking event.
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Sets how many consecutive slots one cooking covers.
    pub fn with_duration_days(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Sets the frequency weight, clamped to `1..=10`.
    pub fn with_frequency_weight(mut self, weight: u8) -> Self {
        self.frequency_weight = weight.clamp(MIN_FREQUENCY_WEIGHT, MAX_FREQUENCY_WEIGHT);
        self
    }

    /// Adds an ingredient.
    pub fn with_ingredient(mut self, ingredient: Quantity) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Identity key.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Cooking events needed to feed `people` for the whole leftover span.
    ///
    /// `ceil(people * duration_days / servings)`. Zero servings is treated
    /// as one to keep the result finite; validation rejects it anyway.
    pub fn cookings_needed(&self, people: u32) -> u32 {
        let demand = u64::from(people) * u64::from(self.duration_days.max(1));
        let servings = u64::from(self.servings.max(1));
        demand.div_ceil(servings) as u32
    }

    /// Leftover slots produced by one fresh cooking (`duration_days - 1`).
    pub fn carry_slots(&self) -> u32 {
        self.duration_days.saturating_sub(1)
    }

    /// Portions a single slot represents for `people` diners.
    pub fn portions(&self, people: u32) -> u32 {
        self.servings.saturating_mul(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn test_recipe_builder() {
        let recipe = Recipe::new("Feijoada")
            .with_servings(6)
            .with_duration_days(3)
            .with_frequency_weight(8)
            .with_ingredient(Quantity::new("feijao", 1.0, Unit::Kg));

        assert_eq!(recipe.name, "Feijoada");
        assert_eq!(recipe.servings, 6);
        assert_eq!(recipe.duration_days, 3);
        assert_eq!(recipe.frequency_weight, 8);
        assert_eq!(recipe.ingredients.len(), 1);
    }

    #[test]
    fn test_recipe_defaults() {
        let recipe = Recipe::new("Sopa");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.duration_days, 2);
        assert_eq!(recipe.frequency_weight, 5);
    }

    #[test]
    fn test_weight_clamped() {
        assert_eq!(Recipe::new("a").with_frequency_weight(0).frequency_weight, 1);
        assert_eq!(Recipe::new("b").with_frequency_weight(42).frequency_weight, 10);
    }

    #[test]
    fn test_cookings_needed() {
        let arroz = Recipe::new("Arroz").with_servings(4).with_duration_days(1);
        assert_eq!(arroz.cookings_needed(4), 1);
        assert_eq!(arroz.cookings_needed(5), 2);

        let lasanha = Recipe::new("Lasanha").with_servings(8).with_duration_days(3);
        // ceil(4 * 3 / 8) = 2
        assert_eq!(lasanha.cookings_needed(4), 2);
        assert_eq!(lasanha.carry_slots(), 2);
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{
            "name": "Strogonoff",
            "serves": 4,
            "priority": 7,
            "days": 2,
            "ingredients": [{"name": "frango", "qty": 0.5, "unit": "kg"}]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.frequency_weight, 7);
        assert_eq!(recipe.duration_days, 2);
        assert_eq!(recipe.ingredients[0].unit, Unit::Kg);
    }

    #[test]
    fn test_camel_case_output() {
        let json = serde_json::to_string(&Recipe::new("Omelete")).unwrap();
        assert!(json.contains("\"durationDays\":2"));
        assert!(json.contains("\"frequencyWeight\":5"));
    }
}
