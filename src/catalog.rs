//! Recipe catalog.
//!
//! Read-only during a scheduling run. Maintenance operations (add,
//! replace, remove) are atomic edits between runs.

use serde::{Deserialize, Serialize};

use crate::conversion::normalize_name;
use crate::error::{PlannerError, PlannerResult};
use crate::models::Recipe;
use crate::validation::{validate_recipes, ValidationError, ValidationErrorKind};

/// Recipes sharing one frequency weight, in catalog order.
#[derive(Debug, Clone)]
pub struct FrequencyBucket<'a> {
    pub weight: u8,
    /// `(catalog index, recipe)` pairs.
    pub recipes: Vec<(usize, &'a Recipe)>,
}

/// The household's known recipes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog after validating every recipe.
    pub fn try_from_recipes(recipes: Vec<Recipe>) -> PlannerResult<Self> {
        validate_recipes(&recipes).map_err(PlannerError::InvalidRecipes)?;
        Ok(Self { recipes })
    }

    /// All recipes in catalog order.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Looks up a recipe by name (case and accent insensitive).
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.position(name).map(|i| &self.recipes[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        self.recipes.iter().position(|r| r.key() == key)
    }

    /// Adds a recipe. Rejects invalid recipes and duplicate names.
    pub fn add(&mut self, recipe: Recipe) -> PlannerResult<()> {
        if self.position(&recipe.name).is_some() {
            return Err(PlannerError::InvalidRecipes(vec![ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Recipe '{}' already exists", recipe.name),
            )]));
        }
        validate_recipes(std::slice::from_ref(&recipe)).map_err(PlannerError::InvalidRecipes)?;
        self.recipes.push(recipe);
        Ok(())
    }

    /// Replaces the recipe named `name` in place, keeping its position.
    ///
    /// The catalog is unchanged if the new recipe is invalid, if `name`
    /// is unknown, or if the new name collides with another recipe.
    pub fn replace(&mut self, name: &str, recipe: Recipe) -> PlannerResult<Recipe> {
        let idx = self.position(name).ok_or_else(|| {
            PlannerError::InvalidRecipes(vec![ValidationError::new(
                ValidationErrorKind::UnknownRecipe,
                format!("Recipe '{name}' does not exist"),
            )])
        })?;
        if let Some(other) = self.position(&recipe.name) {
            if other != idx {
                return Err(PlannerError::InvalidRecipes(vec![ValidationError::new(
                    ValidationErrorKind::DuplicateName,
                    format!("Recipe '{}' already exists", recipe.name),
                )]));
            }
        }
        validate_recipes(std::slice::from_ref(&recipe)).map_err(PlannerError::InvalidRecipes)?;
        Ok(std::mem::replace(&mut self.recipes[idx], recipe))
    }

    /// Removes a recipe by name.
    pub fn remove(&mut self, name: &str) -> Option<Recipe> {
        self.position(name).map(|i| self.recipes.remove(i))
    }

    /// Groups recipes by frequency weight, highest weight first.
    ///
    /// Within a bucket recipes keep catalog order.
    pub fn by_frequency_descending(&self) -> Vec<FrequencyBucket<'_>> {
        let mut weights: Vec<u8> = self.recipes.iter().map(|r| r.frequency_weight).collect();
        weights.sort_unstable_by(|a, b| b.cmp(a));
        weights.dedup();

        weights
            .into_iter()
            .map(|weight| FrequencyBucket {
                weight,
                recipes: self
                    .recipes
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.frequency_weight == weight)
                    .collect(),
            })
            .collect()
    }
}

impl From<Vec<Recipe>> for RecipeCatalog {
    /// Wraps recipes without validation.
    fn from(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quantity, Unit};

    fn recipe(name: &str, weight: u8) -> Recipe {
        Recipe::new(name)
            .with_frequency_weight(weight)
            .with_ingredient(Quantity::new("arroz", 100.0, Unit::G))
    }

    #[test]
    fn test_buckets_descending_in_catalog_order() {
        let catalog = RecipeCatalog::from(vec![
            recipe("A", 5),
            recipe("B", 9),
            recipe("C", 5),
            recipe("D", 1),
        ]);
        let buckets = catalog.by_frequency_descending();
        let weights: Vec<u8> = buckets.iter().map(|b| b.weight).collect();
        assert_eq!(weights, vec![9, 5, 1]);

        let mid: Vec<&str> = buckets[1].recipes.iter().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(mid, vec!["A", "C"]);
        assert_eq!(buckets[1].recipes[1].0, 2);
    }

    #[test]
    fn test_empty_catalog_has_no_buckets() {
        assert!(RecipeCatalog::new().by_frequency_descending().is_empty());
    }

    #[test]
    fn test_get_ignores_case_and_accents() {
        let catalog = RecipeCatalog::from(vec![recipe("Feijão Tropeiro", 5)]);
        assert!(catalog.get("feijao tropeiro").is_some());
        assert!(catalog.get("feijoada").is_none());
    }

    #[test]
    fn test_add_rejects_duplicates_and_invalid() {
        let mut catalog = RecipeCatalog::new();
        catalog.add(recipe("Sopa", 5)).unwrap();
        assert!(catalog.add(recipe("SOPA", 3)).is_err());
        assert!(catalog.add(Recipe::new("Vazia")).is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_replace_is_atomic() {
        let mut catalog = RecipeCatalog::from(vec![recipe("A", 5), recipe("B", 5)]);

        let old = catalog.replace("A", recipe("A2", 8)).unwrap();
        assert_eq!(old.name, "A");
        assert_eq!(catalog.all()[0].name, "A2");
        assert_eq!(catalog.len(), 2);

        // Invalid replacement leaves the catalog as it was.
        assert!(catalog.replace("A2", Recipe::new("A3")).is_err());
        assert_eq!(catalog.all()[0].name, "A2");

        // Renaming onto another recipe is refused.
        assert!(catalog.replace("A2", recipe("B", 5)).is_err());
        assert!(catalog.replace("Z", recipe("Z", 5)).is_err());
    }

    #[test]
    fn test_remove() {
        let mut catalog = RecipeCatalog::from(vec![recipe("A", 5), recipe("B", 5)]);
        assert_eq!(catalog.remove("a").unwrap().name, "A");
        assert!(catalog.remove("a").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_try_from_recipes_validates() {
        assert!(RecipeCatalog::try_from_recipes(vec![recipe("A", 5)]).is_ok());
        let err = RecipeCatalog::try_from_recipes(vec![recipe("A", 5), recipe("a", 5)]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRecipes(_)));
    }
}
