//! Input validation for recipes and stock.
//!
//! Checks structural integrity before planning. Detects:
//! - Duplicate recipe names
//! - Recipes without ingredients
//! - Non-positive or non-finite ingredient amounts
//! - Zero servings or zero duration
//! - Frequency weights outside `1..=10`
//! - Negative or non-finite stock
//!
//! Every problem is reported, not just the first.

use crate::models::{Recipe, StockItem, MAX_FREQUENCY_WEIGHT, MIN_FREQUENCY_WEIGHT};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two recipes share the same normalized name.
    DuplicateName,
    /// A name is blank.
    EmptyName,
    /// A recipe has no ingredients.
    EmptyIngredients,
    /// An ingredient amount is zero or negative.
    NonPositiveQuantity,
    /// An amount is NaN or infinite.
    NonFiniteQuantity,
    /// A recipe yields zero servings.
    InvalidServings,
    /// A recipe covers zero days.
    InvalidDuration,
    /// Frequency weight outside the allowed range.
    WeightOutOfRange,
    /// A stock entry holds a negative amount.
    NegativeStock,
    /// A referenced recipe does not exist.
    UnknownRecipe,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a set of recipes.
///
/// Checks:
/// 1. No duplicate names (after normalization)
/// 2. Names are not blank
/// 3. Every recipe has at least one ingredient
/// 4. Every ingredient amount is finite and `> 0`
/// 5. `servings > 0` and `duration_days >= 1`
/// 6. `frequency_weight` in `1..=10`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_recipes(recipes: &[Recipe]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for recipe in recipes {
        let key = recipe.key();
        if key.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Recipe name is blank",
            ));
        } else if !names.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate recipe name: {}", recipe.name),
            ));
        }

        if recipe.ingredients.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIngredients,
                format!("Recipe '{}' has no ingredients", recipe.name),
            ));
        }

        for ing in &recipe.ingredients {
            if ing.key().is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyName,
                    format!("Recipe '{}' has an unnamed ingredient", recipe.name),
                ));
            }
            if !ing.qty.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteQuantity,
                    format!("Recipe '{}': '{}' amount is not finite", recipe.name, ing.name),
                ));
            } else if ing.qty <= 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveQuantity,
                    format!(
                        "Recipe '{}': '{}' amount must be positive, got {}",
                        recipe.name, ing.name, ing.qty
                    ),
                ));
            }
        }

        if recipe.servings == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidServings,
                format!("Recipe '{}' yields zero servings", recipe.name),
            ));
        }

        if recipe.duration_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Recipe '{}' lasts zero days", recipe.name),
            ));
        }

        if !(MIN_FREQUENCY_WEIGHT..=MAX_FREQUENCY_WEIGHT).contains(&recipe.frequency_weight) {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeightOutOfRange,
                format!(
                    "Recipe '{}' frequency weight {} outside {}..={}",
                    recipe.name, recipe.frequency_weight, MIN_FREQUENCY_WEIGHT, MAX_FREQUENCY_WEIGHT
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates stock entries: names present, amounts finite and `>= 0`.
pub fn validate_stock(items: &[StockItem]) -> ValidationResult {
    let mut errors = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        if item.key().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Stock entry #{idx} has no name"),
            ));
        }
        if !item.qty().is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteQuantity,
                format!("Stock '{}' amount is not finite", item.name()),
            ));
        } else if item.qty() < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeStock,
                format!("Stock '{}' is negative: {}", item.name(), item.qty()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quantity, Unit};

    fn sample_recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("Arroz")
                .with_servings(4)
                .with_duration_days(1)
                .with_ingredient(Quantity::new("arroz", 0.5, Unit::Kg)),
            Recipe::new("Lasanha")
                .with_servings(8)
                .with_duration_days(3)
                .with_frequency_weight(7)
                .with_ingredient(Quantity::new("massa", 500.0, Unit::G))
                .with_ingredient(Quantity::new("carne moida", 0.5, Unit::Kg)),
        ]
    }

    #[test]
    fn test_valid_recipes() {
        assert!(validate_recipes(&sample_recipes()).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let mut recipes = sample_recipes();
        recipes.push(
            Recipe::new("ARROZ").with_ingredient(Quantity::new("arroz", 1.0, Unit::Kg)),
        );

        let errors = validate_recipes(&recipes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_empty_ingredients() {
        let errors = validate_recipes(&[Recipe::new("Nada")]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyIngredients));
    }

    #[test]
    fn test_non_positive_quantity() {
        let recipe = Recipe::new("Zero").with_ingredient(Quantity::new("sal", 0.0, Unit::G));
        let errors = validate_recipes(&[recipe]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveQuantity));

        let recipe = Recipe::new("NaN").with_ingredient(Quantity::new("sal", f64::NAN, Unit::G));
        let errors = validate_recipes(&[recipe]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonFiniteQuantity));
    }

    #[test]
    fn test_servings_duration_weight() {
        let mut recipe = Recipe::new("Ruim").with_ingredient(Quantity::new("sal", 1.0, Unit::G));
        recipe.servings = 0;
        recipe.duration_days = 0;
        recipe.frequency_weight = 11;

        let errors = validate_recipes(&[recipe]).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::InvalidServings));
        assert!(kinds.contains(&ValidationErrorKind::InvalidDuration));
        assert!(kinds.contains(&ValidationErrorKind::WeightOutOfRange));
    }

    #[test]
    fn test_multiple_errors() {
        let recipes = vec![Recipe::new("  "), Recipe::new("Vazia")];
        let errors = validate_recipes(&recipes).unwrap_err();
        // blank name + two empty ingredient lists
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_validate_stock() {
        let ok = vec![StockItem::new("arroz", 1.0, Unit::Kg)];
        assert!(validate_stock(&ok).is_ok());

        let mut bad = StockItem::new("leite", 1.0, Unit::L);
        bad.quantity.qty = -2.0;
        let mut inf = StockItem::new("ovo", 1.0, Unit::Count);
        inf.quantity.qty = f64::INFINITY;
        let errors = validate_stock(&[bad, inf, StockItem::new("", 1.0, Unit::G)]).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::NegativeStock));
        assert!(kinds.contains(&ValidationErrorKind::NonFiniteQuantity));
        assert!(kinds.contains(&ValidationErrorKind::EmptyName));
    }
}
