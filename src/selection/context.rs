//! Per-run selection state.

use std::collections::HashMap;

use super::usage_cap;
use crate::models::Recipe;

/// Runtime state consulted by the selection policy.
///
/// Tracks how many times each recipe (by catalog index) has been freshly
/// selected in the current run.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    /// Diners per meal.
    pub people: u32,
    /// Slots in the whole plan (`days * meals_per_day`).
    pub total_slots: usize,
    /// Fresh selections so far (catalog index → count).
    pub uses: HashMap<usize, u32>,
}

impl SelectionContext {
    /// Creates a context for a plan horizon.
    pub fn new(people: u32, total_slots: usize) -> Self {
        Self {
            people,
            total_slots,
            uses: HashMap::new(),
        }
    }

    /// Fresh selections of the recipe at `index`.
    pub fn uses_of(&self, index: usize) -> u32 {
        self.uses.get(&index).copied().unwrap_or(0)
    }

    /// Records a fresh selection.
    pub fn record_use(&mut self, index: usize) {
        *self.uses.entry(index).or_insert(0) += 1;
    }

    /// Usage cap for a recipe in this horizon.
    pub fn cap_for(&self, recipe: &Recipe) -> u32 {
        usage_cap(self.total_slots, recipe.frequency_weight)
    }

    /// Whether the recipe can still be freshly selected.
    pub fn has_capacity(&self, index: usize, recipe: &Recipe) -> bool {
        self.uses_of(index) < self.cap_for(recipe)
    }

    /// Cooking events the recipe needs for this household.
    pub fn cookings_for(&self, recipe: &Recipe) -> u32 {
        recipe.cookings_needed(self.people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_tracking() {
        let recipe = Recipe::new("Sopa").with_frequency_weight(5);
        // 14 slots → cap 2
        let mut ctx = SelectionContext::new(4, 14);
        assert_eq!(ctx.cap_for(&recipe), 2);
        assert!(ctx.has_capacity(0, &recipe));

        ctx.record_use(0);
        ctx.record_use(0);
        assert_eq!(ctx.uses_of(0), 2);
        assert!(!ctx.has_capacity(0, &recipe));
        assert!(ctx.has_capacity(1, &recipe));
    }

    #[test]
    fn test_cookings_for() {
        let recipe = Recipe::new("Lasanha").with_servings(6).with_duration_days(2);
        let ctx = SelectionContext::new(5, 10);
        // ceil(5 * 2 / 6) = 2
        assert_eq!(ctx.cookings_for(&recipe), 2);
    }
}
