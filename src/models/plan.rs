//! Plan (solution) model.
//!
//! A plan is a day × meal grid of slots. Each slot names the recipe
//! served, whether it is a leftover continuation, and whether the
//! recipe was fully covered by stock when it was chosen.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// One meal slot in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSlot {
    /// Recipe served. `None` is the "no suggestion" sentinel.
    pub recipe_name: Option<String>,
    /// Leftovers from an earlier cooking event.
    #[serde(default)]
    pub is_continuation: bool,
    /// Stock covered the recipe at selection time. `false` marks a
    /// best-effort suggestion.
    #[serde(default = "default_feasible")]
    pub is_feasible: bool,
}

fn default_feasible() -> bool {
    true
}

impl PlanSlot {
    /// A freshly cooked, fully stocked recipe.
    pub fn cooked(recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_name: Some(recipe_name.into()),
            is_continuation: false,
            is_feasible: true,
        }
    }

    /// Leftovers of a recipe cooked earlier.
    pub fn continuation(recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_name: Some(recipe_name.into()),
            is_continuation: true,
            is_feasible: true,
        }
    }

    /// A best-effort pick chosen despite missing stock.
    pub fn suggested(recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_name: Some(recipe_name.into()),
            is_continuation: false,
            is_feasible: false,
        }
    }

    /// No recipe could be suggested.
    pub fn no_suggestion() -> Self {
        Self {
            recipe_name: None,
            is_continuation: false,
            is_feasible: false,
        }
    }

    /// Whether this slot was filled by a suggestion rather than a feasible pick.
    pub fn is_suggestion(&self) -> bool {
        !self.is_feasible && self.recipe_name.is_some()
    }
}

/// A complete meal plan.
///
/// Serializes as `{"days": [[slot, ...], ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Days in order, each holding `meals_per_day` slots in order.
    pub days: Vec<Vec<PlanSlot>>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a day.
    pub fn push_day(&mut self, slots: Vec<PlanSlot>) {
        self.days.push(slots);
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Slots per day (from the first day; zero for an empty plan).
    pub fn meals_per_day(&self) -> usize {
        self.days.first().map_or(0, Vec::len)
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Whether the plan has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Slot at `(day, meal)`.
    pub fn slot(&self, day: usize, meal: usize) -> Option<&PlanSlot> {
        self.days.get(day)?.get(meal)
    }

    /// Iterates `(day, meal, slot)` in chronological order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, usize, &PlanSlot)> {
        self.days.iter().enumerate().flat_map(|(d, meals)| {
            meals.iter().enumerate().map(move |(m, slot)| (d, m, slot))
        })
    }

    /// Swaps the recipe shown in one slot.
    ///
    /// A pure data edit: flags are kept and no stock is touched.
    pub fn replace_slot(
        &mut self,
        day: usize,
        meal: usize,
        recipe_name: impl Into<String>,
    ) -> PlannerResult<()> {
        let slot = self
            .days
            .get_mut(day)
            .and_then(|meals| meals.get_mut(meal))
            .ok_or(PlannerError::SlotOutOfRange { day, meal })?;
        slot.recipe_name = Some(recipe_name.into());
        Ok(())
    }

    /// Slots that were filled by a suggestion.
    pub fn suggestions(&self) -> Vec<(usize, usize, &PlanSlot)> {
        self.slots().filter(|(_, _, s)| s.is_suggestion()).collect()
    }

    /// Whether every slot was feasible.
    pub fn is_fully_feasible(&self) -> bool {
        self.slots().all(|(_, _, s)| s.is_feasible)
    }

    /// Exports as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Imports from JSON.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
