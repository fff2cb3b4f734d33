//! Plan quality metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Feasible slots | Slots whose recipe was covered by stock (incl. leftovers) |
//! | Suggested slots | Best-effort picks made despite missing stock |
//! | Continuations | Slots served from leftovers |
//! | Fresh cookings | Slots where something was cooked (feasible or suggested) |
//! | Feasible rate | Feasible slots / total slots |

use std::collections::HashMap;

use crate::models::Plan;

/// Plan quality indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Slots in the plan.
    pub total_slots: usize,
    /// Slots filled feasibly (fresh or leftover).
    pub feasible_slots: usize,
    /// Best-effort suggestions.
    pub suggested_slots: usize,
    /// Leftover slots.
    pub continuation_slots: usize,
    /// Cooking events (feasible fresh picks plus suggestions).
    pub fresh_cookings: usize,
    /// Slots with no recipe at all.
    pub empty_slots: usize,
    /// Feasible fresh picks per recipe name.
    pub selections_by_recipe: HashMap<String, u32>,
    /// Fraction of feasible slots (0.0..1.0). `1.0` for an empty plan.
    pub feasible_rate: f64,
}

impl PlanSummary {
    /// Computes metrics from a finished plan.
    pub fn calculate(plan: &Plan) -> Self {
        let mut feasible_slots = 0;
        let mut suggested_slots = 0;
        let mut continuation_slots = 0;
        let mut fresh_cookings = 0;
        let mut empty_slots = 0;
        let mut selections_by_recipe: HashMap<String, u32> = HashMap::new();

        for (_, _, slot) in plan.slots() {
            let Some(name) = slot.recipe_name.as_deref() else {
                empty_slots += 1;
                continue;
            };
            if slot.is_continuation {
                continuation_slots += 1;
            } else {
                fresh_cookings += 1;
            }
            if slot.is_feasible {
                feasible_slots += 1;
                if !slot.is_continuation {
                    *selections_by_recipe.entry(name.to_string()).or_insert(0) += 1;
                }
            } else {
                suggested_slots += 1;
            }
        }

        let total_slots = plan.slot_count();
        let feasible_rate = if total_slots == 0 {
            1.0
        } else {
            feasible_slots as f64 / total_slots as f64
        };

        Self {
            total_slots,
            feasible_slots,
            suggested_slots,
            continuation_slots,
            fresh_cookings,
            empty_slots,
            selections_by_recipe,
            feasible_rate,
        }
    }

    /// Feasible fresh picks of one recipe.
    pub fn selections_of(&self, recipe_name: &str) -> u32 {
        self.selections_by_recipe
            .get(recipe_name)
            .copied()
            .unwrap_or(0)
    }
}
