//! Weighted feasible selection with least-shortage fallback.

use tracing::debug;

use super::{RandomSource, SelectionContext};
use crate::catalog::RecipeCatalog;
use crate::inventory::InventoryLedger;

/// A selected recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    /// Catalog index.
    pub index: usize,
    /// Cooking events to deduct.
    pub cookings: u32,
    /// Stock fully covered the recipe.
    pub feasible: bool,
    /// Unmet amount (zero for feasible picks).
    pub shortage: f64,
}

/// Chooses recipes for fresh slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionPolicy;

impl SelectionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Picks a feasible recipe from the highest eligible frequency bucket.
    ///
    /// A recipe is eligible when it is under its usage cap and stock
    /// covers its cookings. Returns `None` if no bucket has an eligible
    /// member.
    pub fn pick_feasible(
        &self,
        catalog: &RecipeCatalog,
        ledger: &InventoryLedger,
        ctx: &SelectionContext,
        rng: &mut dyn RandomSource,
    ) -> Option<Pick> {
        for bucket in catalog.by_frequency_descending() {
            let eligible: Vec<(usize, u32)> = bucket
                .recipes
                .iter()
                .filter(|(idx, recipe)| ctx.has_capacity(*idx, recipe))
                .filter_map(|(idx, recipe)| {
                    let cookings = ctx.cookings_for(recipe);
                    ledger
                        .can_satisfy(recipe, cookings)
                        .then_some((*idx, cookings))
                })
                .collect();

            if eligible.is_empty() {
                continue;
            }

            let (index, cookings) = eligible[rng.index(eligible.len())];
            debug!(
                recipe = %catalog.all()[index].name,
                weight = bucket.weight,
                candidates = eligible.len(),
                "feasible pick"
            );
            return Some(Pick {
                index,
                cookings,
                feasible: true,
                shortage: 0.0,
            });
        }
        None
    }

    /// Picks the recipe with the smallest total shortage.
    ///
    /// Ties go to the earlier catalog entry. Usage caps do not apply.
    /// Returns `None` only for an empty catalog.
    pub fn pick_fallback(
        &self,
        catalog: &RecipeCatalog,
        ledger: &InventoryLedger,
        ctx: &SelectionContext,
    ) -> Option<Pick> {
        let mut best: Option<Pick> = None;
        for (index, recipe) in catalog.all().iter().enumerate() {
            let cookings = ctx.cookings_for(recipe);
            let shortage = ledger.shortage(recipe, cookings);
            if best.as_ref().map_or(true, |b| shortage < b.shortage) {
                best = Some(Pick {
                    index,
                    cookings,
                    feasible: false,
                    shortage,
                });
            }
        }
        if let Some(pick) = &best {
            debug!(
                recipe = %catalog.all()[pick.index].name,
                shortage = pick.shortage,
                "fallback suggestion"
            );
        }
        best
    }
}
