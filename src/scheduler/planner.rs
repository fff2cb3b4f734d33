//! Inventory-aware greedy meal scheduler.
//!
//! # Algorithm
//!
//! Slots are filled left to right, day by day:
//!
//! 1. If leftovers from an earlier cooking remain, serve them
//!    (oldest cooking first) and mark the slot as a continuation.
//! 2. Otherwise pick a feasible recipe from the highest frequency bucket
//!    that still has one under its usage cap; deduct its cookings and
//!    open a carry for `duration_days - 1` further slots.
//! 3. If nothing is feasible, suggest the least-shortage recipe and mark
//!    the slot infeasible. Suggestions deduct stock (clamped at zero)
//!    unless `consume_on_suggestion` is off.
//!
//! `generate` commits the resulting ledger; `simulate` runs the same
//! algorithm on a private copy and discards it.
//!
//! # Complexity
//! O(s * r * i) where s=slots, r=recipes, i=ingredients/recipe.

use std::collections::VecDeque;

use tracing::{debug, info};

use super::PlanSummary;
use crate::catalog::RecipeCatalog;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::inventory::InventoryLedger;
use crate::models::{Plan, PlanSlot};
use crate::selection::{RandomSource, SelectionContext, SelectionPolicy};
use crate::validation::validate_recipes;

/// Whether a run commits its stock deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Return the updated ledger for the caller to persist.
    Generate,
    /// Discard the working ledger.
    Simulate,
}

/// Input container for scheduling.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Pantry snapshot.
    pub ledger: InventoryLedger,
    /// Recipes to choose from.
    pub catalog: RecipeCatalog,
    /// Horizon and household.
    pub config: PlannerConfig,
}

impl PlanRequest {
    /// Creates a request with the default configuration.
    pub fn new(ledger: InventoryLedger, catalog: RecipeCatalog) -> Self {
        Self {
            ledger,
            catalog,
            config: PlannerConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Result of a scheduling run.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// The plan grid.
    pub plan: Plan,
    /// Ledger after deductions (`None` in simulate mode).
    pub ledger: Option<InventoryLedger>,
    /// Plan metrics.
    pub summary: PlanSummary,
}

/// Leftover capacity from a cooking event.
#[derive(Debug, Clone)]
struct ActiveCarry {
    recipe_index: usize,
    remaining_slots: u32,
}

/// Greedy meal scheduler.
///
/// # Example
///
/// ```
/// use u_mealplan::catalog::RecipeCatalog;
/// use u_mealplan::config::PlannerConfig;
/// use u_mealplan::inventory::InventoryLedger;
/// use u_mealplan::models::{Quantity, Recipe, StockItem, Unit};
/// use u_mealplan::scheduler::MealPlanScheduler;
/// use u_mealplan::selection::RngSource;
///
/// let mut ledger = InventoryLedger::new(vec![StockItem::new("arroz", 2.0, Unit::Kg)]);
/// let catalog = RecipeCatalog::from(vec![Recipe::new("Arroz")
///     .with_servings(4)
///     .with_duration_days(1)
///     .with_ingredient(Quantity::new("arroz", 0.5, Unit::Kg))]);
/// let config = PlannerConfig::new(4, 1, 1);
///
/// let scheduler = MealPlanScheduler::new();
/// let plan = scheduler
///     .generate(&catalog, &mut ledger, &config, &mut RngSource::seeded(1))
///     .unwrap();
///
/// assert_eq!(plan.slot(0, 0).unwrap().recipe_name.as_deref(), Some("Arroz"));
/// assert!((ledger.find("arroz").unwrap().qty() - 1.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MealPlanScheduler {
    policy: SelectionPolicy,
}

impl MealPlanScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self {
            policy: SelectionPolicy::new(),
        }
    }

    /// Plans and commits: on success `ledger` holds the post-plan stock.
    ///
    /// On error `ledger` is left untouched.
    pub fn generate(
        &self,
        catalog: &RecipeCatalog,
        ledger: &mut InventoryLedger,
        config: &PlannerConfig,
        rng: &mut dyn RandomSource,
    ) -> PlannerResult<Plan> {
        let outcome = self.schedule(catalog, ledger, config, PlanMode::Generate, rng)?;
        if let Some(updated) = outcome.ledger {
            *ledger = updated;
        }
        Ok(outcome.plan)
    }

    /// Plans without touching `ledger`.
    pub fn simulate(
        &self,
        catalog: &RecipeCatalog,
        ledger: &InventoryLedger,
        config: &PlannerConfig,
        rng: &mut dyn RandomSource,
    ) -> PlannerResult<Plan> {
        self.schedule(catalog, ledger, config, PlanMode::Simulate, rng)
            .map(|outcome| outcome.plan)
    }

    /// Schedules from a request.
    pub fn schedule_request(
        &self,
        request: &PlanRequest,
        mode: PlanMode,
        rng: &mut dyn RandomSource,
    ) -> PlannerResult<PlanOutcome> {
        self.schedule(&request.catalog, &request.ledger, &request.config, mode, rng)
    }

    /// Runs the scheduler on a private copy of `ledger`.
    ///
    /// # Errors
    /// - [`PlannerError::InvalidConfig`] for an out-of-range horizon.
    /// - [`PlannerError::EmptyCatalog`] when there are no recipes.
    /// - [`PlannerError::InvalidRecipes`] when any recipe fails validation.
    pub fn schedule(
        &self,
        catalog: &RecipeCatalog,
        ledger: &InventoryLedger,
        config: &PlannerConfig,
        mode: PlanMode,
        rng: &mut dyn RandomSource,
    ) -> PlannerResult<PlanOutcome> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(PlannerError::EmptyCatalog);
        }
        validate_recipes(catalog.all()).map_err(PlannerError::InvalidRecipes)?;

        let mut working = ledger.clone();
        working.repair();

        let mut ctx = SelectionContext::new(config.people, config.total_slots());
        let mut carries: VecDeque<ActiveCarry> = VecDeque::new();
        let mut plan = Plan::new();

        for day in 0..config.days as usize {
            let mut meals = Vec::with_capacity(config.meals_per_day as usize);
            for meal in 0..config.meals_per_day as usize {
                let slot = match carries.front_mut() {
                    Some(carry) => {
                        carry.remaining_slots -= 1;
                        let name = &catalog.all()[carry.recipe_index].name;
                        debug!(day, meal, recipe = %name, left = carry.remaining_slots, "leftovers");
                        let slot = PlanSlot::continuation(name.clone());
                        if carry.remaining_slots == 0 {
                            carries.pop_front();
                        }
                        slot
                    }
                    None => self.fill_fresh(
                        catalog,
                        &mut working,
                        &mut ctx,
                        &mut carries,
                        config,
                        rng,
                    ),
                };
                meals.push(slot);
            }
            plan.push_day(meals);
        }

        let summary = PlanSummary::calculate(&plan);
        info!(
            ?mode,
            slots = summary.total_slots,
            feasible = summary.feasible_slots,
            suggested = summary.suggested_slots,
            depleted = working.items().iter().filter(|i| i.is_depleted()).count(),
            "meal plan built"
        );

        let ledger = match mode {
            PlanMode::Generate => Some(working),
            PlanMode::Simulate => None,
        };
        Ok(PlanOutcome {
            plan,
            ledger,
            summary,
        })
    }

    /// Fills a slot with no leftovers available.
    fn fill_fresh(
        &self,
        catalog: &RecipeCatalog,
        working: &mut InventoryLedger,
        ctx: &mut SelectionContext,
        carries: &mut VecDeque<ActiveCarry>,
        config: &PlannerConfig,
        rng: &mut dyn RandomSource,
    ) -> PlanSlot {
        if let Some(pick) = self.policy.pick_feasible(catalog, working, ctx, rng) {
            let recipe = &catalog.all()[pick.index];
            working.consume_in_place(recipe, pick.cookings);
            ctx.record_use(pick.index);
            if recipe.carry_slots() > 0 {
                carries.push_back(ActiveCarry {
                    recipe_index: pick.index,
                    remaining_slots: recipe.carry_slots(),
                });
            }
            return PlanSlot::cooked(recipe.name.clone());
        }

        match self.policy.pick_fallback(catalog, working, ctx) {
            Some(pick) => {
                let recipe = &catalog.all()[pick.index];
                if config.consume_on_suggestion {
                    working.consume_in_place(recipe, pick.cookings);
                }
                PlanSlot::suggested(recipe.name.clone())
            }
            None => PlanSlot::no_suggestion(),
        }
    }
}
