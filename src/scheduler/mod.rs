//! Greedy meal scheduler and plan metrics.
//!
//! Provides the inventory-aware slot filler and plan quality metrics.
//!
//! # Algorithm
//!
//! `MealPlanScheduler` walks the plan grid in order. Leftovers are served
//! before anything new is cooked; fresh slots go to a random feasible
//! recipe from the highest frequency bucket under its usage cap, with a
//! least-shortage suggestion when stock covers nothing.
//!
//! # Metrics
//!
//! `PlanSummary` counts feasible, suggested and leftover slots, and
//! selections per recipe.

mod planner;
mod summary;

pub use planner::{MealPlanScheduler, PlanMode, PlanOutcome, PlanRequest};
pub use summary::PlanSummary;
