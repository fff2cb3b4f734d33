//! Meal planning domain models.
//!
//! Provides the core data types for pantry stock, recipes and plans.
//!
//! # Domain Mappings
//!
//! | u-mealplan | Scheduling analogue |
//! |------------|---------------------|
//! | Recipe | Task |
//! | Quantity | Resource requirement |
//! | StockItem | Consumable resource |
//! | PlanSlot | Assignment |
//! | Plan | Schedule |

mod plan;
mod quantity;
mod recipe;
mod stock;

pub use plan::{Plan, PlanSlot};
pub use quantity::{Quantity, Unit};
pub use recipe::{Recipe, MAX_FREQUENCY_WEIGHT, MIN_FREQUENCY_WEIGHT};
pub use stock::StockItem;
