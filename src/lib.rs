//! Inventory-aware meal planning.
//!
//! Builds a day-by-meal plan from a recipe catalog and a pantry ledger,
//! preferring recipes the current stock can cover, honoring leftovers
//! and deducting ingredients as recipes are chosen.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Quantity`, `Unit`, `StockItem`, `Recipe`,
//!   `Plan`, `PlanSlot`
//! - **`conversion`**: Name/unit normalization and gram conversion with a
//!   density table
//! - **`inventory`**: `InventoryLedger` feasibility checks and consumption
//! - **`catalog`**: `RecipeCatalog` maintenance and frequency buckets
//! - **`selection`**: Usage caps, weighted feasible pick, fallback pick
//! - **`scheduler`**: `MealPlanScheduler` (generate / simulate) and
//!   `PlanSummary`
//! - **`parse`**: `name,qty,unit` line import
//! - **`snapshot`**: Persistence interchange document
//! - **`config`**: `PlannerConfig`
//! - **`validation`**: Input integrity checks (duplicate names, bad
//!   quantities, out-of-range weights)
//!
//! # Example
//!
//! ```
//! use u_mealplan::prelude::*;
//!
//! let mut ledger = InventoryLedger::new(vec![
//!     StockItem::new("arroz", 2.0, Unit::Kg),
//!     StockItem::new("feijao", 1.0, Unit::Kg),
//! ]);
//! let catalog = RecipeCatalog::try_from_recipes(vec![
//!     Recipe::new("Arroz e feijao")
//!         .with_duration_days(2)
//!         .with_ingredient(Quantity::new("arroz", 250.0, Unit::G))
//!         .with_ingredient(Quantity::new("feijao", 200.0, Unit::G)),
//! ])
//! .unwrap();
//!
//! let plan = MealPlanScheduler::new()
//!     .generate(&catalog, &mut ledger, &PlannerConfig::new(4, 2, 2), &mut RngSource::seeded(42))
//!     .unwrap();
//!
//! assert_eq!(plan.slot_count(), 4);
//! assert!(plan.slot(0, 1).unwrap().is_continuation);
//! ```
//!
//! # Logging
//!
//! Events are emitted through `tracing`; installing a subscriber is left
//! to the application.

pub mod catalog;
pub mod config;
pub mod conversion;
pub mod error;
pub mod inventory;
pub mod models;
pub mod parse;
pub mod scheduler;
pub mod selection;
pub mod snapshot;
pub mod validation;

pub use error::{PlannerError, PlannerResult};

/// Common imports.
pub mod prelude {
    pub use crate::catalog::RecipeCatalog;
    pub use crate::config::PlannerConfig;
    pub use crate::conversion::{DensityTable, UnitConverter};
    pub use crate::error::{PlannerError, PlannerResult};
    pub use crate::inventory::InventoryLedger;
    pub use crate::models::{Plan, PlanSlot, Quantity, Recipe, StockItem, Unit};
    pub use crate::scheduler::{MealPlanScheduler, PlanMode, PlanSummary};
    pub use crate::selection::{RandomSource, RngSource};
    pub use crate::snapshot::PantrySnapshot;
}
