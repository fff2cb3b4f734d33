//! Pantry snapshot interchange format.
//!
//! The document a storage layer hands to the planner and takes back:
//!
//! ```json
//! {
//!   "inventory": [{ "name": "arroz", "qty": 2.0, "unit": "kg" }],
//!   "recipes": [{ "name": "Arroz", "servings": 4, "durationDays": 1,
//!                 "frequencyWeight": 5, "ingredients": [] }],
//!   "plan": { "days": [] }
//! }
//! ```
//!
//! Missing sections take empty defaults. A corrupt document loaded with
//! [`PantrySnapshot::from_json_lenient`] yields an empty snapshot.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::RecipeCatalog;
use crate::error::PlannerResult;
use crate::inventory::InventoryLedger;
use crate::models::{Plan, Recipe, StockItem};

/// Stored pantry state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantrySnapshot {
    #[serde(default)]
    pub inventory: Vec<StockItem>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub plan: Plan,
}

impl PantrySnapshot {
    /// Builds a snapshot from live state.
    pub fn new(ledger: &InventoryLedger, catalog: &RecipeCatalog, plan: &Plan) -> Self {
        Self {
            inventory: ledger.items().to_vec(),
            recipes: catalog.all().to_vec(),
            plan: plan.clone(),
        }
    }

    /// Strict parse.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a stored document, falling back to an empty snapshot.
    ///
    /// Blank input and `null` are treated as "nothing stored yet".
    pub fn from_json_lenient(json: &str) -> Self {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Self::default();
        }
        match serde_json::from_str(trimmed) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "corrupt pantry snapshot, using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Ledger over the stored inventory.
    pub fn ledger(&self) -> InventoryLedger {
        InventoryLedger::new(self.inventory.clone())
    }

    /// Catalog over the stored recipes, without validation.
    pub fn catalog(&self) -> RecipeCatalog {
        RecipeCatalog::from(self.recipes.clone())
    }

    /// Splits into live state.
    pub fn into_parts(self) -> (InventoryLedger, RecipeCatalog, Plan) {
        (
            InventoryLedger::new(self.inventory),
            RecipeCatalog::from(self.recipes),
            self.plan,
        )
    }
}
