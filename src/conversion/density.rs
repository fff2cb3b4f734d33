//! Ingredient density table for volume-to-mass conversion.
//!
//! Densities are grams per millilitre, keyed by the normalized
//! ingredient name (lower-case, accents stripped).

use std::collections::HashMap;

use super::normalize_name;
use crate::error::{PlannerError, PlannerResult};

/// Built-in densities (g/mL) for common pantry staples.
const BUILTIN_DENSITIES: &[(&str, f64)] = &[
    ("agua", 1.0),
    ("leite", 1.0),
    ("oleo", 0.92),
    ("oleo vegetal", 0.92),
    ("acucar", 0.85),
    ("acucar cristal", 0.85),
    ("farinha", 0.53),
    ("farinha de trigo", 0.53),
    ("arroz", 0.85),
    ("feijao", 0.7),
    ("carne moida", 0.95),
    ("batata", 0.65),
    ("tomate", 0.95),
    ("aipim", 0.6),
    ("mandioquinha", 0.6),
    ("manteiga", 0.96),
    ("creme de leite", 1.01),
    ("iogurte", 1.03),
    ("queijo ralado", 0.32),
    ("cafe moido", 0.5),
    ("sal", 1.2),
    ("cebola", 0.64),
    ("alho", 0.6),
    ("atum", 0.8),
    ("milho", 0.72),
    ("ervilha", 0.72),
];

/// Maps normalized ingredient names to densities in g/mL.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    entries: HashMap<String, f64>,
}

impl DensityTable {
    /// An empty table. Every volume conversion will be unconvertible.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_DENSITIES
            .iter()
            .map(|&(name, density)| (name.to_string(), density))
            .collect();
        Self { entries }
    }

    /// Adds or overrides an entry. The name is normalized before insertion.
    pub fn insert(&mut self, name: &str, grams_per_ml: f64) -> PlannerResult<()> {
        if !grams_per_ml.is_finite() || grams_per_ml <= 0.0 {
            return Err(PlannerError::InvalidDensity {
                name: name.to_string(),
                density: grams_per_ml,
            });
        }
        self.entries.insert(normalize_name(name), grams_per_ml);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entry(mut self, name: &str, grams_per_ml: f64) -> PlannerResult<Self> {
        self.insert(name, grams_per_ml)?;
        Ok(self)
    }

    /// Density for an ingredient, if known.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(&normalize_name(name)).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DensityTable {
    fn default() -> Self {
        Self::builtin()
    }
}
