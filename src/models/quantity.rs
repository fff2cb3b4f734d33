//! Measurement units and quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conversion::{normalize_name, normalize_unit};

/// A measurement unit.
///
/// Recognised spellings map to the canonical variants. Anything else is
/// kept as an opaque token in [`Unit::Other`]; such units are count-like
/// and only ever compared for exact equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Grams.
    G,
    /// Kilograms.
    Kg,
    /// Milligrams.
    Mg,
    /// Millilitres.
    Ml,
    /// Litres.
    L,
    /// Cup (240 ml).
    Cup,
    /// Tablespoon (15 ml).
    Tablespoon,
    /// Teaspoon (5 ml).
    Teaspoon,
    /// Whole items.
    #[default]
    Count,
    /// Unrecognised unit token (already cleaned).
    Other(String),
}

impl Unit {
    /// Canonical spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Mg => "mg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Count => "count",
            Unit::Other(token) => token.as_str(),
        }
    }

    /// Whether this is a pure mass unit.
    pub fn is_mass(&self) -> bool {
        matches!(self, Unit::G | Unit::Kg | Unit::Mg)
    }

    /// Whether this is a volume unit (needs a density to become mass).
    pub fn is_volume(&self) -> bool {
        matches!(
            self,
            Unit::Ml | Unit::L | Unit::Cup | Unit::Tablespoon | Unit::Teaspoon
        )
    }

    /// Parses any spelling through the synonym table. Never fails.
    pub fn parse(raw: &str) -> Self {
        normalize_unit(raw)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        normalize_unit(&raw)
    }
}

impl From<&str> for Unit {
    fn from(raw: &str) -> Self {
        normalize_unit(raw)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

/// An amount of a named ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Ingredient name as entered (lower-cased by the text parser).
    pub name: String,
    /// Amount, in `unit`.
    pub qty: f64,
    /// Measurement unit.
    #[serde(default)]
    pub unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    pub fn new(name: impl Into<String>, qty: f64, unit: impl Into<Unit>) -> Self {
        Self {
            name: name.into(),
            qty,
            unit: unit.into(),
        }
    }

    /// Identity key used to match ingredients against stock.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Whether this refers to the same ingredient as `other`.
    pub fn same_ingredient(&self, other: &Quantity) -> bool {
        self.key() == other.key()
    }

    /// Returns a copy with the amount multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            qty: self.qty * factor,
            ..self.clone()
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.qty, self.unit, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_serde_uses_canonical_spelling() {
        let q = Quantity::new("farinha", 2.0, "xícara");
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"unit\":\"cup\""));

        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unit, Unit::Cup);
    }

    #[test]
    fn test_unit_defaults_to_count() {
        let q: Quantity = serde_json::from_str(r#"{"name":"ovo","qty":6}"#).unwrap();
        assert_eq!(q.unit, Unit::Count);
    }

    #[test]
    fn test_unit_classes() {
        assert!(Unit::Kg.is_mass());
        assert!(Unit::Cup.is_volume());
        assert!(!Unit::Count.is_mass());
        assert!(!Unit::Other("lat".into()).is_volume());
    }

    #[test]
    fn test_same_ingredient_ignores_case_and_accents() {
        let a = Quantity::new("Feijão", 1.0, Unit::Kg);
        let b = Quantity::new("feijao", 500.0, Unit::G);
        assert!(a.same_ingredient(&b));
    }

    #[test]
    fn test_scaled() {
        let q = Quantity::new("arroz", 0.5, Unit::Kg).scaled(3.0);
        assert!((q.qty - 1.5).abs() < 1e-12);
        assert_eq!(q.unit, Unit::Kg);
    }
}
