//! Unit normalization and mass conversion.
//!
//! Reconciles heterogeneous measurement units so that stock and recipe
//! quantities can be compared. Mass units always convert to grams.
//! Volume units convert only when the ingredient has a known density.
//! Everything else (counts, containers, unknown tokens) is
//! unconvertible and must be compared by exact unit instead.
//!
//! # Conversion factors
//!
//! | Unit | Factor |
//! |------|--------|
//! | kg | 1000 g |
//! | mg | 0.001 g |
//! | l | 1000 ml |
//! | cup | 240 ml |
//! | tablespoon | 15 ml |
//! | teaspoon | 5 ml |

mod density;

pub use density::DensityTable;

use std::sync::Arc;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Unit;

pub const KG_TO_G: f64 = 1000.0;
pub const G_TO_MG: f64 = 1000.0;
pub const L_TO_ML: f64 = 1000.0;
pub const CUP_ML: f64 = 240.0;
pub const TABLESPOON_ML: f64 = 15.0;
pub const TEASPOON_ML: f64 = 5.0;

/// Case-folds, strips accents and collapses whitespace.
///
/// This is the identity key for ingredients across the crate.
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a unit spelling through the synonym table.
///
/// Case-folds, strips accents, turns whitespace runs into `_` and drops
/// `.` and `,`. Unknown tokens come back as [`Unit::Other`]; an empty
/// spelling means [`Unit::Count`].
pub fn normalize_unit(raw: &str) -> Unit {
    let cleaned: String = normalize_name(raw)
        .replace(' ', "_")
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();

    match cleaned.as_str() {
        "" => Unit::Count,
        "g" | "gr" | "gram" | "grams" | "grama" | "gramas" => Unit::G,
        "kg" | "kilo" | "kilos" | "quilo" | "quilos" | "kilograma" | "quilograma" => Unit::Kg,
        "mg" | "miligrama" | "miligramas" => Unit::Mg,
        "ml" | "mililitro" | "mililitros" => Unit::Ml,
        "l" | "lt" | "litro" | "litros" => Unit::L,
        "cup" | "cups" | "xic" | "xicara" | "xicaras" => Unit::Cup,
        "tablespoon" | "tbsp" | "cs" | "colher_de_sopa" | "colher_sopa" => Unit::Tablespoon,
        "teaspoon" | "tsp" | "ch" | "colher_cha" | "colher_de_cha" => Unit::Teaspoon,
        "count" | "un" | "unidade" | "unidades" => Unit::Count,
        "caixa" => Unit::Other("cx".to_string()),
        _ => Unit::Other(cleaned),
    }
}

/// Millilitres per unit for volume units.
fn ml_per_unit(unit: &Unit) -> Option<f64> {
    if !unit.is_volume() {
        return None;
    }
    match unit {
        Unit::Ml => Some(1.0),
        Unit::L => Some(L_TO_ML),
        Unit::Cup => Some(CUP_ML),
        Unit::Tablespoon => Some(TABLESPOON_ML),
        Unit::Teaspoon => Some(TEASPOON_ML),
        _ => None,
    }
}

/// Converts quantities to and from grams using a density table.
///
/// Cloning is cheap: the table is shared.
///
/// # Example
///
/// ```
/// use u_mealplan::conversion::UnitConverter;
/// use u_mealplan::models::Unit;
///
/// let conv = UnitConverter::new();
/// assert_eq!(conv.to_grams(2.0, &Unit::Kg, "arroz"), Some(2000.0));
/// assert_eq!(conv.to_grams(1.0, &Unit::L, "leite"), Some(1000.0));
/// assert_eq!(conv.to_grams(1.0, &Unit::Cup, "chocolate"), None);
/// assert_eq!(conv.to_grams(3.0, &Unit::Count, "ovo"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    densities: Arc<DensityTable>,
}

impl UnitConverter {
    /// Creates a converter over the built-in density table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter over a custom density table.
    pub fn with_densities(densities: DensityTable) -> Self {
        Self {
            densities: Arc::new(densities),
        }
    }

    /// The density table in use.
    pub fn densities(&self) -> &DensityTable {
        &self.densities
    }

    /// Converts a quantity to grams.
    ///
    /// Returns `None` when the unit is not mass or volume, or when it is
    /// a volume and the ingredient has no density entry.
    pub fn to_grams(&self, qty: f64, unit: &Unit, ingredient: &str) -> Option<f64> {
        if unit.is_mass() {
            return Some(match unit {
                Unit::Kg => qty * KG_TO_G,
                Unit::Mg => qty / G_TO_MG,
                _ => qty,
            });
        }
        let ml = qty * ml_per_unit(unit)?;
        let density = self.densities.get(ingredient)?;
        Some(ml * density)
    }

    /// Re-expresses grams in `unit`. Inverse of [`to_grams`](Self::to_grams).
    pub fn from_grams(&self, grams: f64, unit: &Unit, ingredient: &str) -> Option<f64> {
        if unit.is_mass() {
            return Some(match unit {
                Unit::Kg => grams / KG_TO_G,
                Unit::Mg => grams * G_TO_MG,
                _ => grams,
            });
        }
        let per_unit = ml_per_unit(unit)?;
        let density = self.densities.get(ingredient)?;
        Some(grams / density / per_unit)
    }
}
