//! Pantry stock model.

use serde::{Deserialize, Serialize};

use super::{Quantity, Unit};

/// A pantry entry.
///
/// `qty` never goes negative: consumption clamps at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Stored quantity.
    #[serde(flatten)]
    pub quantity: Quantity,
    /// Product barcode, when the item was scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Shelf category (e.g. "grãos", "laticínios").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl StockItem {
    /// Creates a stock entry. Negative amounts are stored as zero.
    pub fn new(name: impl Into<String>, qty: f64, unit: impl Into<Unit>) -> Self {
        Self::from_quantity(Quantity::new(name, qty, unit))
    }

    /// Wraps a parsed quantity.
    pub fn from_quantity(mut quantity: Quantity) -> Self {
        quantity.qty = quantity.qty.max(0.0);
        Self {
            quantity,
            barcode: None,
            category: None,
        }
    }

    /// Sets the barcode.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.quantity.name
    }

    pub fn qty(&self) -> f64 {
        self.quantity.qty
    }

    pub fn unit(&self) -> &Unit {
        &self.quantity.unit
    }

    /// Normalized ingredient key.
    pub fn key(&self) -> String {
        self.quantity.key()
    }

    /// Replaces the amount, clamping at zero.
    pub fn set_qty(&mut self, qty: f64) {
        self.quantity.qty = if qty.is_finite() { qty.max(0.0) } else { 0.0 };
    }

    /// Whether nothing is left.
    pub fn is_depleted(&self) -> bool {
        self.quantity.qty <= 0.0
    }
}

impl From<Quantity> for StockItem {
    fn from(quantity: Quantity) -> Self {
        Self::from_quantity(quantity)
    }
}
