//! Estimate line items
//!
//! A line item is one priced row of an estimate: a quantity of some work in a
//! trade category, with separate material, labor and expense unit prices.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::LineItemId;
use super::lenient;
use super::money::Money;

/// One priced row of a project estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,

    pub category: Category,

    #[serde(default)]
    pub description: String,

    /// Unit of measure ("m2", "ea", "set", ...)
    #[serde(default)]
    pub unit: String,

    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,

    #[serde(default)]
    pub material_unit_price: Money,

    #[serde(default)]
    pub labor_unit_price: Money,

    #[serde(default)]
    pub expense_unit_price: Money,
}

impl LineItem {
    /// Create a new line item with zero quantity and prices
    pub fn new(category: Category, description: impl Into<String>) -> Self {
        Self {
            id: LineItemId::new(),
            category,
            description: description.into(),
            unit: String::new(),
            quantity: 0.0,
            material_unit_price: Money::zero(),
            labor_unit_price: Money::zero(),
            expense_unit_price: Money::zero(),
        }
    }

    /// Set the quantity; non-finite values become 0
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = lenient::finite_or_zero(quantity);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_prices(mut self, material: Money, labor: Money, expense: Money) -> Self {
        self.material_unit_price = material;
        self.labor_unit_price = labor;
        self.expense_unit_price = expense;
        self
    }

    pub fn material_total(&self) -> Money {
        self.material_unit_price.scale(self.quantity)
    }

    pub fn labor_total(&self) -> Money {
        self.labor_unit_price.scale(self.quantity)
    }

    pub fn expense_total(&self) -> Money {
        self.expense_unit_price.scale(self.quantity)
    }

    /// `quantity × (material + labor + expense)`, as the exact sum of the
    /// three rounded component totals
    pub fn line_total(&self) -> Money {
        self.material_total() + self.labor_total() + self.expense_total()
    }
}
