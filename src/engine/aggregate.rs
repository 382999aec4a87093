//! Line item cost aggregation
//!
//! Reduces a project's line items into per-category material/labor/expense
//! sums and the total direct cost. All arithmetic is on minor units, so the
//! category totals add up to the direct cost exactly.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Category, LineItem, Money};

/// Cost sums for one trade category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryCost {
    pub material: Money,
    pub labor: Money,
    pub expense: Money,
    /// `material + labor + expense`
    pub total: Money,
    pub item_count: usize,
}

impl CategoryCost {
    fn add_item(&mut self, item: &LineItem) {
        let material = item.material_total();
        let labor = item.labor_total();
        let expense = item.expense_total();

        self.material += material;
        self.labor += labor;
        self.expense += expense;
        self.total += material + labor + expense;
        self.item_count += 1;
    }
}

/// Direct cost of an estimate, broken down by category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CostBreakdown {
    /// Only categories with at least one item are present
    pub per_category: BTreeMap<Category, CategoryCost>,
    pub direct_cost: Money,
    /// Pre-markup cost subtotal, later used as the estimated cost
    pub direct_cost_basis: Money,
}

impl CostBreakdown {
    /// Total for a category, zero when the category has no items
    pub fn category_total(&self, category: Category) -> Money {
        self.per_category
            .get(&category)
            .map(|c| c.total)
            .unwrap_or_default()
    }

    pub fn material_total(&self) -> Money {
        self.per_category.values().map(|c| c.material).sum()
    }

    pub fn labor_total(&self) -> Money {
        self.per_category.values().map(|c| c.labor).sum()
    }

    pub fn expense_total(&self) -> Money {
        self.per_category.values().map(|c| c.expense).sum()
    }
}

/// Aggregate line items into per-category sums and the direct cost
pub fn aggregate_line_items(items: &[LineItem]) -> CostBreakdown {
    let mut per_category: BTreeMap<Category, CategoryCost> = BTreeMap::new();

    for item in items {
        per_category.entry(item.category).or_default().add_item(item);
    }

    let direct_cost: Money = per_category.values().map(|c| c.total).sum();

    CostBreakdown {
        per_category,
        direct_cost,
        direct_cost_basis: direct_cost,
    }
}
