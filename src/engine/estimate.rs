//! Full estimate: direct cost, indirect cost, rounding

use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::{aggregate_line_items, CategoryCost, CostBreakdown};
use super::indirect::{compute_indirect, IndirectCosts};
use super::rounding::{apply_rounding, RoundingOutcome};
use crate::models::{Category, Money, Project};

/// Result of pricing a project's estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub per_category: BTreeMap<Category, CategoryCost>,
    pub direct_cost: Money,
    pub indirect: IndirectCosts,
    /// `direct_cost + indirect.total`
    pub raw_total: Money,
    pub adjustment: Money,
    /// The contract amount
    pub final_total: Money,
    pub estimated_cost_basis: Money,
}

impl Estimate {
    fn assemble(breakdown: CostBreakdown, indirect: IndirectCosts, rounding: RoundingOutcome) -> Self {
        Self {
            per_category: breakdown.per_category,
            direct_cost: breakdown.direct_cost,
            raw_total: breakdown.direct_cost + indirect.total,
            indirect,
            adjustment: rounding.adjustment,
            final_total: rounding.final_total,
            estimated_cost_basis: breakdown.direct_cost_basis,
        }
    }

    pub fn category_total(&self, category: Category) -> Money {
        self.per_category
            .get(&category)
            .map(|c| c.total)
            .unwrap_or_default()
    }
}

/// Price a project's estimate from its line items and pricing parameters
pub fn compute_estimate(project: &Project) -> Estimate {
    let breakdown = aggregate_line_items(&project.line_items);
    let indirect = compute_indirect(breakdown.direct_cost, project.profit_percent);
    let raw_total = breakdown.direct_cost + indirect.total;
    let rounding = apply_rounding(raw_total, project.rounding_policy, project.manual_total);

    Estimate::assemble(breakdown, indirect, rounding)
}
