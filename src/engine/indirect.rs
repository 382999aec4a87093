//! Indirect cost derivation
//!
//! Profit, safety levy and incidental levy are each a percentage of the same
//! direct cost base. They are never compounded on each other.

use serde::Serialize;

use crate::models::lenient::finite_or_zero;
use crate::models::Money;

/// Safety levy, percent of direct cost
pub const SAFETY_PERCENT: f64 = 0.7;

/// Incidental levy, percent of direct cost
pub const INCIDENTAL_PERCENT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IndirectCosts {
    pub profit: Money,
    pub safety: Money,
    pub incidental: Money,
    /// `profit + safety + incidental`
    pub total: Money,
}

/// Derive indirect costs from the direct cost
pub fn compute_indirect(direct_cost: Money, profit_percent: f64) -> IndirectCosts {
    let profit = direct_cost.percent(finite_or_zero(profit_percent));
    let safety = direct_cost.percent(SAFETY_PERCENT);
    let incidental = direct_cost.percent(INCIDENTAL_PERCENT);

    IndirectCosts {
        profit,
        safety,
        incidental,
        total: profit + safety + incidental,
    }
}
