//! Estimating and financial rollup engine
//!
//! Pure functions over in-memory inputs: no I/O, no shared state, and the same
//! inputs always give the same output. Nothing here returns an error. Bad
//! numbers are coerced to zero when records are loaded, and every ratio with
//! a zero denominator is 0.
//!
//! Data flows one way:
//!
//! ```text
//! line items -> aggregate -> indirect -> rounding -> contract total
//!                                                         |
//!            orders, labor, expenses -> actual ------> summary -> risk
//!                                  payment schedule ------^
//! ```

pub mod actual;
pub mod aggregate;
pub mod estimate;
pub mod indirect;
pub mod risk;
pub mod rounding;
pub mod summary;

pub use actual::{aggregate_actual_costs, ActualCosts};
pub use aggregate::{aggregate_line_items, CategoryCost, CostBreakdown};
pub use estimate::{compute_estimate, Estimate};
pub use indirect::{compute_indirect, IndirectCosts, INCIDENTAL_PERCENT, SAFETY_PERCENT};
pub use risk::{detect_risks_with, RiskEntry, RiskKind, RiskLevel, RiskThresholds};
pub use rounding::{apply_rounding, RoundingOutcome};
pub use summary::{build_summary, collected_amount, FinancialSummary};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Expense, LaborRecord, Money, Order, Project};

/// `numerator / denominator × 100`, or 0 when the denominator is zero
pub fn percent_of(numerator: Money, denominator: Money) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    let value = numerator.minor() as f64 * 100.0 / denominator.minor() as f64;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Estimate, actual cost and collections for one project
pub fn compute_financial_summary(
    project: &Project,
    orders: &[Order],
    labor: &[LaborRecord],
    expenses: &[Expense],
) -> FinancialSummary {
    let estimate = compute_estimate(project);
    let actual = aggregate_actual_costs(project.id, orders, labor, expenses);
    let summary = build_summary(&estimate, &actual, &project.payment_schedule);

    debug!(
        project = %project.id,
        contract_total = summary.contract_total.minor(),
        actual_cost = summary.actual_cost.total.minor(),
        execution_rate = summary.execution_rate_percent,
        "computed financial summary"
    );

    summary
}

/// Actual margin percentage alone, as shown in project lists
pub fn compute_margin_percent(
    project: &Project,
    orders: &[Order],
    labor: &[LaborRecord],
    expenses: &[Expense],
) -> f64 {
    compute_financial_summary(project, orders, labor, expenses).actual_margin_percent
}

/// Risks for one project with the default thresholds
pub fn detect_risks(
    project: &Project,
    orders: &[Order],
    labor: &[LaborRecord],
    expenses: &[Expense],
    today: NaiveDate,
) -> Vec<RiskEntry> {
    let summary = compute_financial_summary(project, orders, labor, expenses);
    let risks = detect_risks_with(project, &summary, today, &RiskThresholds::default());
    debug!(project = %project.id, count = risks.len(), "detected risks");
    risks
}
