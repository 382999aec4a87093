//! Financial summary: estimate vs. actual cost vs. collections
//!
//! Every rate guards its denominator. A zero contract total or zero
//! estimated cost makes the dependent rates exactly 0.0, never NaN.

use serde::Serialize;

use super::actual::ActualCosts;
use super::estimate::Estimate;
use super::percent_of;
use crate::models::{Money, PaymentScheduleEntry};

/// Derived, never-persisted view of a project's finances
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FinancialSummary {
    pub contract_total: Money,
    pub estimated_cost: Money,
    pub estimated_profit: Money,
    pub estimated_margin_percent: f64,

    pub actual_cost: ActualCosts,
    pub execution_rate_percent: f64,
    pub actual_profit: Money,
    pub actual_margin_percent: f64,

    pub collected: Money,
    pub collection_rate_percent: f64,
    pub outstanding: Money,
}

impl FinancialSummary {
    pub fn total_actual_cost(&self) -> Money {
        self.actual_cost.total
    }
}

/// Sum of paid installments, each taken as a share of the contract total
pub fn collected_amount(contract_total: Money, schedule: &[PaymentScheduleEntry]) -> Money {
    schedule
        .iter()
        .filter(|p| p.paid)
        .map(|p| p.amount_of(contract_total))
        .sum()
}

/// Combine an estimate, actual costs and the payment schedule
pub fn build_summary(
    estimate: &Estimate,
    actual: &ActualCosts,
    schedule: &[PaymentScheduleEntry],
) -> FinancialSummary {
    let contract_total = estimate.final_total;
    let estimated_cost = estimate.estimated_cost_basis;

    let estimated_profit = contract_total - estimated_cost;
    let actual_profit = contract_total - actual.total;
    let collected = collected_amount(contract_total, schedule);

    FinancialSummary {
        contract_total,
        estimated_cost,
        estimated_profit,
        estimated_margin_percent: percent_of(estimated_profit, contract_total),
        actual_cost: *actual,
        execution_rate_percent: percent_of(actual.total, estimated_cost),
        actual_profit,
        actual_margin_percent: percent_of(actual_profit, contract_total),
        collected,
        collection_rate_percent: percent_of(collected, contract_total),
        outstanding: contract_total - collected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn estimate(final_total: i64, cost_basis: i64) -> Estimate {
        Estimate {
            per_category: BTreeMap::new(),
            direct_cost: Money::from_major(cost_basis),
            indirect: Default::default(),
            raw_total: Money::from_major(final_total),
            adjustment: Money::zero(),
            final_total: Money::from_major(final_total),
            estimated_cost_basis: Money::from_major(cost_basis),
        }
    }

    fn actual(orders: i64, labor: i64, expenses: i64) -> ActualCosts {
        ActualCosts {
            order_cost: Money::from_major(orders),
            labor_cost: Money::from_major(labor),
            expense_cost: Money::from_major(expenses),
            total: Money::from_major(orders + labor + expenses),
        }
    }

    #[test]
    fn test_collection() {
        let mut deposit = PaymentScheduleEntry::new("Deposit", 30.0);
        deposit.paid = true;
        let balance = PaymentScheduleEntry::new("Balance", 70.0);

        let summary = build_summary(&estimate(90_000, 80_000), &actual(0, 0, 0), &[deposit, balance]);
        assert_eq!(summary.collected, Money::from_major(27_000));
        assert_eq!(summary.collection_rate_percent, 30.0);
        assert_eq!(summary.outstanding, Money::from_major(63_000));
    }

    #[test]
    fn test_execution_and_margins() {
        let summary = build_summary(&estimate(90_000, 80_000), &actual(50_000, 40_000, 0), &[]);

        assert_eq!(summary.total_actual_cost(), Money::from_major(90_000));
        assert_eq!(summary.execution_rate_percent, 112.5);
        assert_eq!(summary.estimated_profit, Money::from_major(10_000));
        assert!((summary.estimated_margin_percent - 11.111_111).abs() < 1e-5);
        assert_eq!(summary.actual_profit, Money::zero());
        assert_eq!(summary.actual_margin_percent, 0.0);
    }

    #[test]
    fn test_zero_denominators() {
        let summary = build_summary(&estimate(0, 0), &actual(1_000, 0, 0), &[]);

        assert_eq!(summary.estimated_margin_percent, 0.0);
        assert_eq!(summary.execution_rate_percent, 0.0);
        assert_eq!(summary.actual_margin_percent, 0.0);
        assert_eq!(summary.collection_rate_percent, 0.0);
        assert_eq!(summary.actual_profit, Money::from_major(-1_000));
        assert!(summary.execution_rate_percent.is_finite());
    }

    #[test]
    fn test_unpaid_entries_are_not_collected() {
        let schedule = vec![
            PaymentScheduleEntry::new("Deposit", 30.0),
            PaymentScheduleEntry::new("Balance", 70.0),
        ];
        assert_eq!(collected_amount(Money::from_major(90_000), &schedule), Money::zero());
    }

    #[test]
    fn test_negative_margin() {
        let summary = build_summary(&estimate(100_000, 80_000), &actual(90_000, 20_000, 0), &[]);
        assert_eq!(summary.actual_profit, Money::from_major(-10_000));
        assert_eq!(summary.actual_margin_percent, -10.0);
    }
}
