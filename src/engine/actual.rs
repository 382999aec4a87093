//! Actual execution cost rollup
//!
//! Sums orders, labor and approved expenses recorded against one project.
//! Records belonging to other projects are skipped, and so are expenses that
//! are not approved.

use serde::Serialize;

use crate::models::{CostRecord, Expense, LaborRecord, Money, Order, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActualCosts {
    pub order_cost: Money,
    pub labor_cost: Money,
    pub expense_cost: Money,
    /// `order_cost + labor_cost + expense_cost`
    pub total: Money,
}

fn sum_for<R: CostRecord>(project_id: ProjectId, records: &[R]) -> Money {
    records
        .iter()
        .filter(|r| r.project_id() == project_id)
        .map(CostRecord::amount)
        .sum()
}

/// Roll up the actual costs of one project
pub fn aggregate_actual_costs(
    project_id: ProjectId,
    orders: &[Order],
    labor: &[LaborRecord],
    expenses: &[Expense],
) -> ActualCosts {
    let order_cost = sum_for(project_id, orders);
    let labor_cost = sum_for(project_id, labor);
    let expense_cost: Money = expenses
        .iter()
        .filter(|e| e.project_id == project_id && e.is_approved())
        .map(|e| e.amount)
        .sum();

    ActualCosts {
        order_cost,
        labor_cost,
        expense_cost,
        total: order_cost + labor_cost + expense_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseStatus;

    #[test]
    fn test_sums_per_kind() {
        let project = ProjectId::new();
        let orders = vec![
            Order::new(project, "Lumber Co", Money::from_major(30_000)),
            Order::new(project, "Tile Depot", Money::from_major(20_000)),
        ];
        let labor = vec![LaborRecord::new(project, "Park", Money::from_major(20_000), 2.0)];

        let actual = aggregate_actual_costs(project, &orders, &labor, &[]);
        assert_eq!(actual.order_cost, Money::from_major(50_000));
        assert_eq!(actual.labor_cost, Money::from_major(40_000));
        assert_eq!(actual.expense_cost, Money::zero());
        assert_eq!(actual.total, Money::from_major(90_000));
    }

    #[test]
    fn test_other_projects_are_ignored() {
        let mine = ProjectId::new();
        let other = ProjectId::new();
        let orders = vec![
            Order::new(mine, "A", Money::from_major(1_000)),
            Order::new(other, "B", Money::from_major(9_000)),
        ];
        let labor = vec![LaborRecord::new(other, "Lee", Money::from_major(100_000), 1.0)];
        let expenses = vec![
            Expense::new(other, "Fuel", Money::from_major(5_000)).with_status(ExpenseStatus::Approved),
        ];

        let actual = aggregate_actual_costs(mine, &orders, &labor, &expenses);
        assert_eq!(actual.total, Money::from_major(1_000));
    }

    #[test]
    fn test_only_approved_expenses_count() {
        let project = ProjectId::new();
        let expenses = vec![
            Expense::new(project, "Parking", Money::from_major(7_000)).with_status(ExpenseStatus::Approved),
            Expense::new(project, "Dinner", Money::from_major(50_000)),
            Expense::new(project, "Tools", Money::from_major(80_000)).with_status(ExpenseStatus::Rejected),
        ];

        let actual = aggregate_actual_costs(project, &[], &[], &expenses);
        assert_eq!(actual.expense_cost, Money::from_major(7_000));
        assert_eq!(actual.total, Money::from_major(7_000));
    }

    #[test]
    fn test_empty_inputs() {
        let actual = aggregate_actual_costs(ProjectId::new(), &[], &[], &[]);
        assert_eq!(actual, ActualCosts::default());
    }
}
