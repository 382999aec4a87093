//! Cost record display formatting

use crate::config::Settings;
use crate::models::Money;
use crate::services::ProjectRecords;

/// Orders, labor and expenses of one project, each with a subtotal
pub fn format_cost_records(records: &ProjectRecords, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Orders\n");
    if records.orders.is_empty() {
        output.push_str("  (none)\n");
    }
    for order in &records.orders {
        let date = order.ordered_on.map(|d| settings.date(d)).unwrap_or_default();
        output.push_str(&format!(
            "  {:<12}  {:<10}  {:<20}  {:<24}  {:>14}\n",
            order.id,
            date,
            order.vendor,
            order.description,
            settings.money(order.amount)
        ));
    }
    let orders: Money = records.orders.iter().map(|o| o.amount).sum();
    output.push_str(&format!("  {:<92}{:>14}\n", "Subtotal", settings.money(orders)));

    output.push_str("\nLabor\n");
    if records.labor.is_empty() {
        output.push_str("  (none)\n");
    }
    for record in &records.labor {
        let date = record.work_date.map(|d| settings.date(d)).unwrap_or_default();
        output.push_str(&format!(
            "  {:<12}  {:<10}  {:<20}  {:>8} x {:>12}  {:>14}\n",
            record.id,
            date,
            record.worker,
            record.days,
            settings.money(record.daily_rate),
            settings.money(record.total())
        ));
    }
    let labor: Money = records.labor.iter().map(|l| l.total()).sum();
    output.push_str(&format!("  {:<92}{:>14}\n", "Subtotal", settings.money(labor)));

    output.push_str("\nExpenses\n");
    if records.expenses.is_empty() {
        output.push_str("  (none)\n");
    }
    for expense in &records.expenses {
        let date = expense.spent_on.map(|d| settings.date(d)).unwrap_or_default();
        output.push_str(&format!(
            "  {:<12}  {:<10}  {:<9}  {:<35}  {:>14}\n",
            expense.id,
            date,
            expense.status,
            expense.description,
            settings.money(expense.amount)
        ));
    }
    let approved: Money = records
        .expenses
        .iter()
        .filter(|e| e.is_approved())
        .map(|e| e.amount)
        .sum();
    output.push_str(&format!("  {:<92}{:>14}\n", "Approved subtotal", settings.money(approved)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseStatus, LaborRecord, Order, ProjectId};
    use chrono::NaiveDate;

    #[test]
    fn test_subtotals() {
        let project = ProjectId::new();
        let records = ProjectRecords {
            orders: vec![Order::new(project, "Floor Mart", Money::from_major(50_000))],
            labor: vec![LaborRecord::new(project, "Choi", Money::from_major(20_000), 2.0)],
            expenses: vec![
                Expense::new(project, "Snacks", Money::from_major(3_000)),
                Expense::new(project, "Parking", Money::from_major(1_000))
                    .with_status(ExpenseStatus::Approved),
            ],
        };

        let text = format_cost_records(&records, &Settings::default());
        assert!(text.contains("Floor Mart"));
        assert!(text.contains("₩40,000"));
        assert!(text.contains("Pending"));
        assert!(text.contains("Approved subtotal"));
    }

    #[test]
    fn test_dates_and_amounts_follow_settings() {
        let project = ProjectId::new();
        let mut order = Order::new(project, "Floor Mart", Money::from_major(500));
        order.ordered_on = NaiveDate::from_ymd_opt(2025, 3, 14);
        let records = ProjectRecords {
            orders: vec![order],
            ..Default::default()
        };
        let settings = Settings {
            currency_symbol: "$".to_string(),
            date_format: "%m/%d/%Y".to_string(),
            ..Settings::default()
        };

        let text = format_cost_records(&records, &settings);
        assert!(text.contains("03/14/2025"));
        assert!(text.contains("$500"));
    }

    #[test]
    fn test_empty_sections() {
        let text = format_cost_records(&ProjectRecords::default(), &Settings::default());
        assert_eq!(text.matches("(none)").count(), 3);
    }
}
