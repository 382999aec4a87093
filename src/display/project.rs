//! Project display formatting

use crate::config::Settings;
use crate::models::{Project, RoundingPolicy};
use crate::services::ProjectAnalysis;

/// Table of projects with contract total and actual margin
pub fn format_project_list(analyses: &[ProjectAnalysis], settings: &Settings) -> String {
    if analyses.is_empty() {
        return "No projects found.".to_string();
    }

    let name_width = analyses
        .iter()
        .map(|a| a.project.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let client_width = analyses
        .iter()
        .map(|a| a.project.client.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<client_width$}  {:<11}  {:>5}  {:>14}  {:>8}\n",
        "ID",
        "Name",
        "Client",
        "Status",
        "Items",
        "Contract",
        "Margin",
        name_width = name_width,
        client_width = client_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<client_width$}  {:-<11}  {:->5}  {:->14}  {:->8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        client_width = client_width,
    ));

    for a in analyses {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<client_width$}  {:<11}  {:>5}  {:>14}  {:>7.1}%\n",
            a.project.id,
            a.project.name,
            a.project.client,
            a.project.status,
            a.project.line_items.len(),
            settings.money(a.summary.contract_total),
            a.summary.actual_margin_percent,
            name_width = name_width,
            client_width = client_width,
        ));
    }

    output
}

/// Header block, line items and payment schedule of one project
pub fn format_project_details(analysis: &ProjectAnalysis, settings: &Settings) -> String {
    let project = &analysis.project;
    let mut output = String::new();

    output.push_str(&format!("Project: {}\n", project.name));
    output.push_str(&format!("  ID:        {}\n", project.id));
    if !project.client.is_empty() {
        output.push_str(&format!("  Client:    {}\n", project.client));
    }
    output.push_str(&format!("  Status:    {}\n", project.status));
    output.push_str(&format!("  Profit:    {}%\n", project.profit_percent));
    output.push_str(&format!("  Rounding:  {}", project.rounding_policy));
    if project.rounding_policy == RoundingPolicy::Manual {
        if let Some(total) = project.manual_total {
            output.push_str(&format!(" ({})", settings.money(total)));
        }
    }
    output.push('\n');
    output.push_str(&format!("  Contract:  {}\n", settings.money(analysis.summary.contract_total)));
    output.push_str(&format!(
        "  Margin:    {:.1}% estimated, {:.1}% actual\n",
        analysis.summary.estimated_margin_percent, analysis.summary.actual_margin_percent
    ));
    output.push_str(&format!(
        "  Created:   {} {}\n",
        settings.date(project.created_at.date_naive()),
        project.created_at.format("%H:%M")
    ));

    output.push_str("\nLine items\n");
    output.push_str(&format_line_items(project, settings));

    output.push_str("\nPayment schedule\n");
    if project.payment_schedule.is_empty() {
        output.push_str("  (none)\n");
    }
    for payment in &project.payment_schedule {
        let due = payment
            .due_date
            .map(|d| format!(" due {}", settings.date(d)))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {}  {:<16} {:>5.1}%  {:>14}{}{}\n",
            payment.id,
            payment.label,
            payment.percent_of_total,
            settings.money(payment.amount_of(analysis.summary.contract_total)),
            due,
            if payment.paid { "  [paid]" } else { "" }
        ));
    }

    if !analysis.risks.is_empty() {
        output.push_str(&format!("\n{} risk(s); see `sitebid report risks`\n", analysis.risks.len()));
    }

    output
}

/// Line items of a project, in insertion order
pub fn format_line_items(project: &Project, settings: &Settings) -> String {
    if project.line_items.is_empty() {
        return "  (none)\n".to_string();
    }

    let mut output = format!(
        "  {:<12}  {:<16}  {:<24}  {:>8}  {:<4}  {:>14}\n",
        "ID", "Category", "Description", "Qty", "Unit", "Total"
    );
    for item in &project.line_items {
        output.push_str(&format!(
            "  {:<12}  {:<16}  {:<24}  {:>8}  {:<4}  {:>14}\n",
            item.id,
            item.category,
            item.description,
            item.quantity,
            item.unit,
            settings.money(item.line_total())
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_estimate, compute_financial_summary};
    use crate::models::{Category, LineItem, Money, PaymentScheduleEntry};
    use chrono::NaiveDate;
    use crate::services::ProjectRecords;

    fn analysis(project: Project) -> ProjectAnalysis {
        ProjectAnalysis {
            estimate: compute_estimate(&project),
            summary: compute_financial_summary(&project, &[], &[], &[]),
            risks: Vec::new(),
            records: ProjectRecords::default(),
            project,
        }
    }

    fn project() -> Project {
        Project::new("Display house")
            .with_client("Ms. Han")
            .with_line_item(
                LineItem::new(Category::Flooring, "Oak")
                    .with_quantity(10.0)
                    .with_unit("m2")
                    .with_prices(Money::from_major(5_000), Money::from_major(3_000), Money::zero()),
            )
            .with_payment(PaymentScheduleEntry::new("Deposit", 30.0))
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_project_list(&[], &Settings::default()), "No projects found.");
    }

    #[test]
    fn test_list_shows_contract() {
        let text = format_project_list(&[analysis(project())], &Settings::default());
        assert!(text.contains("Display house"));
        assert!(text.contains("Ms. Han"));
        assert!(text.contains("₩90,000"));
    }

    #[test]
    fn test_details() {
        let text = format_project_details(&analysis(project()), &Settings::default());
        assert!(text.contains("Project: Display house"));
        assert!(text.contains("Flooring"));
        assert!(text.contains("₩80,000"));
        assert!(text.contains("Deposit"));
        assert!(text.contains("₩27,000"));
    }

    #[test]
    fn test_details_follow_settings() {
        let due = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let project = Project::new("Dated").with_payment(
            PaymentScheduleEntry::new("Balance", 100.0).with_due_date(due),
        );
        let settings = Settings {
            currency_symbol: "$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            ..Settings::default()
        };

        let text = format_project_details(&analysis(project), &settings);
        assert!(text.contains("Contract:  $0"));
        assert!(text.contains("due 02/04/2025"));
        assert!(!text.contains("₩"));
    }

    #[test]
    fn test_no_line_items() {
        assert_eq!(
            format_line_items(&Project::new("Bare"), &Settings::default()),
            "  (none)\n"
        );
    }
}
