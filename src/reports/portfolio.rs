//! Portfolio report
//!
//! One line per project: contract, actual cost, margin and risk counts.

use std::io::Write;

use crate::config::Settings;
use crate::error::SiteBidResult;
use crate::models::{Money, ProjectId, ProjectStatus};
use crate::services::ProjectAnalysis;

use super::{csv_amount, csv_percent};

#[derive(Debug, Clone)]
pub struct PortfolioRow {
    pub project_id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub contract_total: Money,
    pub actual_cost: Money,
    pub actual_margin_percent: f64,
    pub collection_rate_percent: f64,
    pub risk_count: usize,
    pub high_risk_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioReport {
    pub rows: Vec<PortfolioRow>,
    pub total_contract: Money,
    pub total_actual_cost: Money,
    pub total_collected: Money,
}

impl PortfolioReport {
    pub fn generate(analyses: &[ProjectAnalysis]) -> Self {
        let rows = analyses
            .iter()
            .map(|a| PortfolioRow {
                project_id: a.project.id,
                name: a.project.name.clone(),
                status: a.project.status,
                contract_total: a.summary.contract_total,
                actual_cost: a.summary.total_actual_cost(),
                actual_margin_percent: a.summary.actual_margin_percent,
                collection_rate_percent: a.summary.collection_rate_percent,
                risk_count: a.risks.len(),
                high_risk_count: a.high_risk_count(),
            })
            .collect();

        Self {
            rows,
            total_contract: analyses.iter().map(|a| a.summary.contract_total).sum(),
            total_actual_cost: analyses.iter().map(|a| a.summary.total_actual_cost()).sum(),
            total_collected: analyses.iter().map(|a| a.summary.collected).sum(),
        }
    }

    /// Rows with at least one high risk
    pub fn at_risk(&self) -> impl Iterator<Item = &PortfolioRow> {
        self.rows.iter().filter(|r| r.high_risk_count > 0)
    }

    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str("Project Portfolio\n");
        output.push_str(&"=".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:<24} {:<12} {:>14} {:>14} {:>8} {:>8}\n",
            "ID", "Project", "Status", "Contract", "Actual", "Margin", "Risks"
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("  (no projects)\n");
        }
        for row in &self.rows {
            let risks = if row.high_risk_count > 0 {
                format!("{}!", row.risk_count)
            } else {
                row.risk_count.to_string()
            };
            output.push_str(&format!(
                "{:<12} {:<24} {:<12} {:>14} {:>14} {:>7.1}% {:>8}\n",
                row.project_id,
                truncate(&row.name, 24),
                row.status,
                settings.money(row.contract_total),
                settings.money(row.actual_cost),
                row.actual_margin_percent,
                risks
            ));
        }

        output.push_str(&"-".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<50} {:>14} {:>14}\n",
            "TOTAL",
            settings.money(self.total_contract),
            settings.money(self.total_actual_cost)
        ));
        output.push_str(&format!(
            "{:<50} {:>14}\n",
            "Collected",
            settings.money(self.total_collected)
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> SiteBidResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "ID",
            "Project",
            "Status",
            "Contract Total",
            "Actual Cost",
            "Actual Margin",
            "Collection Rate",
            "Risks",
            "High Risks",
        ])?;
        for row in &self.rows {
            csv.write_record([
                row.project_id.short().as_str(),
                row.name.as_str(),
                row.status.id(),
                csv_amount(row.contract_total).as_str(),
                csv_amount(row.actual_cost).as_str(),
                csv_percent(row.actual_margin_percent).as_str(),
                csv_percent(row.collection_rate_percent).as_str(),
                row.risk_count.to_string().as_str(),
                row.high_risk_count.to_string().as_str(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_estimate, compute_financial_summary, RiskEntry, RiskKind, RiskLevel};
    use crate::models::{Category, LineItem, Order, Project};
    use crate::services::ProjectRecords;

    fn analysis(name: &str, spent: i64, risks: Vec<RiskEntry>) -> ProjectAnalysis {
        let project = Project::new(name).with_line_item(
            LineItem::new(Category::Painting, "Walls")
                .with_quantity(1.0)
                .with_prices(Money::from_major(80_000), Money::zero(), Money::zero()),
        );
        let orders = vec![Order::new(project.id, "Paint Shop", Money::from_major(spent))];
        ProjectAnalysis {
            estimate: compute_estimate(&project),
            summary: compute_financial_summary(&project, &orders, &[], &[]),
            risks,
            records: ProjectRecords::default(),
            project,
        }
    }

    fn overrun() -> RiskEntry {
        RiskEntry {
            level: RiskLevel::High,
            kind: RiskKind::BudgetOverrun,
            message: "over".into(),
        }
    }

    #[test]
    fn test_rows_and_totals() {
        let report = PortfolioReport::generate(&[
            analysis("Alpha", 10_000, Vec::new()),
            analysis("Beta", 100_000, vec![overrun()]),
        ]);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_contract, Money::from_major(180_000));
        assert_eq!(report.total_actual_cost, Money::from_major(110_000));
        let at_risk: Vec<_> = report.at_risk().map(|r| r.name.as_str()).collect();
        assert_eq!(at_risk, vec!["Beta"]);
    }

    #[test]
    fn test_terminal_marks_high_risk() {
        let report = PortfolioReport::generate(&[analysis("Beta", 100_000, vec![overrun()])]);
        let settings = Settings::default();
        let text = report.format_terminal(&settings);
        assert!(text.contains("Beta"));
        assert!(text.contains("1!"));
        assert!(text.contains("₩90,000"));
        assert!(PortfolioReport::default()
            .format_terminal(&settings)
            .contains("(no projects)"));
    }

    #[test]
    fn test_csv_export() {
        let report = PortfolioReport::generate(&[analysis("Alpha, Inc", 10_000, Vec::new())]);
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("\"Alpha, Inc\",estimating,90000.00,10000.00"));
        assert!(row.ends_with(",0,0"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
