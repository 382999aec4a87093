//! Financial report
//!
//! Contract vs. estimated vs. actual cost, collections against the payment
//! schedule, and the detected risks for one project.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::engine::{FinancialSummary, RiskEntry};
use crate::error::SiteBidResult;
use crate::models::{Money, ProjectStatus};
use crate::services::ProjectAnalysis;

use super::{csv_amount, csv_percent};

/// One installment with its amount resolved against the contract total
#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub label: String,
    pub percent_of_total: f64,
    pub amount: Money,
    pub due_date: Option<NaiveDate>,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub overdue: bool,
}

#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub project_name: String,
    pub status: ProjectStatus,
    pub as_of: NaiveDate,
    pub summary: FinancialSummary,
    pub payments: Vec<PaymentRow>,
    pub risks: Vec<RiskEntry>,
}

impl FinancialReport {
    pub fn generate(analysis: &ProjectAnalysis, as_of: NaiveDate) -> Self {
        let contract_total = analysis.summary.contract_total;
        let payments = analysis
            .project
            .payment_schedule
            .iter()
            .map(|p| PaymentRow {
                label: p.label.clone(),
                percent_of_total: p.percent_of_total,
                amount: p.amount_of(contract_total),
                due_date: p.due_date,
                paid: p.paid,
                paid_date: p.paid_date,
                overdue: p.is_overdue(as_of),
            })
            .collect();

        Self {
            project_name: analysis.project.name.clone(),
            status: analysis.project.status,
            as_of,
            summary: analysis.summary,
            payments,
            risks: analysis.risks.clone(),
        }
    }

    pub fn format_terminal(&self, settings: &Settings) -> String {
        let s = &self.summary;
        let mut output = String::new();

        output.push_str(&format!(
            "Financial Summary: {} [{}] as of {}\n",
            self.project_name,
            self.status,
            settings.date(self.as_of)
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        let amount = |label: &str, value: Money| format!("{:<30} {:>20}\n", label, settings.money(value));
        let rate = |label: &str, value: f64| format!("{:<30} {:>19.1}%\n", label, value);

        output.push_str(&amount("Contract total", s.contract_total));
        output.push_str(&amount("Estimated cost", s.estimated_cost));
        output.push_str(&amount("Estimated profit", s.estimated_profit));
        output.push_str(&rate("Estimated margin", s.estimated_margin_percent));
        output.push('\n');
        output.push_str(&amount("  Orders", s.actual_cost.order_cost));
        output.push_str(&amount("  Labor", s.actual_cost.labor_cost));
        output.push_str(&amount("  Approved expenses", s.actual_cost.expense_cost));
        output.push_str(&amount("Actual cost", s.total_actual_cost()));
        output.push_str(&rate("Execution rate", s.execution_rate_percent));
        output.push_str(&amount("Actual profit", s.actual_profit));
        output.push_str(&rate("Actual margin", s.actual_margin_percent));
        output.push('\n');
        output.push_str(&amount("Collected", s.collected));
        output.push_str(&rate("Collection rate", s.collection_rate_percent));
        output.push_str(&amount("Outstanding", s.outstanding));

        if !self.payments.is_empty() {
            output.push_str("\nPayment schedule\n");
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for p in &self.payments {
                let state = if p.paid {
                    match p.paid_date {
                        Some(date) => format!("paid {}", settings.date(date)),
                        None => "paid".to_string(),
                    }
                } else if p.overdue {
                    "OVERDUE".to_string()
                } else {
                    "open".to_string()
                };
                let due = p.due_date.map(|d| settings.date(d)).unwrap_or_else(|| "-".into());
                output.push_str(&format!(
                    "{:<20} {:>6.1}% {:>16} {:>12} {:>14}\n",
                    p.label,
                    p.percent_of_total,
                    settings.money(p.amount),
                    due,
                    state
                ));
            }
        }

        output.push('\n');
        output.push_str(&self.format_risks());
        output
    }

    /// The risk list on its own
    pub fn format_risks(&self) -> String {
        if self.risks.is_empty() {
            return "No risks detected.\n".to_string();
        }

        let mut output = format!("Risks ({})\n", self.risks.len());
        for risk in &self.risks {
            output.push_str(&format!("  [{:<6}] {}\n", risk.level, risk.message));
        }
        output
    }

    /// Rows of `section, item, amount, percent, detail`
    pub fn export_csv<W: Write>(&self, writer: W) -> SiteBidResult<()> {
        let s = &self.summary;
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Section", "Item", "Amount", "Percent", "Detail"])?;

        let metrics = [
            ("contract_total", Some(s.contract_total), None),
            ("estimated_cost", Some(s.estimated_cost), None),
            ("estimated_profit", Some(s.estimated_profit), Some(s.estimated_margin_percent)),
            ("order_cost", Some(s.actual_cost.order_cost), None),
            ("labor_cost", Some(s.actual_cost.labor_cost), None),
            ("expense_cost", Some(s.actual_cost.expense_cost), None),
            ("actual_cost", Some(s.total_actual_cost()), Some(s.execution_rate_percent)),
            ("actual_profit", Some(s.actual_profit), Some(s.actual_margin_percent)),
            ("collected", Some(s.collected), Some(s.collection_rate_percent)),
            ("outstanding", Some(s.outstanding), None),
        ];
        for (item, amount, percent) in metrics {
            csv.write_record([
                "summary",
                item,
                amount.map(csv_amount).unwrap_or_default().as_str(),
                percent.map(csv_percent).unwrap_or_default().as_str(),
                "",
            ])?;
        }

        for p in &self.payments {
            let detail = if p.paid {
                "paid"
            } else if p.overdue {
                "overdue"
            } else {
                "open"
            };
            csv.write_record([
                "payment",
                p.label.as_str(),
                csv_amount(p.amount).as_str(),
                csv_percent(p.percent_of_total).as_str(),
                detail,
            ])?;
        }

        for risk in &self.risks {
            csv.write_record([
                "risk",
                risk.level.to_string().as_str(),
                "",
                "",
                risk.message.as_str(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
