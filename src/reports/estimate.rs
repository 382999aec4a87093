//! Estimate report
//!
//! Per-category cost table followed by the indirect lines and the rounding
//! step that produce the contract amount.

use std::io::Write;

use crate::config::Settings;
use crate::engine::{compute_estimate, Estimate, INCIDENTAL_PERCENT, SAFETY_PERCENT};
use crate::error::SiteBidResult;
use crate::models::{Category, Money, Project, RoundingPolicy};

use super::{csv_amount, csv_percent};

#[derive(Debug, Clone)]
pub struct EstimateRow {
    pub category: Category,
    pub item_count: usize,
    pub material: Money,
    pub labor: Money,
    pub expense: Money,
    pub total: Money,
    /// Share of the direct cost
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct EstimateReport {
    pub project_name: String,
    pub profit_percent: f64,
    pub rounding_policy: RoundingPolicy,
    /// Categories in taxonomy order
    pub rows: Vec<EstimateRow>,
    pub estimate: Estimate,
}

impl EstimateReport {
    pub fn generate(project: &Project) -> Self {
        Self::from_estimate(project, compute_estimate(project))
    }

    pub fn from_estimate(project: &Project, estimate: Estimate) -> Self {
        let rows = estimate
            .per_category
            .iter()
            .map(|(category, cost)| EstimateRow {
                category: *category,
                item_count: cost.item_count,
                material: cost.material,
                labor: cost.labor,
                expense: cost.expense,
                total: cost.total,
                percentage: crate::engine::percent_of(cost.total, estimate.direct_cost),
            })
            .collect();

        Self {
            project_name: project.name.clone(),
            profit_percent: project.profit_percent,
            rounding_policy: project.rounding_policy,
            rows,
            estimate,
        }
    }

    pub fn format_terminal(&self, settings: &Settings) -> String {
        let e = &self.estimate;
        let mut output = String::new();

        output.push_str(&format!("Estimate: {}\n", self.project_name));
        output.push_str(&"=".repeat(88));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>5} {:>14} {:>14} {:>14} {:>14}\n",
            "Category", "Items", "Material", "Labor", "Expense", "Total"
        ));
        output.push_str(&"-".repeat(88));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("  (no line items)\n");
        }
        for row in &self.rows {
            output.push_str(&format!(
                "{} {:<17} {:>5} {:>14} {:>14} {:>14} {:>14}\n",
                row.category.icon(),
                row.category.display_name(),
                row.item_count,
                settings.money(row.material),
                settings.money(row.labor),
                settings.money(row.expense),
                settings.money(row.total)
            ));
        }

        output.push_str(&"-".repeat(88));
        output.push('\n');
        let line = |label: String, amount: Money| {
            format!("{:<58} {:>29}\n", label, settings.money(amount))
        };
        output.push_str(&line("Direct cost".into(), e.direct_cost));
        output.push_str(&line(
            format!("  Profit ({}%)", self.profit_percent),
            e.indirect.profit,
        ));
        output.push_str(&line(format!("  Safety ({}%)", SAFETY_PERCENT), e.indirect.safety));
        output.push_str(&line(
            format!("  Incidental ({}%)", INCIDENTAL_PERCENT),
            e.indirect.incidental,
        ));
        output.push_str(&line("Indirect cost".into(), e.indirect.total));
        output.push_str(&line("Raw total".into(), e.raw_total));
        output.push_str(&line(
            format!("Rounding ({})", self.rounding_policy),
            e.adjustment,
        ));
        output.push_str(&"=".repeat(88));
        output.push('\n');
        output.push_str(&line("CONTRACT TOTAL".into(), e.final_total));

        output
    }

    /// One row per category, then one row per summary line
    pub fn export_csv<W: Write>(&self, writer: W) -> SiteBidResult<()> {
        let e = &self.estimate;
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Line", "Category", "Items", "Material", "Labor", "Expense", "Total", "Percentage"])?;
        for row in &self.rows {
            csv.write_record([
                "category",
                row.category.id(),
                row.item_count.to_string().as_str(),
                csv_amount(row.material).as_str(),
                csv_amount(row.labor).as_str(),
                csv_amount(row.expense).as_str(),
                csv_amount(row.total).as_str(),
                csv_percent(row.percentage).as_str(),
            ])?;
        }

        let summary_lines = [
            ("direct_cost", e.direct_cost),
            ("profit", e.indirect.profit),
            ("safety", e.indirect.safety),
            ("incidental", e.indirect.incidental),
            ("indirect_total", e.indirect.total),
            ("raw_total", e.raw_total),
            ("adjustment", e.adjustment),
            ("final_total", e.final_total),
        ];
        for (label, amount) in summary_lines {
            csv.write_record([label, "", "", "", "", "", csv_amount(amount).as_str(), ""])?;
        }

        csv.flush()?;
        Ok(())
    }
}
