//! Project bundle export as JSON
//!
//! A bundle holds the stored project and cost records alongside everything
//! the engine derives from them, so it can be read without SiteBid.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::engine::{Estimate, FinancialSummary, RiskEntry};
use crate::error::{SiteBidError, SiteBidResult};
use crate::models::{Expense, LaborRecord, Order, Project};
use crate::services::ProjectAnalysis;

/// Bumped whenever the bundle layout changes
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct ProjectExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    /// Date the risks were evaluated against
    pub as_of: NaiveDate,

    pub project: Project,
    pub estimate: Estimate,
    pub summary: FinancialSummary,
    pub risks: Vec<RiskEntry>,

    pub orders: Vec<Order>,
    pub labor: Vec<LaborRecord>,
    pub expenses: Vec<Expense>,
}

impl ProjectExport {
    pub fn from_analysis(analysis: ProjectAnalysis, as_of: NaiveDate) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            project: analysis.project,
            estimate: analysis.estimate,
            summary: analysis.summary,
            risks: analysis.risks,
            orders: analysis.records.orders,
            labor: analysis.records.labor,
            expenses: analysis.records.expenses,
        }
    }
}

/// Write a bundle as pretty-printed JSON
pub fn export_project_json<W: Write>(export: &ProjectExport, writer: &mut W) -> SiteBidResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| SiteBidError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SiteBidError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::{compute_estimate, compute_financial_summary};
    use crate::models::{Category, LineItem, Money};
    use crate::services::ProjectRecords;

    pub(crate) fn sample_export() -> ProjectExport {
        let project = Project::new("Export house").with_line_item(
            LineItem::new(Category::Flooring, "Oak")
                .with_quantity(10.0)
                .with_prices(Money::from_major(5_000), Money::from_major(3_000), Money::zero()),
        );
        let orders = vec![Order::new(project.id, "Floor Mart", Money::from_major(50_000))];
        let analysis = ProjectAnalysis {
            estimate: compute_estimate(&project),
            summary: compute_financial_summary(&project, &orders, &[], &[]),
            risks: Vec::new(),
            records: ProjectRecords {
                orders,
                ..Default::default()
            },
            project,
        };
        ProjectExport::from_analysis(analysis, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn test_json_bundle() {
        let mut buffer = Vec::new();
        export_project_json(&sample_export(), &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["project"]["name"], "Export house");
        // Money serializes as minor units
        assert_eq!(value["estimate"]["final_total"], 9_000_000);
        assert_eq!(value["summary"]["execution_rate_percent"], 62.5);
        assert_eq!(value["orders"].as_array().unwrap().len(), 1);
        assert!(value["estimate"]["per_category"]["flooring"].is_object());
    }
}
