//! Analysis service
//!
//! Loads a project's cost records from storage and runs the engine over
//! them. Nothing computed here is persisted.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::engine::{
    compute_estimate, compute_financial_summary, compute_margin_percent, detect_risks_with,
    Estimate, FinancialSummary, RiskEntry, RiskLevel, RiskThresholds,
};
use crate::error::SiteBidResult;
use crate::models::{Expense, LaborRecord, Order, Project};
use crate::storage::Storage;

/// Cost records of one project
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectRecords {
    pub orders: Vec<Order>,
    pub labor: Vec<LaborRecord>,
    pub expenses: Vec<Expense>,
}

impl ProjectRecords {
    fn summarize(&self, project: &Project) -> FinancialSummary {
        compute_financial_summary(project, &self.orders, &self.labor, &self.expenses)
    }
}

/// Everything the engine derives for one project
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    pub project: Project,
    pub estimate: Estimate,
    pub summary: FinancialSummary,
    pub risks: Vec<RiskEntry>,
    pub records: ProjectRecords,
}

impl ProjectAnalysis {
    pub fn high_risk_count(&self) -> usize {
        self.risks.iter().filter(|r| r.level == RiskLevel::High).count()
    }
}

pub struct AnalysisService<'a> {
    storage: &'a Storage,
    thresholds: RiskThresholds,
}

impl<'a> AnalysisService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            thresholds: RiskThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn records(&self, project: &Project) -> SiteBidResult<ProjectRecords> {
        Ok(ProjectRecords {
            orders: self.storage.orders.get_by_project(project.id)?,
            labor: self.storage.labor.get_by_project(project.id)?,
            expenses: self.storage.expenses.get_by_project(project.id)?,
        })
    }

    /// Estimate needs no cost records
    pub fn estimate(&self, project: &Project) -> Estimate {
        compute_estimate(project)
    }

    pub fn summary(&self, project: &Project) -> SiteBidResult<FinancialSummary> {
        let records = self.records(project)?;
        Ok(records.summarize(project))
    }

    pub fn margin(&self, project: &Project) -> SiteBidResult<f64> {
        let records = self.records(project)?;
        Ok(compute_margin_percent(
            project,
            &records.orders,
            &records.labor,
            &records.expenses,
        ))
    }

    pub fn risks(&self, project: &Project, today: NaiveDate) -> SiteBidResult<Vec<RiskEntry>> {
        let summary = self.summary(project)?;
        Ok(detect_risks_with(project, &summary, today, &self.thresholds))
    }

    /// Estimate, summary and risks in one pass
    pub fn analyze(&self, project: &Project, today: NaiveDate) -> SiteBidResult<ProjectAnalysis> {
        let records = self.records(project)?;
        let estimate = compute_estimate(project);
        let summary = records.summarize(project);
        let risks = detect_risks_with(project, &summary, today, &self.thresholds);

        debug!(project = %project.id, risks = risks.len(), "analyzed project");
        Ok(ProjectAnalysis {
            project: project.clone(),
            estimate,
            summary,
            risks,
            records,
        })
    }

    /// Analysis of every project, oldest first
    pub fn portfolio(&self, today: NaiveDate) -> SiteBidResult<Vec<ProjectAnalysis>> {
        self.storage
            .projects
            .get_all()?
            .iter()
            .map(|project| self.analyze(project, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SiteBidPaths;
    use crate::engine::RiskKind;
    use crate::models::{Category, ExpenseStatus, LineItem, Money, PaymentScheduleEntry, ProjectStatus};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn setup() -> (TempDir, Storage, Project) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiteBidPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut deposit = PaymentScheduleEntry::new("Deposit", 30.0);
        deposit.paid = true;
        let project = Project::new("Analyzed")
            .with_status(ProjectStatus::InProgress)
            .with_line_item(
                LineItem::new(Category::Flooring, "Oak")
                    .with_quantity(10.0)
                    .with_prices(Money::from_major(5_000), Money::from_major(3_000), Money::zero()),
            )
            .with_payment(deposit)
            .with_payment(
                PaymentScheduleEntry::new("Balance", 70.0)
                    .with_due_date(today().pred_opt().unwrap()),
            );
        storage.projects.upsert(project.clone()).unwrap();
        storage
            .orders
            .upsert(Order::new(project.id, "Floor Mart", Money::from_major(50_000)))
            .unwrap();
        storage
            .labor
            .upsert(LaborRecord::new(project.id, "Choi", Money::from_major(40_000), 1.0))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::new(project.id, "Pending snack run", Money::from_major(9_999)))
            .unwrap();
        (temp_dir, storage, project)
    }

    #[test]
    fn test_summary_matches_engine() {
        let (_temp, storage, project) = setup();
        let service = AnalysisService::new(&storage);
        let records = service.records(&project).unwrap();

        let summary = service.summary(&project).unwrap();
        let direct = compute_financial_summary(&project, &records.orders, &records.labor, &records.expenses);
        assert_eq!(summary, direct);
        assert_eq!(summary.execution_rate_percent, 112.5);
        assert_eq!(summary.collected, Money::from_major(27_000));

        let margin = service.margin(&project).unwrap();
        let direct_margin =
            compute_margin_percent(&project, &records.orders, &records.labor, &records.expenses);
        assert_eq!(margin.to_bits(), direct_margin.to_bits());
        assert_eq!(margin, summary.actual_margin_percent);

        let analysis = service.analyze(&project, today()).unwrap();
        assert_eq!(analysis.summary, direct);
    }

    #[test]
    fn test_risks_and_analysis() {
        let (_temp, storage, project) = setup();
        let service = AnalysisService::new(&storage);

        let risks = service.risks(&project, today()).unwrap();
        let kinds: Vec<_> = risks.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RiskKind::OverduePayment, RiskKind::BudgetOverrun, RiskKind::LowMargin]
        );

        let analysis = service.analyze(&project, today()).unwrap();
        assert_eq!(analysis.high_risk_count(), 2);
        assert_eq!(analysis.estimate.final_total, Money::from_major(90_000));
        assert_eq!(analysis.records.expenses.len(), 1);
    }

    #[test]
    fn test_thresholds_are_applied() {
        let (_temp, storage, project) = setup();
        let service = AnalysisService::new(&storage).with_thresholds(RiskThresholds {
            low_margin_percent: -50.0,
            ..Default::default()
        });

        let risks = service.risks(&project, today()).unwrap();
        assert!(risks.iter().all(|r| r.kind != RiskKind::LowMargin));
    }

    #[test]
    fn test_portfolio_covers_every_project() {
        let (_temp, storage, project) = setup();
        storage.projects.upsert(Project::new("Empty")).unwrap();
        let service = AnalysisService::new(&storage);

        let portfolio = service.portfolio(today()).unwrap();
        assert_eq!(portfolio.len(), 2);
        let analyzed = portfolio.iter().find(|a| a.project.id == project.id).unwrap();
        assert!(analyzed.summary.actual_margin_percent <= 0.0);
        let empty = portfolio.iter().find(|a| a.project.name == "Empty").unwrap();
        assert_eq!(empty.summary, FinancialSummary::default());
        assert!(empty.risks.is_empty());
    }

    #[test]
    fn test_approval_changes_margin() {
        let (_temp, storage, project) = setup();
        let service = AnalysisService::new(&storage);
        let before = service.margin(&project).unwrap();

        let mut expense = storage.expenses.get_by_project(project.id).unwrap().remove(0);
        expense.status = ExpenseStatus::Approved;
        storage.expenses.upsert(expense).unwrap();

        assert!(service.margin(&project).unwrap() < before);
    }
}
