//! Risk detection
//!
//! Stateless threshold rules over a project and its financial summary. Rules
//! run in a fixed order and the output keeps that order; sorting by severity
//! is left to whoever displays the list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::summary::FinancialSummary;
use crate::models::{scheduled_percent, Project, ProjectStatus, RoundingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.pad("HIGH"),
            Self::Medium => f.pad("MEDIUM"),
        }
    }
}

/// Which rule raised a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    OverduePayment,
    BudgetOverrun,
    BudgetWarning,
    ScheduleOverAllocated,
    ScheduleUnderAllocated,
    LowMargin,
    ManualBelowCost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub level: RiskLevel,
    pub kind: RiskKind,
    pub message: String,
}

impl RiskEntry {
    fn high(kind: RiskKind, message: String) -> Self {
        Self {
            level: RiskLevel::High,
            kind,
            message,
        }
    }

    fn medium(kind: RiskKind, message: String) -> Self {
        Self {
            level: RiskLevel::Medium,
            kind,
            message,
        }
    }
}

/// Tunable limits for the percentage-based rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Actual margin below this (percent) is flagged while under execution
    #[serde(default = "default_low_margin_percent")]
    pub low_margin_percent: f64,

    /// Execution rate above this (percent, up to 100) is an early warning
    #[serde(default = "default_budget_warning_percent")]
    pub budget_warning_percent: f64,
}

fn default_low_margin_percent() -> f64 {
    5.0
}

fn default_budget_warning_percent() -> f64 {
    90.0
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_margin_percent: default_low_margin_percent(),
            budget_warning_percent: default_budget_warning_percent(),
        }
    }
}

/// Evaluate every risk rule against a project and its summary
pub fn detect_risks_with(
    project: &Project,
    summary: &FinancialSummary,
    today: NaiveDate,
    thresholds: &RiskThresholds,
) -> Vec<RiskEntry> {
    let mut risks = Vec::new();

    for payment in project.payment_schedule.iter().filter(|p| p.is_overdue(today)) {
        let due = payment
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        risks.push(RiskEntry::high(
            RiskKind::OverduePayment,
            format!(
                "Payment '{}' ({}) was due {} and is unpaid",
                payment.label,
                payment.amount_of(summary.contract_total),
                due
            ),
        ));
    }

    let execution = summary.execution_rate_percent;
    if execution > 100.0 {
        risks.push(RiskEntry::high(
            RiskKind::BudgetOverrun,
            format!(
                "Actual cost {} exceeds estimated cost {} ({:.1}% executed)",
                summary.actual_cost.total, summary.estimated_cost, execution
            ),
        ));
    } else if execution > thresholds.budget_warning_percent {
        risks.push(RiskEntry::medium(
            RiskKind::BudgetWarning,
            format!("{:.1}% of the estimated cost is already spent", execution),
        ));
    }

    let scheduled = scheduled_percent(&project.payment_schedule);
    if scheduled > 100.0 {
        risks.push(RiskEntry::medium(
            RiskKind::ScheduleOverAllocated,
            format!("Payment schedule adds up to {:.1}% of the contract", scheduled),
        ));
    } else if scheduled < 100.0
        && !project.payment_schedule.is_empty()
        && matches!(
            project.status,
            ProjectStatus::Contracted | ProjectStatus::InProgress
        )
    {
        risks.push(RiskEntry::medium(
            RiskKind::ScheduleUnderAllocated,
            format!(
                "Payment schedule covers only {:.1}% of the contract",
                scheduled
            ),
        ));
    }

    if project.is_under_execution() && summary.actual_margin_percent < thresholds.low_margin_percent {
        risks.push(RiskEntry::medium(
            RiskKind::LowMargin,
            format!(
                "Actual margin is {:.1}%, below {:.1}%",
                summary.actual_margin_percent, thresholds.low_margin_percent
            ),
        ));
    }

    if project.rounding_policy == RoundingPolicy::Manual
        && summary.contract_total < summary.estimated_cost
    {
        risks.push(RiskEntry::high(
            RiskKind::ManualBelowCost,
            format!(
                "Manual contract total {} is below the estimated cost {}",
                summary.contract_total, summary.estimated_cost
            ),
        ));
    }

    risks
}
