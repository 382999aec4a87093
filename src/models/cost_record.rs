//! Execution cost records
//!
//! Purchase orders, labor days and expenses are recorded against a project
//! while work is under way. Each carries the owning project's id; the actual
//! cost rollup filters on it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, LaborId, OrderId, ProjectId};
use super::lenient;
use super::money::Money;

/// Common view over the three record kinds
pub trait CostRecord {
    fn project_id(&self) -> ProjectId;

    /// The amount this record contributes to actual cost
    fn amount(&self) -> Money;
}

/// A purchase order placed with a vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    pub project_id: ProjectId,

    #[serde(default)]
    pub vendor: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub amount: Money,

    #[serde(default)]
    pub ordered_on: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(project_id: ProjectId, vendor: impl Into<String>, amount: Money) -> Self {
        Self {
            id: OrderId::new(),
            project_id,
            vendor: vendor.into(),
            description: String::new(),
            amount,
            ordered_on: None,
            created_at: Utc::now(),
        }
    }
}

impl CostRecord for Order {
    fn project_id(&self) -> ProjectId {
        self.project_id
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Labor for one worker over a number of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRecord {
    pub id: LaborId,

    pub project_id: ProjectId,

    #[serde(default)]
    pub worker: String,

    #[serde(default)]
    pub work_date: Option<NaiveDate>,

    #[serde(default)]
    pub daily_rate: Money,

    /// May be fractional (half days)
    #[serde(default, deserialize_with = "lenient::number")]
    pub days: f64,

    #[serde(default)]
    pub meal_cost: Money,

    #[serde(default)]
    pub transport_cost: Money,

    /// Withholding or other deductions from the worker's pay
    #[serde(default)]
    pub deduction: Money,

    pub created_at: DateTime<Utc>,
}

impl LaborRecord {
    pub fn new(project_id: ProjectId, worker: impl Into<String>, daily_rate: Money, days: f64) -> Self {
        Self {
            id: LaborId::new(),
            project_id,
            worker: worker.into(),
            work_date: None,
            daily_rate,
            days: lenient::finite_or_zero(days),
            meal_cost: Money::zero(),
            transport_cost: Money::zero(),
            deduction: Money::zero(),
            created_at: Utc::now(),
        }
    }

    pub fn with_extras(mut self, meal_cost: Money, transport_cost: Money, deduction: Money) -> Self {
        self.meal_cost = meal_cost;
        self.transport_cost = transport_cost;
        self.deduction = deduction;
        self
    }

    /// `daily_rate × days + meal_cost + transport_cost − deduction`
    pub fn total(&self) -> Money {
        self.daily_rate.scale(self.days) + self.meal_cost + self.transport_cost - self.deduction
    }
}

impl CostRecord for LaborRecord {
    fn project_id(&self) -> ProjectId {
        self.project_id
    }

    fn amount(&self) -> Money {
        self.total()
    }
}

/// Approval state of an expense claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        f.pad(label)
    }
}

/// A miscellaneous site expense; only approved expenses count as cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub project_id: ProjectId,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub amount: Money,

    #[serde(default)]
    pub spent_on: Option<NaiveDate>,

    #[serde(default)]
    pub status: ExpenseStatus,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(project_id: ProjectId, description: impl Into<String>, amount: Money) -> Self {
        Self {
            id: ExpenseId::new(),
            project_id,
            description: description.into(),
            amount,
            spent_on: None,
            status: ExpenseStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: ExpenseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }
}

impl CostRecord for Expense {
    fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Non-approved expenses contribute nothing
    fn amount(&self) -> Money {
        if self.is_approved() {
            self.amount
        } else {
            Money::zero()
        }
    }
}
