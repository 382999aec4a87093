//! Project model
//!
//! A project owns its estimate (line items plus pricing parameters) and its
//! payment schedule. Execution costs live in separate record collections that
//! reference the project by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{LineItemId, PaymentId, ProjectId};
use super::lenient;
use super::line_item::LineItem;
use super::money::Money;
use super::payment::PaymentScheduleEntry;

/// Profit percentage used when a project does not specify one
pub const DEFAULT_PROFIT_PERCENT: f64 = 10.0;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Estimate being prepared, no contract yet
    #[default]
    Estimating,
    Contracted,
    /// Work under way; costs are being incurred
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn all() -> &'static [Self] {
        &[
            Self::Estimating,
            Self::Contracted,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Estimating => "estimating",
            Self::Contracted => "contracted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all().iter().copied().find(|s| s.id() == normalized)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Estimating => "Estimating",
            Self::Contracted => "Contracted",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.pad(label)
    }
}

/// How the raw estimate total is turned into a contract amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round down to a multiple of 10,000
    #[default]
    TenThousand,
    /// Round down to a multiple of 100,000
    HundredThousand,
    /// Use the project's manual total as-is
    Manual,
}

impl RoundingPolicy {
    /// Rounding granularity for the automatic policies
    pub fn unit(&self) -> Option<Money> {
        match self {
            Self::TenThousand => Some(Money::from_major(10_000)),
            Self::HundredThousand => Some(Money::from_major(100_000)),
            Self::Manual => None,
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "ten_thousand" | "10000" | "10k" => Some(Self::TenThousand),
            "hundred_thousand" | "100000" | "100k" => Some(Self::HundredThousand),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TenThousand => "Round down to 10,000",
            Self::HundredThousand => "Round down to 100,000",
            Self::Manual => "Manual total",
        };
        f.pad(label)
    }
}

fn default_profit_percent() -> f64 {
    DEFAULT_PROFIT_PERCENT
}

/// A construction project with its estimate and payment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    pub name: String,

    #[serde(default)]
    pub client: String,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Estimate rows in insertion order
    #[serde(default)]
    pub line_items: Vec<LineItem>,

    #[serde(
        default = "default_profit_percent",
        deserialize_with = "lenient::number"
    )]
    pub profit_percent: f64,

    #[serde(default)]
    pub rounding_policy: RoundingPolicy,

    /// Only used under [`RoundingPolicy::Manual`]
    #[serde(default)]
    pub manual_total: Option<Money>,

    #[serde(default)]
    pub payment_schedule: Vec<PaymentScheduleEntry>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            name: name.into(),
            client: String::new(),
            status: ProjectStatus::default(),
            line_items: Vec::new(),
            profit_percent: DEFAULT_PROFIT_PERCENT,
            rounding_policy: RoundingPolicy::default(),
            manual_total: None,
            payment_schedule: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_profit_percent(mut self, percent: f64) -> Self {
        self.profit_percent = lenient::finite_or_zero(percent);
        self
    }

    pub fn with_rounding(mut self, policy: RoundingPolicy, manual_total: Option<Money>) -> Self {
        self.rounding_policy = policy;
        self.manual_total = manual_total;
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    pub fn with_payment(mut self, payment: PaymentScheduleEntry) -> Self {
        self.payment_schedule.push(payment);
        self
    }

    /// Work is under way, so costs are expected to accrue
    pub fn is_under_execution(&self) -> bool {
        self.status == ProjectStatus::InProgress
    }

    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|i| i.id == id)
    }

    pub fn line_item_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.line_items.iter_mut().find(|i| i.id == id)
    }

    /// Find a line item by (short) id
    pub fn find_line_item(&self, identifier: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|i| i.id.matches(identifier))
    }

    pub fn payment_mut(&mut self, id: PaymentId) -> Option<&mut PaymentScheduleEntry> {
        self.payment_schedule.iter_mut().find(|p| p.id == id)
    }

    /// Find a payment by (short) id or label (case-insensitive)
    pub fn find_payment(&self, identifier: &str) -> Option<&PaymentScheduleEntry> {
        self.payment_schedule
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(identifier.trim()))
            .or_else(|| self.payment_schedule.iter().find(|p| p.id.matches(identifier)))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the project's own fields
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ProjectValidationError::NameTooLong(self.name.len()));
        }

        if !self.profit_percent.is_finite() {
            return Err(ProjectValidationError::InvalidPercent);
        }

        if self.payment_schedule.iter().any(|p| !p.percent_of_total.is_finite()) {
            return Err(ProjectValidationError::InvalidPercent);
        }

        if self.rounding_policy == RoundingPolicy::Manual && self.manual_total.is_none() {
            return Err(ProjectValidationError::MissingManualTotal);
        }

        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidPercent,
    MissingManualTotal,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Project name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Project name too long ({} chars, max 100)", len)
            }
            Self::InvalidPercent => write!(f, "Percentages must be finite numbers"),
            Self::MissingManualTotal => {
                write!(f, "Manual rounding requires a manual total")
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}
