//! Payment schedule entries
//!
//! Payments are expressed as a percentage of the contract total rather than a
//! fixed amount, so a changed contract total changes every installment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::PaymentId;
use super::lenient;
use super::money::Money;

/// One installment of a project's payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    pub id: PaymentId,

    /// e.g. "Deposit", "Interim", "Balance"
    #[serde(default)]
    pub label: String,

    #[serde(default, deserialize_with = "lenient::number")]
    pub percent_of_total: f64,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub paid: bool,

    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

impl PaymentScheduleEntry {
    pub fn new(label: impl Into<String>, percent_of_total: f64) -> Self {
        Self {
            id: PaymentId::new(),
            label: label.into(),
            percent_of_total: lenient::finite_or_zero(percent_of_total),
            due_date: None,
            paid: false,
            paid_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Amount of this installment for a given contract total
    pub fn amount_of(&self, contract_total: Money) -> Money {
        contract_total.percent(self.percent_of_total)
    }

    /// Unpaid with a due date strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date.is_some_and(|due| due < today)
    }

    pub fn mark_paid(&mut self, paid_date: NaiveDate) {
        self.paid = true;
        self.paid_date = Some(paid_date);
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_date = None;
    }
}

/// Sum of `percent_of_total` across a schedule
pub fn scheduled_percent(schedule: &[PaymentScheduleEntry]) -> f64 {
    schedule.iter().map(|p| p.percent_of_total).sum()
}
