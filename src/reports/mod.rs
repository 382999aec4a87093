//! Reports for SiteBid
//!
//! Each report is generated from engine output, then rendered either as
//! fixed-width terminal text or as CSV.

pub mod estimate;
pub mod financial;
pub mod portfolio;

pub use estimate::{EstimateReport, EstimateRow};
pub use financial::{FinancialReport, PaymentRow};
pub use portfolio::{PortfolioReport, PortfolioRow};

use crate::models::Money;

/// Amount as a plain decimal for CSV cells, e.g. `-960.00`
fn csv_amount(amount: Money) -> String {
    format!("{:.2}", amount.as_major_f64())
}

fn csv_percent(percent: f64) -> String {
    format!("{:.2}", percent)
}
