//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print to
//! stdout; errors bubble up to `main`.

pub mod cost;
pub mod export;
pub mod item;
pub mod payment;
pub mod project;
pub mod report;

pub use cost::{handle_cost_command, CostCommands};
pub use export::{handle_export_command, ExportArgs};
pub use item::{handle_item_command, ItemCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use project::{handle_project_command, ProjectCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{SiteBidError, SiteBidResult};
use crate::models::{Category, Money};

/// Local calendar date, the reference point for due dates
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn parse_money(text: &str, field: &str) -> SiteBidResult<Money> {
    Money::parse(text).map_err(|e| {
        SiteBidError::Validation(format!(
            "Invalid {} '{}'. Use a format like '15000' or '1,250.50'. Error: {}",
            field, text, e
        ))
    })
}

pub(crate) fn parse_optional_money(text: Option<String>, field: &str) -> SiteBidResult<Option<Money>> {
    text.map(|t| parse_money(&t, field)).transpose()
}

pub(crate) fn parse_date(text: &str) -> SiteBidResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        SiteBidError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", text))
    })
}

pub(crate) fn parse_optional_date(text: Option<String>) -> SiteBidResult<Option<NaiveDate>> {
    text.map(|t| parse_date(&t)).transpose()
}

pub(crate) fn parse_category(text: &str) -> SiteBidResult<Category> {
    Category::from_id(text).ok_or_else(|| {
        SiteBidError::Validation(format!(
            "Unknown category '{}'. Run 'sitebid categories' to see valid ids",
            text
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("15,000", "price").unwrap(), Money::from_major(15_000));
        assert!(parse_money("abc", "price").unwrap_err().is_validation());
        assert_eq!(parse_money("$-500", "deduction").unwrap(), Money::from_major(-500));
        assert!(parse_money("abc5", "price").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2025").is_err());
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("waste_disposal").unwrap(), Category::WasteDisposal);
        assert_eq!(parse_category("Flooring").unwrap(), Category::Flooring);
        assert!(parse_category("roofing").is_err());
    }
}
