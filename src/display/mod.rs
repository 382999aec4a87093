//! Terminal output formatting
//!
//! Plain-text tables for list and detail views. Reports live in
//! `crate::reports`; this module only covers the interactive commands.

pub mod category;
pub mod cost;
pub mod project;

pub use category::format_category_list;
pub use cost::format_cost_records;
pub use project::{format_line_items, format_project_details, format_project_list};
