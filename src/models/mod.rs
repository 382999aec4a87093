//! Core data models for SiteBid
//!
//! Projects with their estimate rows and payment schedule, the fixed trade
//! taxonomy, and the execution cost records tracked against a project.

pub mod category;
pub mod cost_record;
pub mod ids;
pub mod lenient;
pub mod line_item;
pub mod money;
pub mod payment;
pub mod project;

pub use category::Category;
pub use cost_record::{CostRecord, Expense, ExpenseStatus, LaborRecord, Order};
pub use ids::{ExpenseId, LaborId, LineItemId, OrderId, PaymentId, ProjectId};
pub use line_item::LineItem;
pub use money::{Money, MoneyParseError};
pub use payment::{scheduled_percent, PaymentScheduleEntry};
pub use project::{Project, ProjectStatus, ProjectValidationError, RoundingPolicy};
