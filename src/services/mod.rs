//! Business logic layer
//!
//! Services borrow the [`Storage`](crate::storage::Storage) coordinator,
//! validate input, persist through the repositories and write an audit
//! entry for every mutation. Derived figures come from [`crate::engine`].

pub mod analysis;
pub mod cost;
pub mod project;

pub use analysis::{AnalysisService, ProjectAnalysis, ProjectRecords};
pub use cost::{CostService, RemovedRecord};
pub use project::{LineItemUpdate, ProjectService, ProjectUpdate};
