//! SiteBid - construction estimating and project financial rollup
//!
//! This library turns a project's estimate line items into a contract total
//! and tracks what the project actually costs against it: material orders,
//! day labor and site expenses, collected through a percentage-based payment
//! schedule.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: Pure calculation core (estimate, actual cost, summary, risks)
//! - `models`: Core data models (projects, line items, cost records, money)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer on top of storage and the engine
//! - `audit`: Audit logging system
//! - `reports`: Terminal and CSV reports
//! - `export`: JSON and YAML project bundles
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust
//! use sitebid::engine::compute_estimate;
//! use sitebid::models::{Category, LineItem, Money, Project};
//!
//! let project = Project::new("Apartment 302").with_line_item(
//!     LineItem::new(Category::Flooring, "Oak flooring")
//!         .with_quantity(10.0)
//!         .with_prices(Money::from_major(5_000), Money::from_major(3_000), Money::zero()),
//! );
//!
//! let estimate = compute_estimate(&project);
//! assert_eq!(estimate.final_total, Money::from_major(90_000));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SiteBidError, SiteBidResult};
