//! Audit logging
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON line, with the record's state before and after.

mod entry;
mod logger;

pub use entry::{summarize_changes, AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
