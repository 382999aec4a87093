//! Storage layer for SiteBid
//!
//! JSON files with atomic writes, held in memory behind `RwLock`s while the
//! process runs. The engine never sees this layer; services load slices
//! from here and pass them in.

pub mod file_io;
pub mod init;
pub mod projects;
pub mod records;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use projects::ProjectRepository;
pub use records::{ExpenseRepository, LaborRepository, OrderRepository, RecordRepository, StoredRecord};

use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SiteBidPaths;
use crate::error::SiteBidError;

/// Owns every repository and the audit log
pub struct Storage {
    paths: SiteBidPaths,
    pub projects: ProjectRepository,
    pub orders: OrderRepository,
    pub labor: LaborRepository,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: SiteBidPaths) -> Result<Self, SiteBidError> {
        paths.ensure_directories()?;

        Ok(Self {
            projects: ProjectRepository::new(paths.projects_file()),
            orders: OrderRepository::new(paths.orders_file()),
            labor: LaborRepository::new(paths.labor_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &SiteBidPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), SiteBidError> {
        self.projects.load()?;
        self.orders.load()?;
        self.labor.load()?;
        self.expenses.load()?;
        debug!(
            base_dir = %self.paths.base_dir().display(),
            projects = self.projects.count()?,
            orders = self.orders.count()?,
            labor = self.labor.count()?,
            expenses = self.expenses.count()?,
            "loaded storage"
        );
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), SiteBidError> {
        self.projects.save()?;
        self.orders.save()?;
        self.labor.save()?;
        self.expenses.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SiteBidError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), SiteBidError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SiteBidError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
