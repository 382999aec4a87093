//! Cost record repositories (orders, labor, expenses)
//!
//! The three record kinds share one repository shape: a map by record id
//! plus an index from project id to record ids, since every read the
//! engine needs is "all records for this project".

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SiteBidError;
use crate::models::{
    CostRecord, Expense, ExpenseId, LaborId, LaborRecord, Order, OrderId, ProjectId,
};

use super::file_io::{read_json, write_json_atomic};

/// A cost record that can live in a [`RecordRepository`]
pub trait StoredRecord: CostRecord + Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + std::fmt::Display;

    fn id(&self) -> Self::Id;

    /// Records sort by creation time within a project
    fn created_at(&self) -> DateTime<Utc>;

    /// Whether `text` names this record (short or full id)
    fn matches(&self, text: &str) -> bool;
}

impl StoredRecord for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn matches(&self, text: &str) -> bool {
        self.id.matches(text)
    }
}

impl StoredRecord for LaborRecord {
    type Id = LaborId;

    fn id(&self) -> LaborId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn matches(&self, text: &str) -> bool {
        self.id.matches(text)
    }
}

impl StoredRecord for Expense {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn matches(&self, text: &str) -> bool {
        self.id.matches(text)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(bound = "R: StoredRecord")]
struct RecordData<R> {
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<R> Default for RecordData<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

struct Inner<R: StoredRecord> {
    records: HashMap<R::Id, R>,
    by_project: HashMap<ProjectId, Vec<R::Id>>,
}

impl<R: StoredRecord> Inner<R> {
    fn insert(&mut self, record: R) {
        let id = record.id();
        let project_id = record.project_id();
        if let Some(previous) = self.records.insert(id, record) {
            if previous.project_id() != project_id {
                self.unindex(previous.project_id(), id);
            } else {
                return;
            }
        }
        self.by_project.entry(project_id).or_default().push(id);
    }

    fn unindex(&mut self, project_id: ProjectId, id: R::Id) {
        if let Some(ids) = self.by_project.get_mut(&project_id) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_project.remove(&project_id);
            }
        }
    }

    fn sorted(mut records: Vec<R>) -> Vec<R> {
        records.sort_by_key(|r| r.created_at());
        records
    }
}

/// JSON-backed repository for one kind of cost record
pub struct RecordRepository<R: StoredRecord> {
    path: PathBuf,
    inner: RwLock<Inner<R>>,
}

pub type OrderRepository = RecordRepository<Order>;
pub type LaborRepository = RecordRepository<LaborRecord>;
pub type ExpenseRepository = RecordRepository<Expense>;

impl<R: StoredRecord> RecordRepository<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: RwLock::new(Inner {
                records: HashMap::new(),
                by_project: HashMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<R>>, SiteBidError> {
        self.inner
            .read()
            .map_err(|e| SiteBidError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<R>>, SiteBidError> {
        self.inner
            .write()
            .map_err(|e| SiteBidError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk and rebuild the project index
    pub fn load(&self) -> Result<(), SiteBidError> {
        let file_data: RecordData<R> = read_json(&self.path)?;

        let mut inner = self.write()?;
        inner.records.clear();
        inner.by_project.clear();
        for record in file_data.records {
            inner.insert(record);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SiteBidError> {
        let file_data = RecordData {
            records: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: R::Id) -> Result<Option<R>, SiteBidError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    /// Find a record by short or full id
    pub fn find(&self, identifier: &str) -> Result<Option<R>, SiteBidError> {
        Ok(self
            .read()?
            .records
            .values()
            .find(|r| r.matches(identifier))
            .cloned())
    }

    pub fn get_all(&self) -> Result<Vec<R>, SiteBidError> {
        let records: Vec<R> = self.read()?.records.values().cloned().collect();
        Ok(Inner::sorted(records))
    }

    /// Records belonging to one project, oldest first
    pub fn get_by_project(&self, project_id: ProjectId) -> Result<Vec<R>, SiteBidError> {
        let inner = self.read()?;
        let records: Vec<R> = inner
            .by_project
            .get(&project_id)
            .map(|ids| ids.iter().filter_map(|id| inner.records.get(id).cloned()).collect())
            .unwrap_or_default();
        Ok(Inner::sorted(records))
    }

    pub fn upsert(&self, record: R) -> Result<(), SiteBidError> {
        self.write()?.insert(record);
        Ok(())
    }

    pub fn delete(&self, id: R::Id) -> Result<Option<R>, SiteBidError> {
        let mut inner = self.write()?;
        let removed = inner.records.remove(&id);
        if let Some(record) = &removed {
            inner.unindex(record.project_id(), id);
        }
        Ok(removed)
    }

    /// Remove every record of a project, returning what was removed
    pub fn delete_by_project(&self, project_id: ProjectId) -> Result<Vec<R>, SiteBidError> {
        let mut inner = self.write()?;
        let ids = inner.by_project.remove(&project_id).unwrap_or_default();
        let removed: Vec<R> = ids.iter().filter_map(|id| inner.records.remove(id)).collect();
        Ok(Inner::sorted(removed))
    }

    pub fn count(&self) -> Result<usize, SiteBidError> {
        Ok(self.read()?.records.len())
    }
}
