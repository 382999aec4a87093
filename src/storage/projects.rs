//! Project repository, persisted to `data/projects.json`
//!
//! Line items and the payment schedule are stored inline with their project.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SiteBidError;
use crate::models::{Project, ProjectId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProjectData {
    #[serde(default)]
    projects: Vec<Project>,
}

pub struct ProjectRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProjectId, Project>>,
}

impl ProjectRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SiteBidError> {
        let file_data: ProjectData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for project in file_data.projects {
            data.insert(project.id, project);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SiteBidError> {
        let file_data = ProjectData {
            projects: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ProjectId) -> Result<Option<Project>, SiteBidError> {
        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All projects, oldest first
    pub fn get_all(&self) -> Result<Vec<Project>, SiteBidError> {
        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut projects: Vec<_> = data.values().cloned().collect();
        projects.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(projects)
    }

    /// Look up by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Project>, SiteBidError> {
        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Look up by name first, then by (short) id
    pub fn find(&self, identifier: &str) -> Result<Option<Project>, SiteBidError> {
        if let Some(project) = self.get_by_name(identifier)? {
            return Ok(Some(project));
        }

        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|p| p.id.matches(identifier)).cloned())
    }

    pub fn upsert(&self, project: Project) -> Result<(), SiteBidError> {
        let mut data = self.data.write().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(project.id, project);
        Ok(())
    }

    pub fn delete(&self, id: ProjectId) -> Result<Option<Project>, SiteBidError> {
        let mut data = self.data.write().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Whether another project already uses `name`
    pub fn name_exists(&self, name: &str, exclude: Option<ProjectId>) -> Result<bool, SiteBidError> {
        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name) && Some(p.id) != exclude))
    }

    pub fn count(&self) -> Result<usize, SiteBidError> {
        let data = self.data.read().map_err(|e| {
            SiteBidError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
