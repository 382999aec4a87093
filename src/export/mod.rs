//! Project export
//!
//! - JSON: machine-readable bundle
//! - YAML: the same bundle for people

pub mod json;
pub mod yaml;

pub use json::{export_project_json, ProjectExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_project_yaml;

use std::str::FromStr;

/// Output format accepted by `sitebid export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown export format '{}' (expected json or yaml)", other)),
        }
    }
}
