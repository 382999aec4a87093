//! Project bundle export as YAML

use std::io::Write;

use crate::error::{SiteBidError, SiteBidResult};
use crate::export::json::ProjectExport;

/// Write a bundle as YAML, preceded by a short comment header
pub fn export_project_yaml<W: Write>(export: &ProjectExport, writer: &mut W) -> SiteBidResult<()> {
    let header = format!(
        "# SiteBid project export: {}\n# Generated: {}\n# Amounts are in minor units (hundredths)\n\n",
        export.project.name, export.exported_at
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| SiteBidError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| SiteBidError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_yaml_bundle() {
        let mut buffer = Vec::new();
        export_project_yaml(&sample_export(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# SiteBid project export: Export house"));
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["project"]["name"].as_str(), Some("Export house"));
        assert_eq!(value["summary"]["contract_total"].as_i64(), Some(9_000_000));
    }
}
