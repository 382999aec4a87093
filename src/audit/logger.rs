//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{SiteBidError, SiteBidResult};

use super::entry::AuditEntry;

/// Writes one JSON object per line to the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append a single entry and flush
    pub fn log(&self, entry: &AuditEntry) -> SiteBidResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> SiteBidResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SiteBidError::Io(format!("Failed to open audit log: {}", e)))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            let line = serde_json::to_string(entry).map_err(|e| {
                SiteBidError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;
            writeln!(writer, "{}", line)
                .map_err(|e| SiteBidError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| SiteBidError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// All entries, oldest first
    ///
    /// Lines that fail to parse are skipped with a warning so that one
    /// damaged line does not hide the rest of the history.
    pub fn read_all(&self) -> SiteBidResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SiteBidError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SiteBidError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable audit entry"),
            }
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> SiteBidResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(n: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Order,
            format!("ord-{}", n),
            None,
            &json!({"amount": n}),
        )
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Order);
    }

    #[test]
    fn test_read_recent_keeps_order() {
        let (logger, _temp) = logger();
        let batch: Vec<_> = (0..5).map(entry).collect();
        logger.log_batch(&batch).unwrap();

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "ord-3");
        assert_eq!(recent[1].entity_id, "ord-4");
    }

    #[test]
    fn test_damaged_line_is_skipped() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .and_then(|mut f| writeln!(f, "{{not json"))
            .unwrap();
        logger.log(&entry(2)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
    }
}
