//! Append-only JSON Lines audit log.
//!
//! Each scan appends exactly one record terminated by `\n`. Existing content
//! is never truncated or rewritten, and the log is never read back.

use crate::audit::events::emit_record_written;
use crate::core::{ScanError, ScanResult, ScanStatus, TargetKind};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log file, relative to the working directory.
pub const DEFAULT_AUDIT_LOG: &str = "audit.log.jsonl";

/// Event type recorded for every scan.
pub const FILE_SCAN_EVENT: &str = "file_scan";

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the record was created, UTC.
    pub timestamp_utc: DateTime<Utc>,

    /// Always [`FILE_SCAN_EVENT`] for scans.
    pub event_type: String,

    /// Correlates the record with the JSON report.
    pub scan_id: String,

    /// Scanned path.
    pub target: String,

    /// File or directory.
    pub target_type: TargetKind,

    /// Overall verdict.
    pub status: ScanStatus,

    /// Detections counted towards the verdict.
    pub viruses_detected: usize,

    /// File digest; `null` for directories.
    pub sha256: Option<String>,
}

impl AuditRecord {
    /// Builds a record for a completed scan, timestamped now.
    pub fn for_scan(result: &ScanResult, scan_id: impl Into<String>) -> Self {
        Self {
            timestamp_utc: Utc::now(),
            event_type: FILE_SCAN_EVENT.to_string(),
            scan_id: scan_id.into(),
            target: result.path.clone(),
            target_type: result.kind,
            status: result.status,
            viruses_detected: result.viruses_detected,
            sha256: result.sha256.clone(),
        }
    }
}

/// Handle to an audit log file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_LOG)
    }
}

impl AuditLog {
    /// Creates a handle for `path`. Nothing is touched until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, creating the file if it does not exist.
    pub fn append(&self, record: &AuditRecord) -> Result<(), ScanError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.write_error(source))?;

        emit_record_written(&record.scan_id, &self.path);
        Ok(())
    }

    /// Builds and appends the record for a completed scan.
    pub fn record_scan(
        &self,
        result: &ScanResult,
        scan_id: impl Into<String>,
    ) -> Result<AuditRecord, ScanError> {
        let record = AuditRecord::for_scan(result, scan_id);
        self.append(&record)?;
        Ok(record)
    }

    fn write_error(&self, source: std::io::Error) -> ScanError {
        ScanError::AuditWriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}
