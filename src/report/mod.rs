//! Report generation.
//!
//! - [`ScanReport`] - the combined JSON report written with `--json`
//! - [`terminal`] - human-readable rendering
//! - [`progress`] - the animated "scanning" indicator

pub mod progress;
pub mod terminal;

use crate::compliance::ComplianceMapping;
use crate::core::{ScanError, ScanResult};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Tool name recorded in reports.
pub const TOOL_NAME: &str = "filescanner";

/// Identity of the tool that produced a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Engine the tool drove.
    pub engine: String,
}

impl ToolInfo {
    /// Creates tool info for the given engine.
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            name: TOOL_NAME.to_string(),
            engine: engine.into(),
        }
    }
}

/// The combined report: scan result plus compliance mapping.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport<'a> {
    /// Correlates the report with its audit record.
    pub scan_id: String,
    /// When the report was assembled, UTC.
    pub timestamp_utc: DateTime<Utc>,
    /// Tool identity.
    pub tool: ToolInfo,
    /// The scan result.
    pub result: &'a ScanResult,
    /// FedRAMP controls.
    pub fedramp_mapping: &'a ComplianceMapping,
}

impl<'a> ScanReport<'a> {
    /// Assembles a report timestamped now.
    pub fn new(
        scan_id: impl Into<String>,
        tool: ToolInfo,
        result: &'a ScanResult,
        fedramp_mapping: &'a ComplianceMapping,
    ) -> Self {
        Self {
            scan_id: scan_id.into(),
            timestamp_utc: Utc::now(),
            tool,
            result,
            fedramp_mapping,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ScanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report to `path`, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<(), ScanError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ScanError::ReportWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), scan_id = %self.scan_id, "JSON report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::fedramp_mapping;
    use crate::core::{ParsedTranscript, ScanTarget, TargetKind};

    fn directory_result() -> ScanResult {
        let target = ScanTarget::new("/srv/uploads", TargetKind::Directory);
        let parsed = ParsedTranscript::parse(
            "/srv/uploads/a: OK\n/srv/uploads/b: Eicar-Test-Signature FOUND\n----------- SCAN SUMMARY -----------\nInfected files: 1\n",
        );
        ScanResult::new(&target, None, parsed, true)
    }

    #[test]
    fn test_report_shape() {
        let result = directory_result();
        let mapping = fedramp_mapping(&result);
        let report = ScanReport::new("scan-1", ToolInfo::new("clamav"), &result, &mapping);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["scan_id"], "scan-1");
        assert_eq!(value["tool"]["name"], "filescanner");
        assert_eq!(value["tool"]["engine"], "clamav");
        assert_eq!(value["result"]["status"], "INFECTED");
        assert_eq!(value["result"]["viruses_detected"], 1);
        assert_eq!(value["result"]["clamav"]["summary"]["Infected files"], "1");
        assert_eq!(value["fedramp_mapping"]["SI-3"]["result"], "INFECTED");
        assert!(value["timestamp_utc"].is_string());
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let result = directory_result();
        let mapping = fedramp_mapping(&result);
        let report = ScanReport::new("scan-2", ToolInfo::new("clamav"), &result, &mapping);

        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["result"]["path"], "/srv/uploads");
    }

    #[test]
    fn test_write_json_failure_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("report.json");
        let result = directory_result();
        let mapping = fedramp_mapping(&result);
        let report = ScanReport::new("scan-3", ToolInfo::new("clamav"), &result, &mapping);

        let err = report.write_json(&path).unwrap_err();
        assert!(matches!(err, ScanError::ReportWriteFailed { .. }));
    }
}
