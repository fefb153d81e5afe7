//! Audit events emitted through `tracing`.

use crate::core::{ScanResult, ScanTarget};

/// Emits an audit event for a scan starting.
pub fn emit_scan_started(target: &ScanTarget, sha256: Option<&str>, engine: &str) {
    tracing::info!(
        target: "filescanner::audit",
        event_type = "scan_started",
        target_path = %target.path.display(),
        target_type = %target.kind,
        sha256 = ?sha256,
        engine = %engine,
        "Scan started"
    );
}

/// Emits an audit event for a completed scan.
pub fn emit_scan_completed(result: &ScanResult, engine: &str) {
    let detections: Vec<&str> = result
        .transcript
        .detections()
        .filter_map(|entry| entry.signature.as_deref())
        .collect();

    tracing::info!(
        target: "filescanner::audit",
        event_type = "scan_completed",
        target_path = %result.path,
        target_type = %result.kind,
        status = %result.status,
        viruses_detected = result.viruses_detected,
        sha256 = ?result.sha256,
        engine = %engine,
        signatures = ?detections,
        "Scan completed"
    );
}

/// Emits an event once a record has been appended to the audit log.
pub fn emit_record_written(scan_id: &str, log_path: &std::path::Path) {
    tracing::debug!(
        target: "filescanner::audit",
        event_type = "audit_record_written",
        scan_id = %scan_id,
        log_path = %log_path.display(),
        "Audit record written"
    );
}
