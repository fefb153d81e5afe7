//! Audit trail for scans.
//!
//! Two channels are provided: structured `tracing` events under the
//! `filescanner::audit` target, and the persistent JSON Lines log in
//! [`AuditLog`].

mod events;
mod log;

pub use events::{emit_record_written, emit_scan_completed, emit_scan_started};
pub use log::{AuditLog, AuditRecord, DEFAULT_AUDIT_LOG, FILE_SCAN_EVENT};
