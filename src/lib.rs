//! # filescanner
//!
//! A command-line front-end for the ClamAV `clamscan` engine with
//! compliance-ready audit logging.
//!
//! ## Overview
//!
//! filescanner does no detection of its own. For one file or directory it:
//!
//! - Computes a SHA-256 digest (single files only)
//! - Runs `clamscan` and parses its text transcript into structured entries
//! - Derives an overall CLEAN/INFECTED verdict
//! - Maps the outcome onto a fixed table of FedRAMP controls
//! - Appends a JSON Lines audit record
//! - Renders a terminal report and, optionally, a JSON report
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filescanner::prelude::*;
//! use filescanner::backends::ClamScanEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ScanManager::builder()
//!         .with_engine(ClamScanEngine::with_defaults()?)
//!         .build()?;
//!
//!     let result = manager.scan("/srv/uploads").await?;
//!     let mapping = fedramp_mapping(&result);
//!     AuditLog::default().record_scan(&result, "scan-1")?;
//!
//!     println!("{} ({} detections)", result.status, result.viruses_detected);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Core**: Targets, statuses, errors, hashing and transcript parsing
//! - **Backends**: Engine adapters (`clamscan`, mock)
//! - **Manager**: Orchestration of a single scan
//! - **Compliance**: The static FedRAMP control table
//! - **Audit**: Tracing events and the append-only audit log
//! - **Report**: JSON report, terminal rendering, progress indicator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod backends;
pub mod compliance;
pub mod core;
pub mod manager;
pub mod report;

// Re-export commonly used types at the crate root
pub use crate::core::{
    Engine, EntryStatus, FileEntry, FileHasher, ParsedTranscript, ScanError, ScanResult,
    ScanStatus, ScanTarget, SummaryTable, TargetKind, Transcript,
};

pub use crate::audit::{AuditLog, AuditRecord};
pub use crate::compliance::{fedramp_mapping, ComplianceEntry, ComplianceMapping};
pub use crate::manager::ScanManager;
pub use crate::report::{ScanReport, ToolInfo};

/// Prelude module for convenient imports.
///
/// ```rust
/// use filescanner::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audit::{AuditLog, AuditRecord};
    pub use crate::compliance::{fedramp_mapping, ComplianceEntry, ComplianceMapping};
    pub use crate::core::{
        Engine, EntryStatus, FileEntry, FileHasher, ParsedTranscript, ScanError, ScanResult,
        ScanStatus, ScanTarget, SummaryTable, TargetKind, Transcript,
    };
    pub use crate::manager::ScanManager;
    pub use crate::report::{ScanReport, ToolInfo};
}
