//! Core types and traits for the filescanner library.
//!
//! - [`types`] - Targets and statuses
//! - [`traits`] - The `Engine` adapter trait
//! - [`error`] - Structured error types
//! - [`hasher`] - Streaming SHA-256 digests
//! - [`transcript`] - Engine transcript parsing
//! - [`result`] - The per-invocation scan result

pub mod error;
pub mod hasher;
pub mod result;
pub mod traits;
pub mod transcript;
pub mod types;

pub use error::{ScanError, EXIT_SCAN_FAILED};
pub use hasher::FileHasher;
pub use result::{derive_verdict, ScanResult, EXIT_CLEAN, EXIT_INFECTED};
pub use traits::{ArcEngine, Engine};
pub use transcript::{FileEntry, ParsedTranscript, SummaryTable, Transcript, SUMMARY_SEPARATOR};
pub use types::{EntryStatus, ScanStatus, ScanTarget, TargetKind};
