//! Scan orchestration.
//!
//! The [`ScanManager`] ties the hasher, an engine and the transcript parser
//! together into a single [`ScanResult`](crate::core::ScanResult).

mod scan_manager;

pub use scan_manager::{ScanManager, ScanManagerBuilder};
