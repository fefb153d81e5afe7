//! Scan engine implementations.
//!
//! - [`clamscan`] - The `clamscan` command-line scanner
//! - [`mock`] - A transcript-replaying engine for tests
//!
//! ## Implementing a Custom Engine
//!
//! ```rust,ignore
//! use filescanner::core::{Engine, ScanError, ScanTarget, Transcript};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyEngine;
//!
//! #[async_trait]
//! impl Engine for MyEngine {
//!     fn name(&self) -> &str {
//!         "my-engine"
//!     }
//!
//!     async fn invoke(&self, target: &ScanTarget) -> Result<Transcript, ScanError> {
//!         todo!()
//!     }
//! }
//! ```

pub mod clamscan;
pub mod mock;

pub use clamscan::{ClamScanConfig, ClamScanEngine};
pub use mock::MockEngine;
