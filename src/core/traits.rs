//! Core traits for the filescanner library.
//!
//! The [`Engine`] trait is the seam between the orchestrator and whatever
//! produces a transcript, so parsing and verdict logic can be exercised
//! against captured fixtures without a real scanner installed.

use crate::core::error::ScanError;
use crate::core::transcript::Transcript;
use crate::core::types::ScanTarget;

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// An external scan engine.
///
/// # Implementation Notes
///
/// - A non-zero exit status that signals detections is not an error; the
///   transcript must still be returned.
/// - Failure to start the engine at all must be reported as
///   [`ScanError::EngineUnavailable`], never as an empty transcript.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use filescanner::core::{Engine, ScanError, ScanTarget, Transcript};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct FixtureEngine(String);
///
/// #[async_trait]
/// impl Engine for FixtureEngine {
///     fn name(&self) -> &str {
///         "fixture"
///     }
///
///     async fn invoke(&self, _target: &ScanTarget) -> Result<Transcript, ScanError> {
///         Ok(Transcript::new(self.0.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait Engine: Send + Sync + Debug {
    /// Stable identifier of the engine, e.g. `"clamav"`.
    fn name(&self) -> &str;

    /// Scans `target` and returns the captured transcript.
    async fn invoke(&self, target: &ScanTarget) -> Result<Transcript, ScanError>;
}

/// Type alias for a shared engine.
pub type ArcEngine = Arc<dyn Engine>;

