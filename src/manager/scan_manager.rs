//! The scan orchestrator.

use crate::audit::{emit_scan_completed, emit_scan_started};
use crate::core::{ArcEngine, Engine, FileHasher, ScanError, ScanResult, ScanTarget};

use std::path::Path;
use std::sync::Arc;

/// Builder for creating a `ScanManager`.
#[derive(Default)]
pub struct ScanManagerBuilder {
    engine: Option<ArcEngine>,
    hasher: FileHasher,
}

impl ScanManagerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine.
    pub fn with_engine<E: Engine + 'static>(mut self, engine: E) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    /// Sets an engine that is already shared.
    pub fn with_arc_engine(mut self, engine: ArcEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Sets the hasher used for single-file digests.
    pub fn with_hasher(mut self, hasher: FileHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Builds the scan manager.
    pub fn build(self) -> Result<ScanManager, ScanError> {
        let engine = self
            .engine
            .ok_or_else(|| ScanError::configuration("an engine is required"))?;

        Ok(ScanManager {
            engine,
            hasher: self.hasher,
        })
    }
}

/// Runs one scan: resolve the target, digest it if it is a file, invoke the
/// engine, parse the transcript and derive the verdict.
#[derive(Debug, Clone)]
pub struct ScanManager {
    /// The engine being driven.
    engine: ArcEngine,
    /// Digest calculator for file targets.
    hasher: FileHasher,
}

impl ScanManager {
    /// Creates a new builder.
    pub fn builder() -> ScanManagerBuilder {
        ScanManagerBuilder::new()
    }

    /// Name of the configured engine.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Scans a file or directory.
    ///
    /// A missing path fails with [`ScanError::TargetNotFound`] before any
    /// digest is computed or engine invoked.
    pub async fn scan(&self, path: impl AsRef<Path>) -> Result<ScanResult, ScanError> {
        let target = match ScanTarget::resolve(path.as_ref()) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(path = %path.as_ref().display(), error = %e, "Scan target rejected");
                return Err(e);
            }
        };

        let sha256 = self.digest(&target).await?;

        emit_scan_started(&target, sha256.as_deref(), self.engine.name());

        let transcript = self.engine.invoke(&target).await?;
        let parsed = transcript.parse();

        tracing::debug!(
            entries = parsed.file_results.len(),
            infected_count = parsed.infected_count,
            summary_keys = parsed.summary.len(),
            "Transcript parsed"
        );

        let result = ScanResult::new(&target, sha256, parsed, transcript.mentions_detection());

        emit_scan_completed(&result, self.engine.name());

        Ok(result)
    }

    /// Computes the digest for file targets; directories get `None`.
    async fn digest(&self, target: &ScanTarget) -> Result<Option<String>, ScanError> {
        if !target.is_digestible() {
            return Ok(None);
        }

        let hasher = self.hasher.clone();
        let path = target.path.clone();
        let digest = tokio::task::spawn_blocking(move || hasher.hash_file(&path))
            .await
            .map_err(|e| ScanError::internal(format!("hashing task failed: {}", e)))??;

        Ok(Some(digest))
    }
}
