//! Mock engine for testing.
//!
//! Replays a fixed transcript for every invocation and counts how often it
//! was called, so tests can assert that no engine ran.

use crate::core::{Engine, ScanError, ScanTarget, Transcript};

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A mock engine for testing purposes.
///
/// # Examples
///
/// ```rust
/// use filescanner::backends::MockEngine;
///
/// let engine = MockEngine::with_transcript("/tmp/a: OK\n");
/// assert_eq!(engine.invocation_count(), 0);
/// ```
#[derive(Debug)]
pub struct MockEngine {
    /// Name reported by this engine.
    name: String,
    /// Transcript replayed on every call.
    stdout: String,
    /// Exit code attached to the transcript.
    exit_code: Option<i32>,
    /// When set, every call fails as if the binary were missing.
    unavailable: bool,
    /// Number of invocations.
    invocations: AtomicU64,
    /// Targets seen, in call order.
    seen: Mutex<Vec<ScanTarget>>,
}

impl MockEngine {
    /// Creates a mock that returns an empty transcript.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            stdout: String::new(),
            exit_code: Some(0),
            unavailable: false,
            invocations: AtomicU64::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that replays `stdout`.
    pub fn with_transcript(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::new()
        }
    }

    /// Creates a mock whose binary is "missing".
    pub fn new_unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Sets the exit code attached to the transcript.
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    /// Returns the number of invocations.
    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Returns the targets this engine was invoked with.
    pub fn seen_targets(&self) -> Vec<ScanTarget> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for MockEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, target: &ScanTarget) -> Result<Transcript, ScanError> {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(target.clone());
        }

        if self.unavailable {
            return Err(ScanError::engine_unavailable(&self.name, "mock binary not found"));
        }

        Ok(Transcript::new(self.stdout.clone()).with_exit_code(self.exit_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetKind;

    #[tokio::test]
    async fn test_mock_replays_transcript() {
        let engine = MockEngine::with_transcript("/tmp/a: OK\n").with_exit_code(Some(0));
        let target = ScanTarget::new("/tmp/a", TargetKind::File);

        let transcript = engine.invoke(&target).await.unwrap();
        assert_eq!(transcript.stdout, "/tmp/a: OK\n");
        assert_eq!(engine.invocation_count(), 1);
        assert_eq!(engine.seen_targets(), vec![target]);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let engine = MockEngine::new_unavailable();
        let target = ScanTarget::new("/tmp", TargetKind::Directory);

        let err = engine.invoke(&target).await.unwrap_err();
        assert!(matches!(err, ScanError::EngineUnavailable { .. }));
        assert_eq!(engine.invocation_count(), 1);
    }
}
