//! Error types for the filescanner library.
//!
//! Every failure that stops a scan or its post-scan bookkeeping is a
//! [`ScanError`]. Unrecognised transcript lines are not errors; the parser
//! drops them.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for any scan that could not be performed or completed.
pub const EXIT_SCAN_FAILED: i32 = 2;

/// The main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The target path does not exist. No engine is invoked.
    #[error("Path does not exist: {path}")]
    TargetNotFound {
        /// The path exactly as the caller supplied it.
        path: String,
    },

    /// The engine binary could not be started (missing, not executable).
    #[error("engine '{engine}' is unavailable: {reason}")]
    EngineUnavailable {
        /// Name of the engine.
        engine: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The engine ran but its output could not be used.
    #[error("engine '{engine}' failed: {reason}")]
    EngineFailed {
        /// Name of the engine.
        engine: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Appending to the audit log failed.
    #[error("failed to write audit log {}: {source}", .path.display())]
    AuditWriteFailed {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the JSON report failed.
    #[error("failed to write report {}: {source}", .path.display())]
    ReportWriteFailed {
        /// Report file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred, typically while hashing the target.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or report could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` if the target was missing.
    pub fn is_target_not_found(&self) -> bool {
        matches!(self, Self::TargetNotFound { .. })
    }

    /// Returns the engine name if this error is associated with one.
    pub fn engine(&self) -> Option<&str> {
        match self {
            Self::EngineUnavailable { engine, .. } | Self::EngineFailed { engine, .. } => {
                Some(engine)
            }
            _ => None,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_SCAN_FAILED
    }

    /// Creates a `TargetNotFound` error.
    pub fn target_not_found(path: impl Into<String>) -> Self {
        Self::TargetNotFound { path: path.into() }
    }

    /// Creates an `EngineUnavailable` error.
    pub fn engine_unavailable(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EngineUnavailable {
            engine: engine.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `EngineFailed` error.
    pub fn engine_failed(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EngineFailed {
            engine: engine.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_not_found_message() {
        let err = ScanError::target_not_found("/no/such/file");
        assert_eq!(err.to_string(), "Path does not exist: /no/such/file");
        assert!(err.is_target_not_found());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_scan_error_engine() {
        let err = ScanError::engine_unavailable("clamav", "No such file or directory");
        assert_eq!(err.engine(), Some("clamav"));
        assert!(!err.is_target_not_found());

        let io_err = ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "test error",
        ));
        assert_eq!(io_err.engine(), None);
    }

    #[test]
    fn test_audit_write_display() {
        let err = ScanError::AuditWriteFailed {
            path: PathBuf::from("/var/log/audit.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/var/log/audit.jsonl"));
        assert!(msg.contains("denied"));
    }
}
