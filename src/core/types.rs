//! Core types used throughout the filescanner library.
//!
//! This module defines scan targets, per-entry and overall statuses.

use crate::core::error::ScanError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Whether a target is a single file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A single file. Its content is digested and scanned non-recursively.
    File,
    /// A directory. Scanned recursively, never digested.
    Directory,
}

impl TargetKind {
    /// Returns `true` for directory targets.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Lowercase label used in reports and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one entry of the engine transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    /// The engine reported `OK`.
    Clean,
    /// The engine reported `<signature> FOUND`.
    Infected,
}

/// Overall status of a scan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanStatus {
    /// No detections.
    Clean,
    /// At least one detection.
    Infected,
    /// The scan could not be performed.
    Error,
}

impl ScanStatus {
    /// Returns `true` if the status is `Clean`.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Returns `true` if the status is `Infected`.
    pub fn is_infected(&self) -> bool {
        matches!(self, Self::Infected)
    }

    /// Uppercase label used in reports and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "CLEAN",
            Self::Infected => "INFECTED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path that existed when it was resolved, together with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// The path exactly as supplied by the caller.
    pub path: PathBuf,
    /// File or directory.
    pub kind: TargetKind,
}

impl ScanTarget {
    /// Resolves a user-supplied path into a target.
    ///
    /// Fails with [`ScanError::TargetNotFound`] if nothing exists at `path`,
    /// including paths below a regular file and symlink loops.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => {
                return Err(ScanError::target_not_found(path.display().to_string()));
            }
            Err(e) => return Err(ScanError::Io(e)),
        };

        let kind = if metadata.is_dir() {
            TargetKind::Directory
        } else {
            TargetKind::File
        };

        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    /// Creates a target without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, kind: TargetKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns `true` if the target should be digested: a regular file.
    pub fn is_digestible(&self) -> bool {
        self.kind == TargetKind::File && self.path.is_file()
    }

    /// Path rendered for reports.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Whether a stat failure means nothing usable exists at the path: absent,
/// a parent component that is not a directory, or a symlink loop.
fn is_missing(err: &std::io::Error) -> bool {
    if err.kind() == std::io::ErrorKind::NotFound {
        return true;
    }
    #[cfg(unix)]
    {
        matches!(err.raw_os_error(), Some(code) if code == errno::ENOTDIR || code == errno::ELOOP)
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(unix)]
mod errno {
    pub const ENOTDIR: i32 = 20;

    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const ELOOP: i32 = 40;
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    pub const ELOOP: i32 = 62;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&ScanStatus::Clean).unwrap(), "\"CLEAN\"");
        assert_eq!(serde_json::to_string(&ScanStatus::Infected).unwrap(), "\"INFECTED\"");
        assert_eq!(serde_json::to_string(&EntryStatus::Infected).unwrap(), "\"INFECTED\"");
        assert_eq!(serde_json::to_string(&TargetKind::Directory).unwrap(), "\"directory\"");
    }

    #[test]
    fn test_resolve_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sample.txt");
        std::fs::write(&file, b"content").unwrap();

        let target = ScanTarget::resolve(&file).unwrap();
        assert_eq!(target.kind, TargetKind::File);
        assert!(target.is_digestible());

        let target = ScanTarget::resolve(dir.path()).unwrap();
        assert_eq!(target.kind, TargetKind::Directory);
        assert!(!target.is_digestible());
    }

    #[test]
    fn test_resolve_missing_path() {
        let err = ScanTarget::resolve("/no/such/path/here").unwrap_err();
        assert!(err.is_target_not_found());
        assert_eq!(err.to_string(), "Path does not exist: /no/such/path/here");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_path_below_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"content").unwrap();

        let below = file.join("child");
        let err = ScanTarget::resolve(&below).unwrap_err();
        assert!(err.is_target_not_found());
        assert_eq!(
            err.to_string(),
            format!("Path does not exist: {}", below.display())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_loop() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::os::unix::fs::symlink(&second, &first).unwrap();
        std::os::unix::fs::symlink(&first, &second).unwrap();

        let err = ScanTarget::resolve(&first).unwrap_err();
        assert!(err.is_target_not_found());
        assert_eq!(
            err.to_string(),
            format!("Path does not exist: {}", first.display())
        );
    }
}
