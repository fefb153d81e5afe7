//! Scan result structures.
//!
//! A [`ScanResult`] is built once per invocation from the resolved target,
//! the optional digest and the parsed transcript, and is never mutated.

use crate::core::transcript::ParsedTranscript;
use crate::core::types::{ScanStatus, ScanTarget, TargetKind};

use serde::Serialize;

/// Exit code for a completed scan with no detections.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code for a completed scan with at least one detection.
pub const EXIT_INFECTED: i32 = 1;

/// The complete result of one scan invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Target path as supplied.
    pub path: String,

    /// File or directory.
    #[serde(rename = "type")]
    pub kind: TargetKind,

    /// SHA-256 of the file content; `None` for directories.
    pub sha256: Option<String>,

    /// Overall verdict.
    pub status: ScanStatus,

    /// Number of detections counted towards the verdict.
    pub viruses_detected: usize,

    /// Structured engine output.
    #[serde(rename = "clamav")]
    pub transcript: ParsedTranscript,
}

impl ScanResult {
    /// Builds a result, deriving the overall verdict from the transcript.
    ///
    /// `stdout_mentions_detection` is the coarse single-file check: whether
    /// the literal `FOUND` appears anywhere in the engine's stdout.
    pub fn new(
        target: &ScanTarget,
        sha256: Option<String>,
        transcript: ParsedTranscript,
        stdout_mentions_detection: bool,
    ) -> Self {
        let (status, viruses_detected) =
            derive_verdict(target.kind, &transcript, stdout_mentions_detection);

        Self {
            path: target.display_path(),
            kind: target.kind,
            sha256,
            status,
            viruses_detected,
            transcript,
        }
    }

    /// Returns `true` if the overall status is clean.
    pub fn is_clean(&self) -> bool {
        self.status.is_clean()
    }

    /// Returns `true` if the overall status is infected.
    pub fn is_infected(&self) -> bool {
        self.status.is_infected()
    }

    /// Process exit code for this result: 1 with detections, otherwise 0.
    pub fn exit_code(&self) -> i32 {
        if self.is_infected() && self.viruses_detected > 0 {
            EXIT_INFECTED
        } else {
            EXIT_CLEAN
        }
    }
}

/// Derives `(status, viruses_detected)`.
///
/// Directories use the per-entry count. Single files use the coarse
/// substring check, since the engine emits exactly one verdict line for them.
pub fn derive_verdict(
    kind: TargetKind,
    transcript: &ParsedTranscript,
    stdout_mentions_detection: bool,
) -> (ScanStatus, usize) {
    match kind {
        TargetKind::Directory => {
            let count = transcript.infected_count;
            let status = if count > 0 {
                ScanStatus::Infected
            } else {
                ScanStatus::Clean
            };
            (status, count)
        }
        TargetKind::File => {
            if stdout_mentions_detection {
                (ScanStatus::Infected, 1)
            } else {
                (ScanStatus::Clean, 0)
            }
        }
    }
}
