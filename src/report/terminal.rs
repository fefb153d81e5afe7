//! Human-readable terminal rendering.
//!
//! Renderers return strings so the binary decides where they go and tests
//! can inspect them. Colour follows `colored`'s own terminal detection.

use crate::compliance::{ComplianceMapping, Support};
use crate::core::{ScanError, ScanResult, ScanStatus, TargetKind};

use colored::*;
use std::fmt::Write;

/// Summary labels shown for directory scans, in display order.
pub const SUMMARY_KEYS: [&str; 10] = [
    "Known viruses",
    "Engine version",
    "Scanned directories",
    "Scanned files",
    "Infected files",
    "Data scanned",
    "Data read",
    "Time",
    "Start Date",
    "End Date",
];

/// Banner printed before the scan starts.
pub fn render_banner() -> String {
    let rule = "━".repeat(40).red().to_string();
    let title = format!(
        "{}{}{}",
        "THE FILE SCANNER".red().bold(),
        " x ".white().bold(),
        "CLAMAV".red().bold()
    );
    let subtitle = format!("{} v{}", crate::report::TOOL_NAME, env!("CARGO_PKG_VERSION"));

    format!("{rule}\n  {title}\n  {}\n{rule}\n", subtitle.white().bold())
}

/// The "scanning" line for one animation frame.
pub fn render_scanning_line(path: &str, frame: &str) -> String {
    format!(
        "{} {}  {}",
        "Scanning:".white().bold(),
        path.cyan().bold(),
        frame.red().bold()
    )
}

/// Report for a scan that could not be performed.
pub fn render_error(err: &ScanError) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Scan Result".red().bold());
    let _ = writeln!(out, "{} {}", "Status:".red(), ScanStatus::Error);
    let _ = writeln!(out, "{} {}", "Message:".red(), err);
    out
}

/// Full report for a completed scan.
pub fn render_report(result: &ScanResult, mapping: &ComplianceMapping) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Scan Result".white().bold());
    let _ = writeln!(out, "-----------");
    let _ = writeln!(out, "{} {}", "Target:".white().bold(), result.path.cyan());
    let _ = writeln!(out, "{} {}", "Type:".white().bold(), result.kind);

    if let Some(ref sha256) = result.sha256 {
        let _ = writeln!(out, "{} {}", "SHA256:".white().bold(), sha256);
    }

    let status = match result.status {
        ScanStatus::Clean => result.status.as_str().green().bold(),
        _ => result.status.as_str().red().bold(),
    };
    let _ = writeln!(out, "{} {}", "Viruses detected:".white().bold(), result.viruses_detected);
    let _ = writeln!(out, "{} {}", "Status:".white().bold(), status);
    let _ = writeln!(out);

    match result.kind {
        TargetKind::Directory => render_directory_details(&mut out, result),
        TargetKind::File => {
            for line in &result.transcript.lines {
                let _ = writeln!(out, "{}", line);
            }
        }
    }

    render_compliance(&mut out, mapping);
    out
}

fn render_directory_details(out: &mut String, result: &ScanResult) {
    let detections: Vec<_> = result.transcript.detections().collect();
    if !detections.is_empty() {
        let _ = writeln!(out, "{}", "Detections".red().bold());
        let _ = writeln!(out, "{}", "----------".red());
        for entry in detections {
            let signature = entry.signature.as_deref().unwrap_or("UNKNOWN");
            let _ = writeln!(out, "{} -> {}", entry.path.red(), signature.red().bold());
        }
        let _ = writeln!(out);
    }

    let summary = &result.transcript.summary;
    if !summary.is_empty() {
        let _ = writeln!(out, "{}", "ClamAV Summary".white().bold());
        let _ = writeln!(out, "-------------");
        for key in SUMMARY_KEYS {
            if let Some(value) = summary.get(key) {
                let _ = writeln!(out, "{} {}", format!("{key}:").white().bold(), value);
            }
        }
        let _ = writeln!(out);
    }
}

fn render_compliance(out: &mut String, mapping: &ComplianceMapping) {
    let _ = writeln!(out, "{}", "FedRAMP Control Mapping".white().bold());
    let _ = writeln!(out, "----------------------");
    for entry in mapping.entries() {
        let supported = entry.supported.to_string();
        let supported = match entry.supported {
            Support::Yes => supported.green().bold(),
            Support::Partial => supported.yellow().bold(),
            Support::No => supported.red().bold(),
        };
        let _ = writeln!(
            out,
            "{} ({}): {}",
            entry.control_id.white().bold(),
            entry.name,
            supported
        );
        let _ = writeln!(out, "  {} {}", "Evidence:".white().bold(), entry.evidence);
    }
}
