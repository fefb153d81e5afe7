//! filescanner CLI - scans a file or directory with ClamAV.
//!
//! Usage:
//!   filescanner /path/to/scan
//!   filescanner /path/to/scan --json report.json
//!   filescanner /path/to/scan --engine /opt/clamav/bin/clamscan --audit-log /var/log/scans.jsonl
//!
//! Exit codes: 0 clean, 1 detections, 2 scan not performed or not recorded.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use filescanner::audit::DEFAULT_AUDIT_LOG;
use filescanner::backends::{ClamScanConfig, ClamScanEngine};
use filescanner::compliance::fedramp_mapping;
use filescanner::core::EXIT_SCAN_FAILED;
use filescanner::report::progress::Indicator;
use filescanner::report::terminal::{render_banner, render_error, render_report};
use filescanner::report::{ScanReport, ToolInfo};
use filescanner::{AuditLog, ScanManager};

#[derive(Parser)]
#[command(name = "filescanner")]
#[command(about = "Local file scanner using ClamAV")]
#[command(version)]
struct Cli {
    /// File or directory path to scan
    path: PathBuf,

    /// Write results to a JSON file (e.g., report.json)
    #[arg(long = "json", value_name = "REPORT_PATH")]
    json_path: Option<PathBuf>,

    /// clamscan binary to run
    #[arg(long, env = "FILESCANNER_ENGINE", default_value = "clamscan")]
    engine: PathBuf,

    /// Audit log file (JSON Lines, append-only)
    #[arg(long, env = "FILESCANNER_AUDIT_LOG", default_value = DEFAULT_AUDIT_LOG)]
    audit_log: PathBuf,

    /// Do not animate the scanning indicator
    #[arg(long)]
    no_animation: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(EXIT_SCAN_FAILED as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    print!("{}", render_banner());

    let engine = ClamScanEngine::new(ClamScanConfig::new().with_binary(&cli.engine))
        .context("invalid engine configuration")?;
    let manager = ScanManager::builder()
        .with_engine(engine)
        .build()
        .context("failed to build scan manager")?;
    let engine_name = manager.engine_name().to_string();

    let animate = !cli.no_animation && std::io::stderr().is_terminal();
    let label = cli.path.display().to_string();
    let target = cli.path.clone();
    let scan = async move { manager.scan(&target).await };

    let result = match Indicator::stderr(label, animate).run(scan).await {
        Ok(result) => result,
        Err(e) => {
            print!("{}", render_error(&e));
            return Ok(e.exit_code() as u8);
        }
    };

    let mut post_scan_failed = false;
    let scan_id = uuid::Uuid::new_v4().to_string();
    let mapping = fedramp_mapping(&result);
    let report = ScanReport::new(scan_id.clone(), ToolInfo::new(engine_name), &result, &mapping);

    let audit_log = AuditLog::new(&cli.audit_log);
    if let Err(e) = audit_log.record_scan(&result, scan_id) {
        tracing::error!(error = %e, "Audit record not written");
        eprintln!("{} {}", "warning:".yellow().bold(), e);
        post_scan_failed = true;
    }

    print!("{}", render_report(&result, &mapping));

    if let Some(ref json_path) = cli.json_path {
        match report.write_json(json_path) {
            Ok(()) => println!(
                "\n{} {}",
                "JSON report written to:".green().bold(),
                json_path.display()
            ),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                post_scan_failed = true;
            }
        }
    }

    if post_scan_failed {
        return Ok(EXIT_SCAN_FAILED as u8);
    }

    Ok(result.exit_code() as u8)
}
