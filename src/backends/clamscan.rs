//! ClamAV command-line backend.
//!
//! Runs `clamscan [-r] <path>` as a subprocess and captures its standard
//! output. `clamscan` exits with status 1 when it finds something, so the
//! exit status is recorded but never treated as a failure on its own.

use crate::core::{Engine, ScanError, ScanTarget, Transcript};

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

/// Name reported for this engine.
pub const ENGINE_NAME: &str = "clamav";

/// `clamscan` configuration.
#[derive(Debug, Clone)]
pub struct ClamScanConfig {
    /// Binary to execute. Looked up on `PATH` when not absolute.
    pub binary: PathBuf,

    /// Flag appended for directory targets.
    pub recursive_flag: String,

    /// Extra arguments placed before the target path.
    pub extra_args: Vec<String>,
}

impl Default for ClamScanConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("clamscan"),
            recursive_flag: "-r".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl ClamScanConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the binary to execute.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Sets the recursive-scan flag.
    pub fn with_recursive_flag(mut self, flag: impl Into<String>) -> Self {
        self.recursive_flag = flag.into();
        self
    }

    /// Adds an extra argument.
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}

/// Scan engine backed by the `clamscan` executable.
///
/// # Example
///
/// ```rust,ignore
/// use filescanner::backends::{ClamScanEngine, ClamScanConfig};
///
/// let engine = ClamScanEngine::new(ClamScanConfig::new().with_binary("/usr/bin/clamscan"))?;
/// ```
#[derive(Debug)]
pub struct ClamScanEngine {
    config: ClamScanConfig,
}

impl ClamScanEngine {
    /// Creates a new engine with the given configuration.
    pub fn new(config: ClamScanConfig) -> Result<Self, ScanError> {
        if config.binary.as_os_str().is_empty() {
            return Err(ScanError::configuration("engine binary must not be empty"));
        }
        if config.recursive_flag.is_empty() {
            return Err(ScanError::configuration("recursive flag must not be empty"));
        }

        Ok(Self { config })
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Result<Self, ScanError> {
        Self::new(ClamScanConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClamScanConfig {
        &self.config
    }

    /// Arguments passed to the binary for `target`, in order.
    ///
    /// The recursive flag is present only for directories and the target
    /// path is always last.
    pub fn command_args(&self, target: &ScanTarget) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.config.extra_args.iter().map(OsString::from).collect();

        if target.kind.is_directory() {
            args.push(OsString::from(&self.config.recursive_flag));
        }

        args.push(target.path.clone().into_os_string());
        args
    }

    fn spawn_error(&self, err: std::io::Error) -> ScanError {
        let binary = self.config.binary.display();
        let reason = match err.kind() {
            std::io::ErrorKind::NotFound => format!("'{}' not found", binary),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied executing '{}'", binary)
            }
            _ => format!("failed to execute '{}': {}", binary, err),
        };
        ScanError::engine_unavailable(ENGINE_NAME, reason)
    }
}

#[async_trait]
impl Engine for ClamScanEngine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    async fn invoke(&self, target: &ScanTarget) -> Result<Transcript, ScanError> {
        let args = self.command_args(target);

        tracing::debug!(
            binary = %self.config.binary.display(),
            args = ?args,
            "Invoking engine"
        );

        let output = tokio::process::Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let exit_code = output.status.code();
        if exit_code.is_none() {
            return Err(ScanError::engine_failed(
                ENGINE_NAME,
                format!("terminated without an exit status ({})", output.status),
            ));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!(stderr = %stderr.trim(), "Engine wrote to stderr");
        }

        let stdout = match String::from_utf8(output.stdout) {
            Ok(stdout) => stdout,
            Err(e) => {
                tracing::warn!("Engine output is not valid UTF-8; decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        tracing::debug!(
            exit_code = ?exit_code,
            stdout_bytes = stdout.len(),
            "Engine finished"
        );

        Ok(Transcript::new(stdout).with_exit_code(exit_code))
    }
}
