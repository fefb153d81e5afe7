#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SEPARATOR: &str = "----------- SCAN SUMMARY -----------";

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub engine: PathBuf,
    pub audit_log: PathBuf,
    args_file: PathBuf,
    transcript_file: PathBuf,
}

impl TestEnv {
    /// Environment whose fake engine prints `transcript` and exits with `exit_code`.
    pub fn new(transcript: &str, exit_code: i32) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let args_file = root.join("engine-args.txt");
        let transcript_file = root.join("transcript.txt");
        let engine = root.join("fake-clamscan");

        fs::write(&transcript_file, transcript).expect("write transcript fixture");
        write_fake_engine(&engine, &args_file, &transcript_file, exit_code);

        Self {
            audit_log: root.join("audit.log.jsonl"),
            _tmp: tmp,
            root,
            engine,
            args_file,
            transcript_file,
        }
    }

    /// Rewrites the transcript the fake engine prints.
    pub fn set_transcript(&self, transcript: &str) {
        fs::write(&self.transcript_file, transcript).expect("rewrite transcript fixture");
    }

    /// The binary with colour and animation off and no engine or log chosen.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("filescanner").expect("binary built");
        cmd.arg("--no-animation")
            .env("CLICOLOR", "0")
            .env("NO_COLOR", "1")
            .env_remove("FILESCANNER_ENGINE")
            .env_remove("FILESCANNER_AUDIT_LOG");
        cmd
    }

    /// The binary wired to the fake engine and the temp audit log.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--engine")
            .arg(&self.engine)
            .arg("--audit-log")
            .arg(&self.audit_log);
        cmd
    }

    /// Arguments the fake engine received, or `None` if it never ran.
    pub fn engine_args(&self) -> Option<Vec<String>> {
        fs::read_to_string(&self.args_file)
            .ok()
            .map(|s| s.lines().map(str::to_owned).collect())
    }

    pub fn audit_records(&self) -> Vec<Value> {
        match fs::read_to_string(&self.audit_log) {
            Ok(content) => content
                .lines()
                .map(|line| serde_json::from_str(line).expect("valid audit json"))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn make_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("write scan target");
        path
    }

    pub fn make_dir(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::create_dir_all(&path).expect("create scan dir");
        path
    }
}

#[cfg(unix)]
fn write_fake_engine(engine: &Path, args_file: &Path, transcript_file: &Path, exit_code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\nfor arg in \"$@\"; do echo \"$arg\"; done > '{}'\ncat '{}'\nexit {}\n",
        args_file.display(),
        transcript_file.display(),
        exit_code
    );
    fs::write(engine, script).expect("write fake engine");
    fs::set_permissions(engine, fs::Permissions::from_mode(0o755)).expect("chmod fake engine");
}

#[cfg(not(unix))]
fn write_fake_engine(_engine: &Path, _args_file: &Path, _transcript_file: &Path, _exit_code: i32) {}
