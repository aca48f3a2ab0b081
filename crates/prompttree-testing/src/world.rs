//! Isolated environment for running the `prompttree` binary.

use anyhow::Result;
use assert_cmd::Command;
use prompttree_runtime::config::{API_URL_ENV, PATH_ENV};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every request fails fast
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:9";

/// A throwaway data directory plus the flags that point `prompttree` at it.
///
/// Every run passes `--data-dir`, `--api-url` and `--format` explicitly and
/// strips the `PROMPTTREE_*` variables, so the developer's own config never
/// leaks into a test.
///
/// # Example
/// ```no_run
/// use prompttree_testing::TestWorld;
///
/// let world = TestWorld::new().with_json();
/// let result = world.run(&["saves"]).unwrap();
/// assert!(!result.success());
/// ```
pub struct TestWorld {
    root: TempDir,
    data_dir: PathBuf,
    api_url: String,
    format: &'static str,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let root = TempDir::new().expect("temp root");
        let data_dir = root.path().join("data");
        std::fs::create_dir_all(&data_dir).expect("data dir");

        Self {
            root,
            data_dir,
            api_url: UNREACHABLE_API_URL.to_string(),
            format: "plain",
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn temp_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_json(mut self) -> Self {
        self.format = "json";
        self
    }

    /// Write a file under the temp root and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, content).expect("write test file");
        path
    }

    #[allow(deprecated)]
    fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("prompttree")
            .map_err(|e| anyhow::anyhow!("prompttree binary not built: {}", e))?;

        cmd.current_dir(self.root.path())
            .env_remove(PATH_ENV)
            .env_remove(API_URL_ENV)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--api-url")
            .arg(&self.api_url)
            .arg("--format")
            .arg(self.format);
        Ok(cmd)
    }

    /// Run `prompttree <args>` in this world
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let output = self.command()?.args(args).output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as the `--format json` envelope
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout)
            .map_err(|e| anyhow::anyhow!("stdout is not JSON ({}): {}", e, self.stdout))
    }
}
