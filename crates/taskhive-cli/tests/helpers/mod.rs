use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskhive").expect("Failed to find taskhive binary");
        cmd.env("TASKHIVE_DATABASE_PATH", &self.db_path);
        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Adds a task and extracts its ID from the command output.
    pub fn add_task(&self, title: &str, team: &str) -> String {
        let assert = self
            .run_success(&["add", title, "--team", team])
            .stdout(predicates::str::contains("Task ID:"));
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
        extract_uuid(&stdout).expect("No task ID in output")
    }
}

/// Finds the first UUID-shaped token in possibly color-coded output.
pub fn extract_uuid(text: &str) -> Option<String> {
    text.split(|c: char| !(c.is_ascii_hexdigit() || c == '-'))
        .find(|token| token.len() == 36 && token.chars().filter(|&c| c == '-').count() == 4)
        .map(|token| token.to_string())
}
