/// CLI integration tests for taskhive
///
/// These tests exercise the CLI commands as a black box against a
/// temporary database.
use predicates::prelude::*;

mod helpers;
use helpers::CliTestHarness;

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("task manager"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("taskhive"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_team_and_project_management() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["team", "add", "platform"])
        .stdout(predicate::str::contains("Created team"));

    harness
        .run_success(&["team", "list"])
        .stdout(predicate::str::contains("platform"));

    harness
        .run_success(&["project", "add", "infra", "--team", "platform"])
        .stdout(predicate::str::contains("Created project"));

    harness
        .run_success(&["project", "list", "--team", "platform"])
        .stdout(predicate::str::contains("infra"));

    // Unknown team
    harness
        .run_failure(&["project", "add", "infra", "--team", "nope"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_add_and_list_tasks() {
    let harness = CliTestHarness::new();
    harness.run_success(&["team", "add", "platform"]);

    harness
        .run_success(&[
            "add",
            "Write report",
            "--team",
            "platform",
            "--due",
            "tomorrow",
            "--priority",
            "high",
            "--description",
            "Quarterly report",
        ])
        .stdout(predicate::str::contains("Created task"));

    harness
        .run_success(&["list", "--team", "platform"])
        .stdout(predicate::str::contains("Write report"));

    // Invalid priority
    harness
        .run_failure(&["add", "Bad", "--team", "platform", "--priority", "extreme"])
        .stderr(predicate::str::contains("error"));

    // Invalid date
    harness
        .run_failure(&["add", "Bad", "--team", "platform", "--due", "not-a-date"])
        .stderr(predicate::str::contains("Failed to parse date"));
}

#[test]
fn test_recurring_series_lifecycle() {
    let harness = CliTestHarness::new();
    harness.run_success(&["team", "add", "platform"]);
    let task_id = harness.add_task("Standup", "platform");

    harness
        .run_success(&[
            "recur", "create", &task_id, "--every", "weekly", "--on", "mon,wed,fri",
        ])
        .stdout(predicate::str::contains("Created recurring series"));

    harness
        .run_success(&["recur", "info", &task_id])
        .stdout(predicate::str::contains("Standup"))
        .stdout(predicate::str::contains("weekly"))
        .stdout(predicate::str::contains("active"));

    // A task can carry only one series
    harness
        .run_failure(&["recur", "create", &task_id, "--every", "daily"])
        .stderr(predicate::str::contains("already has a recurring series"));

    harness
        .run_success(&["recur", "update", &task_id, "--interval", "2"])
        .stdout(predicate::str::contains("Updated recurring series"));

    harness
        .run_success(&["recur", "stop", &task_id, "--force"])
        .stdout(predicate::str::contains("Series stopped"));

    harness
        .run_success(&["recur", "info", &task_id])
        .stdout(predicate::str::contains("stopped"));

    // Stopping again still succeeds
    harness
        .run_success(&["recur", "stop", &task_id, "--force"])
        .stdout(predicate::str::contains("Series stopped"));
}

#[test]
fn test_recur_rejects_invalid_input() {
    let harness = CliTestHarness::new();
    harness.run_success(&["team", "add", "platform"]);
    let task_id = harness.add_task("Cleanup", "platform");

    harness
        .run_failure(&["recur", "create", "not-a-uuid", "--every", "daily"])
        .stderr(predicate::str::contains("Invalid task ID"));

    harness
        .run_failure(&[
            "recur", "create", &task_id, "--every", "daily", "--interval", "0",
        ])
        .stderr(predicate::str::contains("Invalid recurrence rule"));

    harness
        .run_failure(&["recur", "create", &task_id, "--every", "hourly"])
        .stderr(predicate::str::contains("error"));

    harness
        .run_failure(&["recur", "info", &task_id])
        .stderr(predicate::str::contains("No recurring series"));
}

#[test]
fn test_backfill_on_empty_database() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["backfill"])
        .stdout(predicate::str::contains("0 series processed"));
}
