use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command for `user` with plain output
fn cadence_cmd(db_path: &Path, user: &str) -> Command {
    let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
    cmd.env_remove("CADENCE_USER")
        .env_remove("CADENCE_SCOPE")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .arg("--user")
        .arg(user);
    cmd
}

fn save_base_plan(db_path: &Path) {
    cadence_cmd(db_path, "alex")
        .args(["plan", "save", "--name", "Base", "-a", "Run", "-a", "Swim", "--rest", "3"])
        .assert()
        .success();
}

#[test]
fn test_cli_shows_default_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .assert()
        .success()
        .stdout(predicate::str::contains("# My Plan"))
        .stdout(predicate::str::contains("No sessions in this plan."));
}

#[test]
fn test_cli_requires_user() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    Command::cargo_bin("cadence")
        .expect("Failed to find cadence binary")
        .env_remove("CADENCE_USER")
        .args(["--no-color", "--database-file"])
        .arg(&db_path)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn test_cli_user_from_environment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    Command::cargo_bin("cadence")
        .expect("Failed to find cadence binary")
        .env("CADENCE_USER", "alex")
        .args(["--no-color", "--database-file"])
        .arg(&db_path)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Plan (0 sessions)** (selected)"));
}

#[test]
fn test_cli_save_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .args(["plan", "save", "--name", "Base", "-a", "Run", "-a", "", "--rest", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Saved plan"))
        .stdout(predicate::str::contains("# Base"))
        .stdout(predicate::str::contains("1. Run"))
        .stdout(predicate::str::contains("2. Free"))
        .stdout(predicate::str::contains("3. *rest*"));

    cadence_cmd(&db_path, "alex")
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Sessions: 3 (2 training, 1 rest)"));
}

#[test]
fn test_cli_toggle_and_summary() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 1 in cycle 1 is now done"))
        .stdout(predicate::str::contains("| 1 | Run | ✓ |"));

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "2"])
        .assert()
        .success();
    cadence_cmd(&db_path, "alex")
        .args(["toggle", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now partial"));

    cadence_cmd(&db_path, "alex")
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle 1: 1 done, 1 partial, 0 missed"));
}

#[test]
fn test_cli_toggle_to_status() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1", "--to", "missed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 1 in cycle 1 is now missed"));

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1", "--to", "missed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now missed"));

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1", "--to", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now done"));

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1", "--to", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status: later"));
}

#[test]
fn test_cli_save_rejects_rest_past_session_limit() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .args(["plan", "save", "-a", "Run", "--rest", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plans have at most 30 sessions"));
}

#[test]
fn test_cli_toggle_rejects_other_cycles() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "1", "--cycle", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Only the current cycle (1) can be changed"));
}

#[test]
fn test_cli_toggle_position_starts_at_one() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .args(["toggle", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positions start at 1"));
}

#[test]
fn test_cli_cycle_navigation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "alex")
        .args(["cycle", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now on cycle 2"))
        .stdout(predicate::str::contains("| # | Activity | 1 | **2** | 3 |"));

    cadence_cmd(&db_path, "alex")
        .args(["cycle", "prev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now on cycle 1"))
        .stdout(predicate::str::contains("| # | Activity | **1** | 2 | 3 |"));
}

#[test]
fn test_cli_edit_keeps_past_cycles() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "alex")
        .args(["cycle", "next"])
        .assert()
        .success();

    cadence_cmd(&db_path, "alex")
        .args(["plan", "save", "-a", "Run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "earlier cycles keep the version used before cycle 2",
        ));

    // Cycle 1 still shows the archived rest day in session 3
    cadence_cmd(&db_path, "alex")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("| 3 |  | - |   |   |"));
}

#[test]
fn test_cli_delete_last_plan_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .args(["plan", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only remaining plan"));
}

#[test]
fn test_cli_create_select_and_delete() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path, "alex")
        .args(["plan", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan 2"));

    cadence_cmd(&db_path, "alex")
        .args(["plan", "select", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected plan 1"));

    cadence_cmd(&db_path, "alex")
        .args(["plan", "delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan 1, now tracking 2."));

    cadence_cmd(&db_path, "alex")
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. My Plan"))
        .stdout(predicate::str::contains("1. My Plan").not());
}

#[test]
fn test_cli_users_do_not_share_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    save_base_plan(&db_path);

    cadence_cmd(&db_path, "sam")
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. My Plan"))
        .stdout(predicate::str::contains("Base").not());

    cadence_cmd(&db_path, "sam")
        .args(["--plan", "1", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));
}
